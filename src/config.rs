use crate::error::{HerbScanError, Result};
use herb_scan_common::request::{
    AnalysisSettings, DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECONDS,
};
use herb_scan_common::IntakePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub max_file_size_mb: u32,
    pub allowed_mime_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let intake = IntakePolicy::default();
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_file_size_mb: intake.max_file_size_mb,
            allowed_mime_types: intake.allowed_mime_types,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HerbScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("herb-scan").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(HerbScanError::Config("model が空です".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(HerbScanError::Config("timeout_seconds は1以上にしてください".into()));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(HerbScanError::Config("allowed_mime_types が空です".into()));
        }
        Ok(())
    }

    /// 環境変数を優先
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            api_key: self.api_key(),
            model: self.model.clone(),
            api_base_url: self.api_base_url.clone(),
            temperature: self.temperature,
            timeout_seconds: self.timeout_seconds,
        }
    }

    pub fn intake_policy(&self) -> IntakePolicy {
        IntakePolicy {
            allowed_mime_types: self.allowed_mime_types.clone(),
            max_file_size_mb: self.max_file_size_mb,
        }
    }
}
