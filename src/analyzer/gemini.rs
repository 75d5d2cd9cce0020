//! Gemini API連携（ネイティブ版）
//!
//! リクエスト組み立てとレスポンス解釈は herb_scan_common を使い、
//! ここでは reqwest による1回きりの送受信だけを行う。再試行はしない。

use herb_scan_common::request::{build_analysis_request, AnalysisSettings, GeminiResponse};
use herb_scan_common::{parse_analysis_response, AnalysisResult, EncodedImage, Error, Result};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    settings: AnalysisSettings,
}

impl GeminiClient {
    pub fn new(settings: AnalysisSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// 画像を解析する
    ///
    /// APIキーが無ければ通信せずに MissingApiKey を返す
    pub async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult> {
        let url = self.settings.endpoint_url()?;
        let request = build_analysis_request(image, self.settings.temperature);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %truncate(&body, 300), "Gemini API returned an error status");
            return Err(Error::Transport(format!("API error: {}", status)));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let payload: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Gemini envelope: {}", e)))?;
        let text = payload.into_text()?;

        tracing::debug!(chars = text.len(), "received analysis text");
        parse_analysis_response(&text)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.settings.timeout_seconds)
        } else {
            // URLにAPIキーが含まれるので外す
            Error::Transport(e.without_url().to_string())
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
