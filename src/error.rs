use thiserror::Error;

#[derive(Error, Debug)]
pub enum HerbScanError {
    #[error(transparent)]
    Common(#[from] herb_scan_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl HerbScanError {
    /// ユーザー向けメッセージ（解析失敗の詳細は出さない）
    pub fn user_message(&self) -> String {
        match self {
            HerbScanError::Common(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HerbScanError>;
