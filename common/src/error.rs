//! エラー型定義

use crate::capture::CaptureErrorKind;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Unsupported image type: {0}")]
    UnsupportedMediaType(String),

    #[error("Image is too large: {size_bytes} bytes (limit {max_mb} MB)")]
    FileTooLarge { size_bytes: u64, max_mb: u32 },

    #[error("Camera error: {}", .0.message())]
    Capture(CaptureErrorKind),

    #[error("Camera is not ready yet")]
    CameraNotReady,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Empty response from the analysis service")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 解析失敗時にユーザーへ表示する文言（原因はログのみ）
pub const PROCESSING_FAILURE_MESSAGE: &str =
    "We couldn't read the analysis result. Please try again.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Analysis failed. Please check your connection and try again.";

impl Error {
    /// ユーザー向けメッセージ
    ///
    /// 解析失敗は汎用文言にまとめ、内部原因は表示しない
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingApiKey => {
                "Configuration error: add a Gemini API key before scanning.".to_string()
            }
            Error::Config(msg) => format!("Configuration error: {}", msg),
            Error::UnsupportedMediaType(_) => {
                "Please upload a JPEG, PNG or WebP image.".to_string()
            }
            Error::FileTooLarge { max_mb, .. } => {
                format!("The image is too large. Maximum size is {} MB.", max_mb)
            }
            Error::Capture(kind) => kind.message().to_string(),
            Error::CameraNotReady => {
                "The camera is still starting. Please try again in a moment.".to_string()
            }
            Error::EmptyResponse | Error::Parse(_) | Error::Json(_) => {
                PROCESSING_FAILURE_MESSAGE.to_string()
            }
            Error::Transport(_) | Error::Timeout(_) | Error::Io(_) => {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("model name is empty".to_string());
        assert_eq!(format!("{}", error), "Config error: model name is empty");
    }

    #[test]
    fn test_error_display_file_too_large() {
        let error = Error::FileTooLarge { size_bytes: 12_000_000, max_mb: 10 };
        let display = format!("{}", error);
        assert!(display.contains("12000000"));
        assert!(display.contains("10 MB"));
    }

    #[test]
    fn test_error_display_capture_uses_kind_message() {
        let error = Error::Capture(CaptureErrorKind::DeviceBusy);
        assert!(format!("{}", error).contains(CaptureErrorKind::DeviceBusy.message()));
    }

    #[test]
    fn test_analysis_failures_share_generic_messages() {
        let transport = Error::Transport("connection reset by peer".into());
        let timeout = Error::Timeout(120);
        assert_eq!(transport.user_message(), TRANSPORT_FAILURE_MESSAGE);
        assert_eq!(timeout.user_message(), TRANSPORT_FAILURE_MESSAGE);
        assert!(!transport.user_message().contains("reset"));

        assert_eq!(Error::EmptyResponse.user_message(), PROCESSING_FAILURE_MESSAGE);
        assert_eq!(
            Error::Parse("missing field `identified`".into()).user_message(),
            PROCESSING_FAILURE_MESSAGE
        );
    }


    #[test]
    fn test_missing_api_key_message_mentions_configuration() {
        assert!(Error::MissingApiKey.user_message().starts_with("Configuration error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
