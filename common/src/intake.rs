//! 画像取り込み
//!
//! ファイル選択・ドラッグ&ドロップ・カメラ撮影のいずれから来た画像も
//! `EncodedImage`（MIMEタイプ + Base64）に正規化する。

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// 接頭辞が無い・解釈できない場合のMIMEタイプ
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 既定の許可MIMEタイプ
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// 既定の最大ファイルサイズ（MB）
pub const DEFAULT_MAX_FILE_SIZE_MB: u32 = 10;

/// Base64エンコード済み画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Data URL（"data:image/png;base64,AAAA"）を分解する
    ///
    /// 接頭辞の無い生Base64はそのまま `data` に入り、MIMEタイプは既定値になる
    pub fn from_data_url(input: &str) -> Self {
        let Some(rest) = input.strip_prefix("data:") else {
            return Self {
                mime_type: DEFAULT_MIME_TYPE.to_string(),
                data: input.to_string(),
            };
        };

        let Some((header, payload)) = rest.split_once(',') else {
            return Self {
                mime_type: DEFAULT_MIME_TYPE.to_string(),
                data: input.to_string(),
            };
        };

        let mime = header.split(';').next().unwrap_or("").trim();
        let mime_type = if is_media_type(mime) { mime } else { DEFAULT_MIME_TYPE };

        Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// デコード後のおおよそのバイト数
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|&b| b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

fn is_media_type(s: &str) -> bool {
    match s.split_once('/') {
        Some((kind, sub)) => !kind.is_empty() && !sub.is_empty() && !sub.contains('/'),
        None => false,
    }
}

/// 取り込み可否の判定ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakePolicy {
    pub allowed_mime_types: Vec<String>,
    pub max_file_size_mb: u32,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl IntakePolicy {
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.max_file_size_mb) * 1024 * 1024
    }

    /// MIMEタイプとサイズを検査（部分的な受け入れはしない）
    pub fn check(&self, mime_type: &str, size_bytes: u64) -> Result<()> {
        let mime = normalize_mime(mime_type);
        if !self.allowed_mime_types.iter().any(|allowed| normalize_mime(allowed) == mime) {
            return Err(Error::UnsupportedMediaType(mime_type.to_string()));
        }

        if size_bytes > self.max_file_size_bytes() {
            return Err(Error::FileTooLarge {
                size_bytes,
                max_mb: self.max_file_size_mb,
            });
        }

        Ok(())
    }

    /// 検査してからエンコードする
    pub fn accept_file(&self, mime_type: &str, bytes: &[u8]) -> Result<EncodedImage> {
        self.check(mime_type, bytes.len() as u64)?;
        Ok(EncodedImage::from_bytes(&normalize_mime(mime_type), bytes))
    }

    /// 許可形式の表示用文字列（"JPEG, PNG, WebP"）
    pub fn accepted_formats_label(&self) -> String {
        self.allowed_mime_types
            .iter()
            .map(|m| match normalize_mime(m).as_str() {
                "image/jpeg" => "JPEG".to_string(),
                "image/png" => "PNG".to_string(),
                "image/webp" => "WebP".to_string(),
                other => other.trim_start_matches("image/").to_uppercase(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn normalize_mime(mime: &str) -> String {
    let lower = mime.trim().to_ascii_lowercase();
    if lower == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        lower
    }
}

/// 拡張子からMIMEタイプを推定
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}
