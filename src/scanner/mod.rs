//! 画像ファイルの読み込みと取り込み検査

use crate::error::{HerbScanError, Result};
use herb_scan_common::{mime_for_extension, EncodedImage, IntakePolicy};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// 拡張子と中身からMIMEタイプを決める（中身の判定を優先）
fn detect_mime(path: &Path, bytes: &[u8]) -> Option<String> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }

    path.extension()
        .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
        .map(str::to_string)
}

/// 画像ファイルを読み込み、検査してからエンコードする
pub fn load_image(path: &Path, policy: &IntakePolicy) -> Result<(ImageInfo, EncodedImage)> {
    if !path.is_file() {
        return Err(HerbScanError::FileNotFound(path.display().to_string()));
    }

    // 読み込む前にサイズだけ見る
    let size_bytes = std::fs::metadata(path)?.len();
    if size_bytes > policy.max_file_size_bytes() {
        return Err(herb_scan_common::Error::FileTooLarge {
            size_bytes,
            max_mb: policy.max_file_size_mb,
        }
        .into());
    }

    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime(path, &bytes).ok_or_else(|| {
        HerbScanError::ImageLoad(format!("画像形式を判定できません: {}", path.display()))
    })?;

    let encoded = policy.accept_file(&mime_type, &bytes)?;

    let info = ImageInfo {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        mime_type: encoded.mime_type.clone(),
        size_bytes,
    };

    tracing::debug!(file = %info.file_name, mime = %info.mime_type, size = size_bytes, "image accepted");

    Ok((info, encoded))
}
