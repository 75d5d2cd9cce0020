//! カメラ撮影セッション
//!
//! 状態遷移: Closed → Opening → (Error | Live)、Live → Closed（キャンセル・撮影確定時）。
//! デバイスの取得/解放はセッションが一元管理し、Liveから抜ける全経路で解放する。
//! ブラウザ固有部分（getUserMedia, canvas）は `CameraBackend` の実装側に置く。

use crate::error::{Error, Result};
use crate::intake::EncodedImage;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// 静止画のJPEG品質
pub const CAPTURE_JPEG_QUALITY: f32 = 0.9;

/// 優先解像度
pub const PREFERRED_WIDTH: u32 = 1920;
pub const PREFERRED_HEIGHT: u32 = 1080;

/// カメラエラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureErrorKind {
    PermissionDenied,
    DeviceNotFound,
    DeviceBusy,
    PermissionDismissed,
    InsecureContext,
    Unavailable,
}

impl CaptureErrorKind {
    /// DOMException名から分類する
    pub fn from_dom_error(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => {
                if message.to_ascii_lowercase().contains("dismiss") {
                    CaptureErrorKind::PermissionDismissed
                } else {
                    CaptureErrorKind::PermissionDenied
                }
            }
            "PermissionDismissedError" => CaptureErrorKind::PermissionDismissed,
            "NotFoundError"
            | "DevicesNotFoundError"
            | "OverconstrainedError"
            | "ConstraintNotSatisfiedError" => CaptureErrorKind::DeviceNotFound,
            "NotReadableError" | "TrackStartError" | "AbortError" => CaptureErrorKind::DeviceBusy,
            "SecurityError" => CaptureErrorKind::InsecureContext,
            _ => CaptureErrorKind::Unavailable,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CaptureErrorKind::PermissionDenied => {
                "Camera access was denied. Allow camera permission in your browser settings and try again."
            }
            CaptureErrorKind::DeviceNotFound => "No camera was found on this device.",
            CaptureErrorKind::DeviceBusy => {
                "The camera is being used by another application. Close it and try again."
            }
            CaptureErrorKind::PermissionDismissed => {
                "The camera permission prompt was dismissed. Try again and choose Allow."
            }
            CaptureErrorKind::InsecureContext => {
                "Camera access requires a secure (HTTPS) connection."
            }
            CaptureErrorKind::Unavailable => {
                "The camera is unavailable right now. You can upload a photo instead."
            }
        }
    }
}

/// セッション状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Closed,
    Opening,
    Live,
    Error(CaptureErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Environment,
    User,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

/// getUserMediaに渡す映像制約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub facing_mode: Option<FacingMode>,
    pub ideal_width: Option<u32>,
    pub ideal_height: Option<u32>,
}

impl StreamConstraints {
    /// 背面カメラ・高解像度
    pub fn preferred() -> Self {
        Self {
            facing_mode: Some(FacingMode::Environment),
            ideal_width: Some(PREFERRED_WIDTH),
            ideal_height: Some(PREFERRED_HEIGHT),
        }
    }

    /// 制約なし（フォールバック用）
    pub fn minimal() -> Self {
        Self {
            facing_mode: None,
            ideal_width: None,
            ideal_height: None,
        }
    }

    /// MediaStreamConstraints.video に入れる値
    pub fn to_video_constraints(&self) -> serde_json::Value {
        if self.facing_mode.is_none() && self.ideal_width.is_none() && self.ideal_height.is_none() {
            return serde_json::Value::Bool(true);
        }

        let mut video = serde_json::Map::new();
        if let Some(mode) = self.facing_mode {
            video.insert("facingMode".into(), json!({ "ideal": mode.as_str() }));
        }
        if let Some(width) = self.ideal_width {
            video.insert("width".into(), json!({ "ideal": width }));
        }
        if let Some(height) = self.ideal_height {
            video.insert("height".into(), json!({ "ideal": height }));
        }
        serde_json::Value::Object(video)
    }
}

/// カメラデバイスへのアクセス手段
#[allow(async_fn_in_trait)]
pub trait CameraBackend {
    type Stream: CameraStream;

    /// セキュアコンテキスト外ではカメラAPIが使えない
    fn is_secure_context(&self) -> bool;

    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> std::result::Result<Self::Stream, CaptureErrorKind>;
}

/// 取得済みの映像ストリーム
pub trait CameraStream {
    /// 現在の映像フレームサイズ（未準備なら0）
    fn frame_size(&self) -> (u32, u32);

    /// 現在のフレームをJPEGのData URLとして取り出す
    fn grab_frame(&self, quality: f32) -> std::result::Result<String, CaptureErrorKind>;

    /// デバイスを解放する
    fn stop(&mut self);
}

/// 撮影セッション
pub struct CameraSession<B: CameraBackend> {
    backend: B,
    state: CaptureState,
    stream: Option<B::Stream>,
}

impl<B: CameraBackend> CameraSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: CaptureState::Closed,
            stream: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn has_active_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// カメラを開く
    ///
    /// 優先制約で失敗したら制約なしで一度だけ再試行する。
    /// それでも失敗したらErrorに遷移し、再試行はユーザー操作に任せる。
    /// Opening/Live中の呼び出しは何もしない
    pub async fn open(&mut self) -> Result<()> {
        if matches!(self.state, CaptureState::Opening | CaptureState::Live) {
            return Ok(());
        }

        if !self.backend.is_secure_context() {
            self.state = CaptureState::Error(CaptureErrorKind::InsecureContext);
            return Err(Error::Capture(CaptureErrorKind::InsecureContext));
        }

        self.state = CaptureState::Opening;

        let stream = match self.backend.request_stream(&StreamConstraints::preferred()).await {
            Ok(stream) => Ok(stream),
            Err(first) => {
                tracing::warn!(?first, "preferred camera constraints failed, retrying unconstrained");
                self.backend.request_stream(&StreamConstraints::minimal()).await
            }
        };

        match stream {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = CaptureState::Live;
                Ok(())
            }
            Err(kind) => {
                self.state = CaptureState::Error(kind);
                Err(Error::Capture(kind))
            }
        }
    }

    /// 静止画を撮影してセッションを閉じる
    ///
    /// フレーム未準備の間はLiveのまま `CameraNotReady` を返す
    pub fn capture(&mut self) -> Result<EncodedImage> {
        let stream = match (self.state, self.stream.as_ref()) {
            (CaptureState::Live, Some(stream)) => stream,
            _ => return Err(Error::CameraNotReady),
        };

        let (width, height) = stream.frame_size();
        if width == 0 || height == 0 {
            return Err(Error::CameraNotReady);
        }

        let frame = stream.grab_frame(CAPTURE_JPEG_QUALITY);
        self.release();

        match frame {
            Ok(data_url) => Ok(EncodedImage::from_data_url(&data_url)),
            Err(kind) => {
                self.state = CaptureState::Error(kind);
                Err(Error::Capture(kind))
            }
        }
    }

    pub fn cancel(&mut self) {
        self.release();
    }

    /// 何度呼んでもよい
    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        self.state = CaptureState::Closed;
    }
}

impl<B: CameraBackend> Drop for CameraSession<B> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}
