//! ブラウザのカメラ（getUserMedia）
//!
//! 状態遷移は herb_scan_common::CameraSession が持ち、
//! ここはデバイスの取得・フレーム取り出し・解放だけを実装する。

use herb_scan_common::{CameraBackend, CameraStream, CaptureErrorKind, StreamConstraints};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, DomException, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// プレビュー用 video 要素に映像を流すバックエンド
pub struct WebCamera {
    video: HtmlVideoElement,
}

impl WebCamera {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl CameraBackend for WebCamera {
    type Stream = WebStream;

    fn is_secure_context(&self) -> bool {
        web_sys::window()
            .map(|w| w.is_secure_context())
            .unwrap_or(false)
    }

    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<WebStream, CaptureErrorKind> {
        let window = web_sys::window().ok_or(CaptureErrorKind::Unavailable)?;
        let media = window
            .navigator()
            .media_devices()
            .map_err(|_| CaptureErrorKind::Unavailable)?;

        let video = constraints
            .to_video_constraints()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|_| CaptureErrorKind::Unavailable)?;

        let opts = MediaStreamConstraints::new();
        opts.set_video(&video);
        opts.set_audio(&JsValue::FALSE);

        let promise = media
            .get_user_media_with_constraints(&opts)
            .map_err(capture_error)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(capture_error)?
            .dyn_into()
            .map_err(|_| CaptureErrorKind::Unavailable)?;

        self.video.set_src_object(Some(&stream));
        // 自動再生が拒否されても muted + playsinline なので表示はされる
        let _ = self.video.play();

        Ok(WebStream {
            stream: Some(stream),
            video: self.video.clone(),
        })
    }
}

/// 取得済みストリーム
pub struct WebStream {
    stream: Option<MediaStream>,
    video: HtmlVideoElement,
}

impl CameraStream for WebStream {
    fn frame_size(&self) -> (u32, u32) {
        (self.video.video_width(), self.video.video_height())
    }

    fn grab_frame(&self, quality: f32) -> Result<String, CaptureErrorKind> {
        let (width, height) = self.frame_size();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(CaptureErrorKind::Unavailable)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(capture_error)?
            .dyn_into()
            .map_err(|_| CaptureErrorKind::Unavailable)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(capture_error)?
            .ok_or(CaptureErrorKind::Unavailable)?
            .dyn_into()
            .map_err(|_| CaptureErrorKind::Unavailable)?;
        context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(capture_error)?;

        canvas
            .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(f64::from(quality)))
            .map_err(capture_error)
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
        }
        self.video.set_src_object(None);
    }
}

/// DOMException を取得失敗の種別に変換する
fn capture_error(value: JsValue) -> CaptureErrorKind {
    match value.dyn_ref::<DomException>() {
        Some(e) => {
            gloo::console::warn!("camera error:", e.name(), e.message());
            CaptureErrorKind::from_dom_error(&e.name(), &e.message())
        }
        None => CaptureErrorKind::Unavailable,
    }
}
