//! Gemini API連携（ブラウザ版）
//!
//! リクエスト組み立てと結果の解釈は herb_scan_common に任せ、
//! ここでは fetch による1回きりの送信とタイムアウトだけを扱う。

use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use herb_scan_common::request::{build_analysis_request, AnalysisSettings, GeminiResponse};
use herb_scan_common::{parse_analysis_response, AnalysisResult, EncodedImage, Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

/// 画像を1回だけ解析する
///
/// APIキーが無ければ fetch せずに MissingApiKey を返す
pub async fn analyze(settings: &AnalysisSettings, image: &EncodedImage) -> Result<AnalysisResult> {
    let url = settings.endpoint_url()?;
    let body = serde_json::to_string(&build_analysis_request(image, settings.temperature))?;

    let text = fetch_with_timeout(&url, &body, settings.timeout_seconds).await?;
    let payload: GeminiResponse = serde_json::from_str(&text)
        .map_err(|e| Error::Parse(format!("Gemini envelope: {}", e)))?;

    parse_analysis_response(&payload.into_text()?)
}

/// POSTしてレスポンス本文を返す。期限を過ぎたら fetch を中断する
async fn fetch_with_timeout(url: &str, body: &str, timeout_seconds: u64) -> Result<String> {
    let controller = AbortController::new().map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));
    opts.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Transport("window unavailable".into()))?;
    let response = Box::pin(read_response(JsFuture::from(window.fetch_with_request(&request))));
    let deadline = Box::pin(TimeoutFuture::new(timeout_millis(timeout_seconds)));

    match select(response, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            controller.abort();
            Err(Error::Timeout(timeout_seconds))
        }
    }
}

async fn read_response(pending: JsFuture) -> Result<String> {
    let response: Response = pending.await.map_err(js_error)?.dyn_into().map_err(js_error)?;

    if !response.ok() {
        gloo::console::warn!("Gemini API returned status", response.status());
        return Err(Error::Transport(format!("API error: {}", response.status())));
    }

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| Error::Transport("response body is not text".into()))
}

fn timeout_millis(timeout_seconds: u64) -> u32 {
    u32::try_from(timeout_seconds.saturating_mul(1000)).unwrap_or(u32::MAX)
}

fn js_error(value: JsValue) -> Error {
    Error::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_missing_key_fails_without_fetch() {
        let image = EncodedImage::from_data_url("data:image/jpeg;base64,/9j/4AAQ");
        let err = analyze(&AnalysisSettings::default(), &image).await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }
}
