//! 結果の共有（Web Share API / クリップボード）

use herb_scan_common::share::SHARE_TITLE;
use herb_scan_common::{share_text, AnalysisResult};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// 共有操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// 共有シートをユーザーが閉じた
    Dismissed,
}

/// 共有シートがあれば使い、無ければクリップボードへコピーする
pub async fn share_result(result: &AnalysisResult) -> Result<ShareOutcome, JsValue> {
    let text = share_text(result);
    let navigator: JsValue = web_sys::window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .navigator()
        .into();

    if let Some(share) = method(&navigator, "share")? {
        let data = Object::new();
        Reflect::set(&data, &"title".into(), &SHARE_TITLE.into())?;
        Reflect::set(&data, &"text".into(), &text.as_str().into())?;

        return match JsFuture::from(promise(share.call1(&navigator, &data)?)?).await {
            Ok(_) => Ok(ShareOutcome::Shared),
            Err(e) if is_abort(&e) => Ok(ShareOutcome::Dismissed),
            Err(e) => Err(e),
        };
    }

    let clipboard = Reflect::get(&navigator, &"clipboard".into())?;
    let write_text = method(&clipboard, "writeText")?
        .ok_or_else(|| JsValue::from_str("clipboard unavailable"))?;
    JsFuture::from(promise(write_text.call1(&clipboard, &text.as_str().into())?)?).await?;

    Ok(ShareOutcome::Copied)
}

fn method(target: &JsValue, name: &str) -> Result<Option<Function>, JsValue> {
    if target.is_undefined() || target.is_null() {
        return Ok(None);
    }
    Ok(Reflect::get(target, &name.into())?.dyn_into::<Function>().ok())
}

fn promise(value: JsValue) -> Result<js_sys::Promise, JsValue> {
    value.dyn_into::<js_sys::Promise>()
}

fn is_abort(error: &JsValue) -> bool {
    Reflect::get(error, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .is_some_and(|name| name == "AbortError")
}
