//! 解析中表示
//!
//! 進捗率は分からないので不定のバーと段階メッセージを出す

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(
    message: Signal<&'static str>,
    preview: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="progress-container">
            {move || preview.get().map(|src| view! {
                <img class="preview-image analyzing" src=src alt="Photo being analyzed" />
            })}
            <div class="progress-bar">
                <div class="progress-fill indeterminate" />
            </div>
            <p class="progress-text">{move || message.get()}</p>
        </div>
    }
}
