//! 解析失敗時の表示

use leptos::prelude::*;

#[component]
pub fn ErrorView(message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="error-view">
            <div class="error-icon">"⚠️"</div>
            <p>{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_retry.run(())>"Try again"</button>
        </div>
    }
}
