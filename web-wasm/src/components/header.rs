//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(show_settings: RwSignal<bool>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🌿 Herb Scan"</h1>
            <p class="subtitle">"Ayurvedic plant, millet & pulse identifier"</p>
            <button
                class="btn btn-tertiary btn-small settings-toggle"
                on:click=move |_| show_settings.update(|open| *open = !*open)
            >
                {move || if show_settings.get() { "Close settings" } else { "Settings" }}
            </button>
        </header>
    }
}
