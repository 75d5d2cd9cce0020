//! 起動画面

use leptos::prelude::*;

#[component]
pub fn Splash() -> impl IntoView {
    view! {
        <div class="splash">
            <div class="splash-icon">"🌿"</div>
            <h1>"Herb Scan"</h1>
            <p class="text-muted">"Discover the healing wisdom of plants"</p>
        </div>
    }
}
