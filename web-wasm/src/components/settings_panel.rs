//! 設定パネルコンポーネント
//!
//! APIキーはメモリ上だけに保持する（保存しない）

use herb_scan_common::AnalysisSettings;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel(settings: RwSignal<AnalysisSettings>) -> impl IntoView {
    let api_key = move || settings.with(|s| s.api_key.clone().unwrap_or_default());
    let has_key = move || settings.with(|s| s.require_api_key().is_ok());

    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="Enter API key..."
                        autocomplete="off"
                        prop:value=api_key
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            settings.update(|s| {
                                s.api_key = Some(value.trim().to_string()).filter(|k| !k.is_empty());
                            });
                        }
                    />
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "Get an API key →"
                    </a>
                    <div class="api-key-status">
                        {move || if has_key() { "Key set for this session" } else { "No key set" }}
                    </div>
                </div>

                <div class="form-group">
                    <label for="model">"Model"</label>
                    <input
                        type="text"
                        id="model"
                        prop:value=move || settings.with(|s| s.model.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev).trim().to_string();
                            if !value.is_empty() {
                                settings.update(|s| s.model = value);
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}
