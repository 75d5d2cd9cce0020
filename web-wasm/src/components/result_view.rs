//! 同定結果（アーユルヴェーダ・プロファイル）の表示

use crate::share::{share_result, ShareOutcome};
use gloo::timers::future::TimeoutFuture;
use herb_scan_common::view::{confidence_percent, safety_percent, text_or_placeholder, PLACEHOLDER};
use herb_scan_common::{AnalysisResult, SafetyLevel};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

const COPIED_NOTICE_MS: u32 = 2_000;

#[component]
pub fn ResultView(
    result: AnalysisResult,
    preview: Option<String>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let confidence = confidence_percent(&result);
    let level = SafetyLevel::from_score(result.safety_profile_score);
    let safety_width = safety_percent(result.safety_profile_score);
    let props = result.ayurvedic_properties.clone().unwrap_or_default();

    let (share_notice, set_share_notice) = signal(None::<&'static str>);
    let shared = StoredValue::new(result.clone());
    let on_share = move |_: MouseEvent| {
        let result = shared.get_value();
        spawn_local(async move {
            match share_result(&result).await {
                Ok(ShareOutcome::Copied) => {
                    set_share_notice.set(Some("Copied to clipboard"));
                    TimeoutFuture::new(COPIED_NOTICE_MS).await;
                    set_share_notice.set(None);
                }
                Ok(_) => {}
                Err(e) => {
                    gloo::console::error!("share failed:", e);
                    set_share_notice.set(Some("Sharing isn't available on this device"));
                }
            }
        });
    };

    view! {
        <div class="result-view">
            {preview.map(|src| view! { <img class="preview-image" src=src alt="Analyzed photo" /> })}

            <section class="result-header">
                <h2>{text_or_placeholder(result.display_name()).to_string()}</h2>
                <p class="botanical-name">
                    <em>{text_or_placeholder(result.botanical_name.as_deref()).to_string()}</em>
                </p>
                <p class="ayurvedic-name">
                    "Ayurvedic name: "{text_or_placeholder(result.ayurvedic_name.as_deref()).to_string()}
                </p>
                <p class="family">"Family: "{text_or_placeholder(result.family.as_deref()).to_string()}</p>
            </section>

            <Gauge label="Confidence" percent=confidence tone="confidence" caption=format!("{}%", confidence) />

            <p class="description">{text_or_placeholder(result.short_description.as_deref()).to_string()}</p>

            <section class="card">
                <h3>"Ayurvedic properties"</h3>
                <dl class="properties">
                    <dt>"Rasa"</dt><dd>{text_or_placeholder(props.rasa.as_deref()).to_string()}</dd>
                    <dt>"Virya"</dt><dd>{text_or_placeholder(props.virya.as_deref()).to_string()}</dd>
                    <dt>"Vipaka"</dt><dd>{text_or_placeholder(props.vipaka.as_deref()).to_string()}</dd>
                    <dt>"Dosha karma"</dt><dd>{text_or_placeholder(props.dosha_karma.as_deref()).to_string()}</dd>
                </dl>
            </section>

            <ListSection title="Medicinal uses" items=result.medicinal_uses.clone() />

            <section class="card">
                <h3>"Preparation methods"</h3>
                {if result.preparation_methods.is_empty() {
                    view! { <p class="text-muted">{PLACEHOLDER}</p> }.into_any()
                } else {
                    view! {
                        <ul>
                            {result.preparation_methods.iter().map(|m| view! {
                                <li><strong>{m.method_name.clone()}</strong>": "{m.instructions.clone()}</li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </section>

            <section class="card">
                <h3>"Dosage"</h3>
                {match result.dosage.clone() {
                    Some(d) => view! {
                        <dl class="dosage">
                            <dt>"Children"</dt><dd>{d.children}</dd>
                            <dt>"Adults"</dt><dd>{d.adults}</dd>
                            <dt>"Elderly"</dt><dd>{d.elderly}</dd>
                        </dl>
                    }.into_any(),
                    None => view! { <p class="text-muted">{PLACEHOLDER}</p> }.into_any(),
                }}
            </section>

            <section class=format!("card safety {}", level.css_class())>
                <h3>"Safety"</h3>
                <Gauge
                    label="Safety profile"
                    percent=safety_width
                    tone=level.css_class()
                    caption=safety_caption(result.safety_profile_score, level)
                />
                <ListSection title="Warnings" items=result.safety_warnings.clone() />
            </section>

            <div class="result-actions">
                <button class="btn btn-secondary" on:click=on_share>"Share"</button>
                <button class="btn btn-primary" on:click=move |_| on_reset.run(())>"Scan another"</button>
            </div>
            {move || share_notice.get().map(|text| view! { <p class="share-notice">{text}</p> })}
        </div>
    }
}

fn safety_caption(score: Option<u8>, level: SafetyLevel) -> String {
    match score {
        Some(score) => format!("{}/10 · {}", score, level.label()),
        None => level.label().to_string(),
    }
}

/// 横棒ゲージ
#[component]
fn Gauge(label: &'static str, percent: u8, tone: &'static str, caption: String) -> impl IntoView {
    view! {
        <div class=format!("gauge {}", tone)>
            <span class="gauge-label">{label}</span>
            <div class="gauge-track">
                <div class="gauge-fill" style=format!("width: {}%", percent) />
            </div>
            <span class="gauge-caption">{caption}</span>
        </div>
    }
}

#[component]
fn ListSection(title: &'static str, items: Vec<String>) -> impl IntoView {
    view! {
        <section class="card">
            <h3>{title}</h3>
            {if items.is_empty() {
                view! { <p class="text-muted">{PLACEHOLDER}</p> }.into_any()
            } else {
                view! {
                    <ul>{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
                }.into_any()
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_caption() {
        assert_eq!(safety_caption(Some(8), SafetyLevel::Safe), "8/10 · Generally safe");
        assert_eq!(safety_caption(None, SafetyLevel::Unknown), "Safety unknown");
    }
}
