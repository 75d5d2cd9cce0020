//! 同定できなかった場合の表示
//!
//! 名前や用途は出さず、信頼度と撮り直しの案内だけを出す

use herb_scan_common::view::confidence_percent;
use herb_scan_common::AnalysisResult;
use leptos::prelude::*;

#[component]
pub fn UncertainView(
    result: AnalysisResult,
    preview: Option<String>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let confidence = confidence_percent(&result);

    view! {
        <div class="result-view uncertain">
            {preview.map(|src| view! { <img class="preview-image" src=src alt="Analyzed photo" /> })}
            <div class="uncertain-icon">"🔍"</div>
            <h2>"Identification Uncertain"</h2>
            <p>"We couldn't confidently identify a medicinal plant, millet or pulse in this photo."</p>
            <p class="text-muted">{format!("Confidence: {}%", confidence)}</p>
            <ul class="tips">
                <li>"Photograph a single leaf, grain or seed"</li>
                <li>"Use natural light and avoid shadows"</li>
                <li>"Fill the frame and keep the camera steady"</li>
            </ul>
            <button class="btn btn-primary" on:click=move |_| on_reset.run(())>"Try another photo"</button>
        </div>
    }
}
