//! メインアプリケーションコンポーネント
//!
//! 画面状態は herb_scan_common::AppState ひとつで持ち、
//! 変更はすべて dispatch(Msg) を経由する。

use crate::api::gemini;
use crate::components::{
    camera_view::CameraView,
    error_view::ErrorView,
    header::Header,
    loading_indicator::LoadingIndicator,
    result_view::ResultView,
    settings_panel::SettingsPanel,
    splash::Splash,
    uncertain_view::UncertainView,
    upload_area::UploadArea,
};
use gloo::timers::callback::{Interval, Timeout};
use herb_scan_common::state::{LOADING_STAGE_INTERVAL_MS, SPLASH_DURATION_MS};
use herb_scan_common::{
    AnalysisSettings, AppState, Command, EncodedImage, IntakePolicy, Msg, Phase, ResultOutcome,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 初期設定（ビルド時に GEMINI_API_KEY があれば使う）
fn initial_settings() -> AnalysisSettings {
    AnalysisSettings {
        api_key: option_env!("GEMINI_API_KEY")
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from),
        ..AnalysisSettings::default()
    }
}

const SETTINGS_HINT: &str = "Open Settings to enter your key.";

/// 待機中に届いた画像をメッセージにする
///
/// APIキーが無ければ解析に入らず、設定を促す通知にする
fn image_message(settings: &AnalysisSettings, image: EncodedImage) -> Msg {
    match settings.require_api_key() {
        Ok(_) => Msg::ImageReady(image),
        Err(e) => Msg::IntakeRejected(format!("{} {}", e.user_message(), SETTINGS_HINT)),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(AppState::new());
    let settings = RwSignal::new(initial_settings());
    let show_settings = RwSignal::new(false);

    let dispatch = Callback::new(move |msg: Msg| {
        let command = state.try_update(|s| s.update(msg)).flatten();

        if let Some(Command::Analyze(image)) = command {
            let settings = settings.get_untracked();
            spawn_local(async move {
                let msg = match gemini::analyze(&settings, &image).await {
                    Ok(result) => Msg::AnalysisSucceeded(result),
                    Err(e) => {
                        gloo::console::error!("analysis failed:", e.to_string());
                        Msg::AnalysisFailed(e.user_message())
                    }
                };
                state.update(|s| {
                    s.update(msg);
                });
            });
        }
    });

    // スプラッシュは固定時間で抜ける
    Timeout::new(SPLASH_DURATION_MS, move || dispatch.run(Msg::SplashElapsed)).forget();

    // 解析中だけローディング文言を進める。App と一緒に破棄される
    let _ticker = StoredValue::new_local(Interval::new(LOADING_STAGE_INTERVAL_MS, move || {
        if state.with_untracked(|s| s.phase() == Phase::Analyzing) {
            dispatch.run(Msg::LoadingTick);
        }
    }));

    let phase = Memo::new(move |_| state.with(|s| s.phase()));
    let notice = move || state.with(|s| s.notice().map(str::to_string));
    let preview = move || state.with_untracked(|s| s.image().map(EncodedImage::to_data_url));

    let on_image = Callback::new(move |image: EncodedImage| {
        if !state.with_untracked(AppState::accepts_image) {
            return;
        }
        let msg = settings.with_untracked(|s| image_message(s, image));
        if matches!(msg, Msg::IntakeRejected(_)) {
            show_settings.set(true);
        }
        dispatch.run(msg);
    });
    let on_reject = Callback::new(move |message: String| dispatch.run(Msg::IntakeRejected(message)));
    let on_reset = Callback::new(move |_: ()| dispatch.run(Msg::Reset));
    let on_retry = Callback::new(move |_: ()| dispatch.run(Msg::Retry));

    let screen = move || match phase.get() {
        Phase::Splash => view! { <Splash /> }.into_any(),

        Phase::Idle => view! {
            <div class="capture-panel">
                <UploadArea policy=IntakePolicy::default() on_image=on_image on_reject=on_reject />
                <CameraView on_image=on_image />
            </div>
        }
        .into_any(),

        Phase::Analyzing => view! {
            <LoadingIndicator
                message=Signal::derive(move || state.with(|s| s.loading_message()))
                preview=Signal::derive(preview)
            />
        }
        .into_any(),

        Phase::Result => {
            let result = state.with_untracked(|s| s.result().cloned());
            let outcome = state.with_untracked(|s| s.outcome());
            match (result, outcome) {
                (Some(result), Some(ResultOutcome::Identified)) => view! {
                    <ResultView result=result preview=preview() on_reset=on_reset />
                }
                .into_any(),
                (Some(result), _) => view! {
                    <UncertainView result=result preview=preview() on_reset=on_reset />
                }
                .into_any(),
                (None, _) => ().into_any(),
            }
        }

        Phase::Error => {
            let message = state.with_untracked(|s| s.error().unwrap_or_default().to_string());
            view! { <ErrorView message=message on_retry=on_retry /> }.into_any()
        }
    };

    view! {
        <div class="container">
            <Show when=move || phase.get() != Phase::Splash>
                <Header show_settings=show_settings />
                <Show when=move || show_settings.get()>
                    <SettingsPanel settings=settings />
                </Show>
            </Show>

            {move || notice().map(|text| view! { <p class="notice">{text}</p> })}

            <main>{screen}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_settings_use_defaults() {
        let settings = initial_settings();
        let defaults = AnalysisSettings::default();
        assert_eq!(settings.model, defaults.model);
        assert_eq!(settings.timeout_seconds, defaults.timeout_seconds);
        assert!(settings.api_key.as_deref().map_or(true, |k| !k.is_empty()));
    }

    fn image() -> EncodedImage {
        EncodedImage::from_data_url("data:image/jpeg;base64,/9j/4AAQ")
    }

    #[test]
    fn test_missing_key_never_starts_analysis() {
        let settings = AnalysisSettings {
            api_key: None,
            ..AnalysisSettings::default()
        };
        let mut state = AppState::idle();

        let command = state.update(image_message(&settings, image()));

        assert_eq!(command, None);
        assert_eq!(state.phase(), Phase::Idle);
        let notice = state.notice().unwrap_or_default();
        assert!(notice.starts_with("Configuration error"));
        assert!(notice.contains("Settings"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let settings = AnalysisSettings::with_api_key("   ");
        assert!(matches!(image_message(&settings, image()), Msg::IntakeRejected(_)));
    }

    #[test]
    fn test_key_present_starts_analysis() {
        let settings = AnalysisSettings::with_api_key("test-key");
        let mut state = AppState::idle();

        let command = state.update(image_message(&settings, image()));

        assert_eq!(command, Some(Command::Analyze(image())));
        assert_eq!(state.phase(), Phase::Analyzing);
    }
}
