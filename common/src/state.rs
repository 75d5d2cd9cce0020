//! 画面状態（Presentation Controller）
//!
//! Splash → Idle → Analyzing → (Result | Error)、Result/Error → Idle。
//! 状態の変更はすべて `AppState::update` を通し、必要な副作用は `Command` として返す。
//! 実際の通信・タイマーは呼び出し側（Web/CLI）が担当する。

use crate::intake::EncodedImage;
use crate::prompts::LOADING_STAGES;
use crate::types::AnalysisResult;

/// スプラッシュ表示時間（ミリ秒）
pub const SPLASH_DURATION_MS: u32 = 2_500;

/// ローディング文言の切り替え間隔（ミリ秒）
pub const LOADING_STAGE_INTERVAL_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Splash,
    Idle,
    Analyzing,
    Result,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Splash => "splash",
            Phase::Idle => "idle",
            Phase::Analyzing => "analyzing",
            Phase::Result => "result",
            Phase::Error => "error",
        }
    }
}

/// 状態を変えるメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SplashElapsed,
    ImageReady(EncodedImage),
    IntakeRejected(String),
    AnalysisSucceeded(AnalysisResult),
    AnalysisFailed(String),
    LoadingTick,
    Retry,
    Reset,
}

/// 呼び出し側が実行する副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(EncodedImage),
}

/// 結果表示の分岐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome {
    Identified,
    Uncertain,
}

impl From<&AnalysisResult> for ResultOutcome {
    fn from(result: &AnalysisResult) -> Self {
        if result.identified {
            ResultOutcome::Identified
        } else {
            ResultOutcome::Uncertain
        }
    }
}

/// アプリケーションの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    phase: Phase,
    image: Option<EncodedImage>,
    result: Option<AnalysisResult>,
    error: Option<String>,
    notice: Option<String>,
    loading_stage: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// スプラッシュを飛ばして待機状態から始める（CLI用）
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 取り込み拒否など、待機画面に出す一時メッセージ
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn outcome(&self) -> Option<ResultOutcome> {
        self.result.as_ref().map(ResultOutcome::from)
    }

    pub fn loading_stage(&self) -> usize {
        self.loading_stage
    }

    pub fn loading_message(&self) -> &'static str {
        LOADING_STAGES[self.loading_stage % LOADING_STAGES.len()]
    }

    /// 新しい画像を受け付けられるか（待機中のみ）
    pub fn accepts_image(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn update(&mut self, msg: Msg) -> Option<Command> {
        match (self.phase, msg) {
            (Phase::Splash, Msg::SplashElapsed) => {
                self.phase = Phase::Idle;
                None
            }
            (Phase::Splash, _) => None,

            (_, Msg::ImageReady(image)) if self.accepts_image() => {
                self.result = None;
                self.error = None;
                self.notice = None;
                self.loading_stage = 0;
                self.image = Some(image.clone());
                self.phase = Phase::Analyzing;
                Some(Command::Analyze(image))
            }
            (phase, Msg::ImageReady(_)) => {
                tracing::debug!(phase = phase.as_str(), "image submitted outside idle; ignored");
                None
            }

            (Phase::Analyzing, Msg::IntakeRejected(_)) => None,
            (_, Msg::IntakeRejected(message)) => {
                self.notice = Some(message);
                None
            }

            (Phase::Analyzing, Msg::LoadingTick) => {
                self.loading_stage = (self.loading_stage + 1) % LOADING_STAGES.len();
                None
            }

            (Phase::Analyzing, Msg::AnalysisSucceeded(result)) => {
                self.result = Some(result);
                self.phase = Phase::Result;
                None
            }
            (Phase::Analyzing, Msg::AnalysisFailed(message)) => {
                self.error = Some(message);
                self.phase = Phase::Error;
                None
            }

            (Phase::Result | Phase::Error | Phase::Idle, Msg::Retry | Msg::Reset) => {
                *self = Self::idle();
                None
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        EncodedImage::from_data_url("data:image/jpeg;base64,/9j/AAAA")
    }

    fn neem() -> AnalysisResult {
        AnalysisResult {
            identified: true,
            common_name: Some("Neem".into()),
            confidence_score: 92,
            safety_profile_score: Some(8),
            ..Default::default()
        }
    }

    fn analyzing() -> AppState {
        let mut state = AppState::idle();
        state.update(Msg::ImageReady(image()));
        state
    }

    #[test]
    fn test_splash_only_leaves_on_elapsed() {
        let mut state = AppState::new();
        assert_eq!(state.phase(), Phase::Splash);

        assert_eq!(state.update(Msg::ImageReady(image())), None);
        state.update(Msg::Reset);
        assert_eq!(state.phase(), Phase::Splash);

        state.update(Msg::SplashElapsed);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_image_ready_emits_one_analyze_command() {
        let mut state = AppState::idle();
        let command = state.update(Msg::ImageReady(image()));

        assert_eq!(command, Some(Command::Analyze(image())));
        assert_eq!(state.phase(), Phase::Analyzing);
        assert_eq!(state.image(), Some(&image()));
    }

    #[test]
    fn test_second_image_while_analyzing_is_ignored() {
        let mut state = analyzing();
        let other = EncodedImage::from_data_url("data:image/png;base64,iVBO");

        assert_eq!(state.update(Msg::ImageReady(other)), None);
        assert_eq!(state.image(), Some(&image()));
        assert_eq!(state.phase(), Phase::Analyzing);
    }

    #[test]
    fn test_image_outside_idle_is_ignored() {
        let mut state = analyzing();
        state.update(Msg::AnalysisSucceeded(neem()));
        assert_eq!(state.update(Msg::ImageReady(image())), None);
        assert_eq!(state.phase(), Phase::Result);
        assert!(state.result().is_some());

        let mut state = analyzing();
        state.update(Msg::AnalysisFailed("boom".into()));
        assert_eq!(state.update(Msg::ImageReady(image())), None);
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_reset_then_new_image_starts_clean() {
        let mut state = analyzing();
        state.update(Msg::AnalysisFailed("boom".into()));
        state.update(Msg::Reset);

        assert!(state.update(Msg::ImageReady(image())).is_some());
        assert_eq!(state.error(), None);
        assert_eq!(state.result(), None);
        assert_eq!(state.phase(), Phase::Analyzing);
    }

    #[test]
    fn test_loading_stage_cycles_and_restarts() {
        let mut state = analyzing();
        assert_eq!(state.loading_stage(), 0);

        for _ in 0..LOADING_STAGES.len() + 1 {
            state.update(Msg::LoadingTick);
        }
        assert_eq!(state.loading_stage(), 1);
        assert_eq!(state.loading_message(), LOADING_STAGES[1]);

        state.update(Msg::AnalysisSucceeded(neem()));
        state.update(Msg::LoadingTick);
        assert_eq!(state.loading_stage(), 1);

        state.update(Msg::Reset);
        state.update(Msg::ImageReady(image()));
        assert_eq!(state.loading_stage(), 0);
    }

    #[test]
    fn test_success_identified() {
        let mut state = analyzing();
        state.update(Msg::AnalysisSucceeded(neem()));

        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(state.outcome(), Some(ResultOutcome::Identified));
        assert_eq!(state.result().and_then(|r| r.common_name.as_deref()), Some("Neem"));
    }

    #[test]
    fn test_not_identified_is_uncertain_regardless_of_fields() {
        let mut state = analyzing();
        let result = AnalysisResult {
            identified: false,
            common_name: Some("Neem".into()),
            medicinal_uses: vec!["Skin".into()],
            confidence_score: 95,
            ..Default::default()
        };
        state.update(Msg::AnalysisSucceeded(result));

        assert_eq!(state.outcome(), Some(ResultOutcome::Uncertain));
    }

    #[test]
    fn test_failure_then_retry_returns_to_idle() {
        let mut state = analyzing();
        state.update(Msg::AnalysisFailed("Analysis failed.".into()));
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.error(), Some("Analysis failed."));

        assert_eq!(state.update(Msg::Retry), None);
        assert_eq!(state, AppState::idle());
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut state = analyzing();
        state.update(Msg::AnalysisSucceeded(neem()));
        state.update(Msg::Reset);

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.image(), None);
        assert_eq!(state.result(), None);
    }

    #[test]
    fn test_late_completion_is_ignored() {
        let mut state = AppState::idle();
        state.update(Msg::AnalysisSucceeded(neem()));
        state.update(Msg::AnalysisFailed("late".into()));
        assert_eq!(state, AppState::idle());
    }

    #[test]
    fn test_intake_rejection_sets_notice_without_command() {
        let mut state = AppState::idle();
        let command = state.update(Msg::IntakeRejected("Please upload a JPEG, PNG or WebP image.".into()));

        assert_eq!(command, None);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.notice().is_some());

        state.update(Msg::ImageReady(image()));
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_accepts_image() {
        assert!(!AppState::new().accepts_image());
        assert!(AppState::idle().accepts_image());
        assert!(!analyzing().accepts_image());

        let mut done = analyzing();
        done.update(Msg::AnalysisSucceeded(neem()));
        assert!(!done.accepts_image());
    }
}
