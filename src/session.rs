//! CLI用の解析セッション
//!
//! 画面状態（AppState）を Web 版と同じ遷移で動かし、
//! 解析中はスピナーでローディング文言を切り替える。

use crate::analyzer::GeminiClient;
use herb_scan_common::state::LOADING_STAGE_INTERVAL_MS;
use herb_scan_common::{AppState, Command, EncodedImage, Msg, Phase};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ScanSession {
    client: GeminiClient,
    state: AppState,
    show_progress: bool,
}

impl ScanSession {
    pub fn new(client: GeminiClient, show_progress: bool) -> Self {
        Self {
            client,
            state: AppState::idle(),
            show_progress,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 画像を投入して解析が終わるまで待つ
    ///
    /// 待機中以外では何もせず現在のフェーズを返す。
    /// APIキーが無ければ解析に入らず、待機のまま通知を残す
    pub async fn submit(&mut self, image: EncodedImage) -> Phase {
        if !self.state.accepts_image() {
            return self.state.phase();
        }
        if let Err(e) = self.client.settings().require_api_key() {
            self.state.update(Msg::IntakeRejected(e.user_message()));
            return self.state.phase();
        }

        let Some(Command::Analyze(image)) = self.state.update(Msg::ImageReady(image)) else {
            return self.state.phase();
        };

        let spinner = self.spinner();
        spinner.set_message(self.state.loading_message());

        let analysis = self.client.analyze(&image);
        tokio::pin!(analysis);

        let mut ticker = tokio::time::interval(Duration::from_millis(u64::from(LOADING_STAGE_INTERVAL_MS)));
        ticker.tick().await;

        let outcome = loop {
            tokio::select! {
                result = &mut analysis => break result,
                _ = ticker.tick() => {
                    self.state.update(Msg::LoadingTick);
                    spinner.set_message(self.state.loading_message());
                }
            }
        };

        spinner.finish_and_clear();

        match outcome {
            Ok(result) => {
                self.state.update(Msg::AnalysisSucceeded(result));
            }
            Err(e) => {
                tracing::error!(error = %e, "analysis failed");
                self.state.update(Msg::AnalysisFailed(e.user_message()));
            }
        }

        self.state.phase()
    }

    /// 結果/エラーを破棄して待機状態に戻る
    pub fn reset(&mut self) {
        self.state.update(Msg::Reset);
    }

    pub fn retry(&mut self) {
        self.state.update(Msg::Retry);
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}
