//! Herb Scan Common Library
//!
//! CLIとWeb(WASM)で共有される型と解析パイプライン

pub mod types;
pub mod error;
pub mod intake;
pub mod capture;
pub mod prompts;
pub mod schema;
pub mod request;
pub mod parser;
pub mod state;
pub mod view;
pub mod share;

pub use types::{AnalysisResult, AyurvedicProperties, Dosage, PreparationMethod};
pub use error::{Error, Result};
pub use intake::{EncodedImage, IntakePolicy, mime_for_extension};
pub use capture::{CameraBackend, CameraSession, CameraStream, CaptureErrorKind, CaptureState, StreamConstraints};
pub use prompts::{ANALYSIS_PROMPT, LOADING_STAGES};
pub use schema::response_schema;
pub use request::{AnalysisSettings, GeminiRequest, GeminiResponse, build_analysis_request, endpoint_url};
pub use parser::{extract_json, interpret, parse_analysis_response};
pub use state::{AppState, Command, Msg, Phase, ResultOutcome};
pub use view::{SafetyLevel, render_text};
pub use share::share_text;
