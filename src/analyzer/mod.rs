mod gemini;

pub use gemini::GeminiClient;
pub use herb_scan_common::AnalysisResult;
