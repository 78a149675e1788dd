pub mod orchestration;
pub mod services;
pub mod types;

pub use orchestration::ColorAnalysisOrchestrator;
pub use types::{AnalysisOutcome, AnalysisResult, Rgb, ScrapedColors};
