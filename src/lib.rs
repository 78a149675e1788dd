pub mod config;
pub mod error;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use error::{AppError, ClusteringError, PipelineError, TokenError};

pub use pipeline::orchestration::ColorAnalysisOrchestrator;
pub use pipeline::types::{
    AnalysisOutcome, AnalysisResult, CategoryTokens, Hsl, Rgb, ScrapedColors,
};
