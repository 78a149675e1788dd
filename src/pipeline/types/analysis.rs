use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Rgb;
use crate::error::PipelineError;

/// Label surfaced when the trait classifier had no colors to score.
pub const NO_TRAIT: &str = "No Trait";

/// The assembled aesthetic assessment for one scraped snapshot.
///
/// Built once per pipeline invocation and immutable afterwards; the
/// narrative-generation and persistence collaborators consume it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Mean pairwise accessibility contrast, 0-10.
    pub contrast: f64,
    /// Weighted hue-harmony score, 0-10.
    pub harmony: f64,
    /// Dominance tier: 0 (undefined), 1, 4, 7 or 10.
    pub consistency: u8,
    /// Best-matching aesthetic trait label, or [`NO_TRAIT`].
    pub best_trait: String,
    /// The deduplicated color set, in first-appearance order.
    pub normalized_colors: Vec<Rgb>,
    /// Representative palette as lowercase `#rrggbb` strings.
    pub color_palette: Vec<String>,
}

/// Outcome of one pipeline invocation.
///
/// A discriminated type instead of a single "no result" sentinel, so callers
/// can tell "nothing to analyze" apart from "something broke".
#[derive(Debug)]
pub enum AnalysisOutcome {
    Analyzed(AnalysisResult),
    /// No raw tokens were supplied, or none survived validation.
    EmptyInput,
    /// The pipeline itself failed; the cause has already been logged.
    InternalError(PipelineError),
}

impl AnalysisOutcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, AnalysisOutcome::Analyzed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Analyzed(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            AnalysisOutcome::Analyzed(result) => Some(result),
            _ => None,
        }
    }
}
