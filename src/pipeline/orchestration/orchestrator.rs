use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::error::{AppError, PipelineError};
use crate::pipeline::services::{
    consistency, contrast, harmony, normalization, palette, trait_classifier,
};
use crate::pipeline::types::{AnalysisOutcome, AnalysisResult, Rgb, ScrapedColors, NO_TRAIT};

/// Sequences the color pipeline: flatten the scraped categories, validate
/// and normalize the tokens, fan the five independent analyzers out over
/// immutable snapshots, and assemble the result record.
pub struct ColorAnalysisOrchestrator {
    config: AnalysisConfig,
}

impl ColorAnalysisOrchestrator {
    pub fn new(config: AnalysisConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Config)?;
        Ok(Self { config })
    }

    /// Run one full analysis over a scraped snapshot.
    ///
    /// Nothing escapes this boundary: empty or fully-invalid input becomes
    /// `EmptyInput`, and a clustering failure or a panicked analyzer task
    /// becomes `InternalError` with the cause logged under the analysis id.
    pub async fn analyze(&self, scraped: &ScrapedColors) -> AnalysisOutcome {
        let analysis_id = Uuid::new_v4();
        let started = Instant::now();

        let tokens = scraped.flatten();
        if tokens.is_empty() {
            warn!("{analysis_id}: no color tokens in scraped data");
            return AnalysisOutcome::EmptyInput;
        }
        debug!("{analysis_id}: gathered {} raw tokens", tokens.len());

        let normalized = normalization::normalize_tokens(&tokens);
        if normalized.is_empty() {
            warn!("{analysis_id}: no tokens survived validation");
            return AnalysisOutcome::EmptyInput;
        }

        let color_list: Vec<Rgb> = normalized.unique.iter().copied().collect();
        let unique = Arc::new(normalized.unique);
        let occurrences = Arc::new(normalized.occurrences);

        // Each analyzer reads its own shared snapshot and writes only its
        // own result slot, so they run as independent blocking tasks.
        let contrast_task = tokio::task::spawn_blocking({
            let unique = Arc::clone(&unique);
            move || contrast::average_contrast_score(&unique)
        });
        let harmony_task = tokio::task::spawn_blocking({
            let unique = Arc::clone(&unique);
            move || harmony::evaluate_harmony(&unique)
        });
        let consistency_task = tokio::task::spawn_blocking({
            let occurrences = Arc::clone(&occurrences);
            let dominant_count = self.config.dominant_color_count;
            move || consistency::evaluate_consistency(&occurrences, dominant_count)
        });
        let trait_task = tokio::task::spawn_blocking({
            let occurrences = Arc::clone(&occurrences);
            move || trait_classifier::classify_colors(&occurrences)
        });
        let palette_task = tokio::task::spawn_blocking({
            let unique = Arc::clone(&unique);
            let config = self.config.clone();
            move || palette::synthesize_palette(&unique, &config)
        });

        let (contrast, harmony, consistency, best_trait, palette) = tokio::join!(
            contrast_task,
            harmony_task,
            consistency_task,
            trait_task,
            palette_task
        );

        let contrast = match recover(analysis_id, "contrast", contrast) {
            Ok(score) => score,
            Err(err) => return AnalysisOutcome::InternalError(err),
        };
        let harmony = match recover(analysis_id, "harmony", harmony) {
            Ok(score) => score,
            Err(err) => return AnalysisOutcome::InternalError(err),
        };
        let consistency = match recover(analysis_id, "consistency", consistency) {
            Ok(tier) => tier,
            Err(err) => return AnalysisOutcome::InternalError(err),
        };
        let best_trait = match recover(analysis_id, "trait", best_trait) {
            Ok(label) => label,
            Err(err) => return AnalysisOutcome::InternalError(err),
        };
        let palette = match recover(analysis_id, "palette", palette) {
            Ok(Ok(palette)) => palette,
            Ok(Err(err)) => {
                error!("{analysis_id}: palette synthesis failed: {err}");
                return AnalysisOutcome::InternalError(err.into());
            }
            Err(err) => return AnalysisOutcome::InternalError(err),
        };

        let result = AnalysisResult {
            id: analysis_id,
            generated_at: Utc::now(),
            contrast,
            harmony,
            consistency,
            best_trait: best_trait.unwrap_or(NO_TRAIT).to_string(),
            normalized_colors: color_list,
            color_palette: palette,
        };

        info!(
            "{analysis_id}: analysis completed in {}us: contrast {:.2}, harmony {:.2}, \
             consistency {}, trait {:?}, {} palette colors",
            started.elapsed().as_micros(),
            result.contrast,
            result.harmony,
            result.consistency,
            result.best_trait,
            result.color_palette.len()
        );
        AnalysisOutcome::Analyzed(result)
    }
}

fn recover<T>(
    analysis_id: Uuid,
    stage: &str,
    joined: Result<T, JoinError>,
) -> Result<T, PipelineError> {
    joined.map_err(|err| {
        error!("{analysis_id}: {stage} analyzer task failed: {err}");
        PipelineError::AnalyzerTask(format!("{stage}: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::CategoryTokens;

    fn orchestrator() -> ColorAnalysisOrchestrator {
        ColorAnalysisOrchestrator::new(AnalysisConfig::default()).unwrap()
    }

    fn snapshot(tokens: &[&str]) -> ScrapedColors {
        let mut scraped = ScrapedColors::new();
        scraped.insert(
            "background",
            CategoryTokens::Flat(tokens.iter().map(|s| s.to_string()).collect()),
        );
        scraped
    }

    #[tokio::test]
    async fn black_and_white_maxes_out_contrast() {
        let outcome = orchestrator().analyze(&snapshot(&["#ffffff", "#000000"])).await;
        let result = outcome.into_result().unwrap();
        assert_eq!(result.contrast, 10.0);
        assert_eq!(result.normalized_colors.len(), 2);
        assert_eq!(result.color_palette.len(), 2);
    }

    #[tokio::test]
    async fn empty_snapshot_short_circuits() {
        let outcome = orchestrator().analyze(&ScrapedColors::new()).await;
        assert!(matches!(outcome, AnalysisOutcome::EmptyInput));
    }

    #[tokio::test]
    async fn invalid_only_tokens_short_circuit() {
        let outcome = orchestrator().analyze(&snapshot(&["notacolor", "???"])).await;
        assert!(matches!(outcome, AnalysisOutcome::EmptyInput));
    }

    #[tokio::test]
    async fn rgb_primaries_are_triadic() {
        let outcome = orchestrator()
            .analyze(&snapshot(&["#ff0000", "#00ff00", "#0000ff"]))
            .await;
        let result = outcome.into_result().unwrap();
        assert_eq!(result.harmony, 7.0);
        assert_eq!(result.color_palette.len(), 3);
    }

    #[tokio::test]
    async fn dominance_counts_raw_occurrences_not_distinct_colors() {
        let outcome = orchestrator()
            .analyze(&snapshot(&["#ff0000", "#ff0000", "#ff0000", "#00ff00"]))
            .await;
        let result = outcome.into_result().unwrap();
        // Two distinct colors, so the top colors cover every occurrence.
        assert_eq!(result.consistency, 10);
        assert_eq!(result.normalized_colors.len(), 2);
    }

    #[tokio::test]
    async fn nested_categories_are_flattened() {
        let raw = r##"{
            "text": ["#333333"],
            "feedback": {
                "error": ["rgb(200,0,0)"],
                "success": ["hsl(120,100%,25%)"]
            }
        }"##;
        let scraped: ScrapedColors = serde_json::from_str(raw).unwrap();
        let result = orchestrator().analyze(&scraped).await.into_result().unwrap();
        assert_eq!(result.normalized_colors.len(), 3);
        assert!((1..=10).contains(&result.consistency));
    }

    #[tokio::test]
    async fn identical_snapshots_analyze_identically() {
        let scraped = snapshot(&["#123456", "#abcdef", "#ff8800", "#00ff88", "#884400", "#abc"]);
        let first = orchestrator().analyze(&scraped).await.into_result().unwrap();
        let second = orchestrator().analyze(&scraped).await.into_result().unwrap();
        assert_eq!(first.color_palette, second.color_palette);
        assert_eq!(first.contrast, second.contrast);
        assert_eq!(first.harmony, second.harmony);
        assert_eq!(first.best_trait, second.best_trait);
    }

    #[tokio::test]
    async fn every_result_carries_a_trait_label() {
        let result = orchestrator()
            .analyze(&snapshot(&["#ffffff", "#000000"]))
            .await
            .into_result()
            .unwrap();
        assert!(!result.best_trait.is_empty());
    }
}
