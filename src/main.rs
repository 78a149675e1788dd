use chroma_audit::{
    AnalysisConfig, AnalysisOutcome, AppError, ColorAnalysisOrchestrator, ScrapedColors,
};
use tracing::{error, Level};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| AppError::Usage("expected a path to a scraped-colors JSON file".into()))?;
    let raw = std::fs::read_to_string(&path)?;
    let scraped: ScrapedColors = serde_json::from_str(&raw)?;

    let orchestrator = ColorAnalysisOrchestrator::new(AnalysisConfig::default())?;
    match orchestrator.analyze(&scraped).await {
        AnalysisOutcome::Analyzed(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        AnalysisOutcome::EmptyInput => {
            error!("no usable colors in {path}");
            Ok(())
        }
        AnalysisOutcome::InternalError(err) => Err(err.into()),
    }
}
