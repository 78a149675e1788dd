use thiserror::Error;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pipeline Error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Usage: {0}")]
    Usage(String),
}

/// Per-token failures. Always recovered by dropping the token; never
/// propagated past the normalizer.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The token matches no recognized color grammar.
    #[error("unrecognized color format: {0:?}")]
    UnrecognizedFormat(String),
    /// A recognized-format token carries a component that fails to parse.
    #[error("invalid component {component:?} in {token:?}")]
    InvalidComponent { token: String, component: String },
    /// A recognized-format token carries a value outside its legal range.
    #[error("value {value} out of range in {token:?}")]
    OutOfRange { token: String, value: f64 },
}

/// Palette synthesis failures. The one analyzer fault that is fatal to the
/// whole invocation.
#[derive(Error, Debug)]
pub enum ClusteringError {
    #[error("cannot cluster an empty color set")]
    EmptyColorSet,
    #[error("centroid computation produced a non-finite channel")]
    NonFiniteCentroid,
}

/// Faults that abort a pipeline invocation. Callers only ever see these
/// wrapped in the internal-error outcome; the orchestrator never panics or
/// returns an error directly.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Clustering Error: {0}")]
    Clustering(#[from] ClusteringError),
    #[error("analyzer task failed: {0}")]
    AnalyzerTask(String),
}
