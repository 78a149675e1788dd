mod orchestrator;

pub use orchestrator::ColorAnalysisOrchestrator;
