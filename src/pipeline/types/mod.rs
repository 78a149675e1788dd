mod analysis;
mod color;
mod scraped;

pub use analysis::{AnalysisOutcome, AnalysisResult, NO_TRAIT};
pub use color::{Hsl, Rgb};
pub use scraped::{CategoryTokens, ScrapedColors};
