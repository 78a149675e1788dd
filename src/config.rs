/// Tunable parameters for the color analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Upper bound on the synthesized palette size; the effective cluster
    /// count is `min(palette_size, distinct colors)`.
    pub palette_size: usize,
    /// Iteration cap for the clustering loop.
    pub max_cluster_iterations: usize,
    /// Seed for clustering initialization. Fixed so identical input yields
    /// an identical palette across runs.
    pub cluster_seed: u64,
    /// How many of the most frequent colors count toward dominance.
    pub dominant_color_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            palette_size: 5,
            max_cluster_iterations: 100,
            cluster_seed: 0,
            dominant_color_count: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.palette_size == 0 {
            return Err("palette_size must be at least 1".to_string());
        }
        if self.max_cluster_iterations == 0 {
            return Err("max_cluster_iterations must be at least 1".to_string());
        }
        if self.dominant_color_count == 0 {
            return Err("dominant_color_count must be at least 1".to_string());
        }
        Ok(())
    }
}
