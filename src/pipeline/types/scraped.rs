use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One category's worth of raw color tokens as delivered by the scraping
/// collaborator.
///
/// Most categories arrive as a flat token list; feedback and shadow/overlay
/// categories arrive as named sub-collections. Modeled as a tagged variant
/// instead of inspecting shapes at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryTokens {
    Flat(Vec<String>),
    Nested(IndexMap<String, Vec<String>>),
}

impl CategoryTokens {
    pub fn token_count(&self) -> usize {
        match self {
            CategoryTokens::Flat(tokens) => tokens.len(),
            CategoryTokens::Nested(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    fn extend_into(&self, out: &mut Vec<String>) {
        match self {
            CategoryTokens::Flat(tokens) => out.extend(tokens.iter().cloned()),
            CategoryTokens::Nested(groups) => {
                for tokens in groups.values() {
                    out.extend(tokens.iter().cloned());
                }
            }
        }
    }
}

/// A scraped snapshot: semantic category name (accent, background, border,
/// button, text, gradient, notification, ...) mapped to its raw tokens.
///
/// Category names are informational only; downstream analysis never branches
/// on them. Insertion order is preserved so flattening the same snapshot is
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedColors {
    #[serde(flatten)]
    pub categories: IndexMap<String, CategoryTokens>,
}

impl ScrapedColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, tokens: CategoryTokens) {
        self.categories.insert(category.into(), tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|c| c.token_count() == 0)
    }

    /// Flatten every category into a single token list, preserving every
    /// occurrence (duplicates included) in category order.
    pub fn flatten(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for category in self.categories.values() {
            category.extend_into(&mut tokens);
        }
        tokens
    }
}
