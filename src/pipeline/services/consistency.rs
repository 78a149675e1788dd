use indexmap::IndexMap;

use crate::pipeline::types::Rgb;

/// Dominance tier over raw color occurrences: how much of the page the few
/// most frequent colors account for.
///
/// Thresholds are strict, so a combined share of exactly 0.75 lands in the
/// 7 tier rather than 10. Returns 0 when there are no occurrences at all.
pub fn evaluate_consistency(occurrences: &[Rgb], dominant_count: usize) -> u8 {
    if occurrences.is_empty() {
        return 0;
    }

    let mut counts: IndexMap<Rgb, usize> = IndexMap::new();
    for color in occurrences {
        *counts.entry(*color).or_insert(0) += 1;
    }

    let mut frequencies: Vec<usize> = counts.values().copied().collect();
    frequencies.sort_unstable_by(|a, b| b.cmp(a));
    let dominant: usize = frequencies.iter().take(dominant_count).sum();
    let share = dominant as f64 / occurrences.len() as f64;

    if share > 0.75 {
        10
    } else if share > 0.50 {
        7
    } else if share > 0.25 {
        4
    } else {
        1
    }
}
