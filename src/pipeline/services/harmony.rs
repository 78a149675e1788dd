use indexmap::IndexSet;

use super::round2;
use crate::pipeline::types::Rgb;

/// Hue-wheel relationship between a pair of colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyKind {
    Analogous,
    Complementary,
    SplitComplementary,
    Triadic,
    Neutral,
}

impl HarmonyKind {
    fn weight(self) -> f64 {
        match self {
            HarmonyKind::Complementary => 10.0,
            HarmonyKind::SplitComplementary => 9.0,
            HarmonyKind::Analogous => 8.0,
            HarmonyKind::Triadic => 7.0,
            HarmonyKind::Neutral => 1.0,
        }
    }
}

/// Shortest angular distance between two hues on the color wheel.
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs();
    d.min(360.0 - d)
}

/// Classify a hue distance into exactly one harmony category. All
/// comparisons are strict: boundary distances (exactly 30, 90, 150, ...)
/// fall through to Neutral.
pub fn classify_distance(distance: f64) -> HarmonyKind {
    if distance < 30.0 {
        HarmonyKind::Analogous
    } else if distance > 150.0 && distance < 210.0 {
        HarmonyKind::Complementary
    } else if (distance > 30.0 && distance < 90.0) || (distance > 270.0 && distance < 330.0) {
        HarmonyKind::SplitComplementary
    } else if (distance > 90.0 && distance < 150.0) || (distance > 210.0 && distance < 270.0) {
        HarmonyKind::Triadic
    } else {
        HarmonyKind::Neutral
    }
}

/// Weighted harmony score over all unordered hue pairs, rounded to two
/// decimals; 0 with fewer than two colors.
pub fn evaluate_harmony(colors: &IndexSet<Rgb>) -> f64 {
    let hues: Vec<f64> = colors.iter().map(|c| c.to_hsl().h).collect();
    if hues.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..hues.len() {
        for j in (i + 1)..hues.len() {
            let kind = classify_distance(hue_distance(hues[i], hues[j]));
            total += kind.weight();
            pairs += 1;
        }
    }
    round2(total / pairs as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(colors: &[Rgb]) -> IndexSet<Rgb> {
        colors.iter().copied().collect()
    }

    #[test]
    fn distance_wraps_around_the_wheel() {
        assert_eq!(hue_distance(350.0, 10.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
    }

    #[test]
    fn classification_boundaries_are_strict() {
        assert_eq!(classify_distance(29.9), HarmonyKind::Analogous);
        assert_eq!(classify_distance(30.0), HarmonyKind::Neutral);
        assert_eq!(classify_distance(45.0), HarmonyKind::SplitComplementary);
        assert_eq!(classify_distance(90.0), HarmonyKind::Neutral);
        assert_eq!(classify_distance(120.0), HarmonyKind::Triadic);
        assert_eq!(classify_distance(150.0), HarmonyKind::Neutral);
        assert_eq!(classify_distance(180.0), HarmonyKind::Complementary);
    }

    #[test]
    fn rgb_primaries_are_all_triadic() {
        // Pairwise hue distances are all 120 degrees.
        let colors = set(&[
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ]);
        assert_eq!(evaluate_harmony(&colors), 7.0);
    }

    #[test]
    fn complementary_pair_scores_the_maximum_weight() {
        let colors = set(&[Rgb::new(255, 0, 0), Rgb::new(0, 255, 255)]);
        assert_eq!(evaluate_harmony(&colors), 10.0);
    }

    #[test]
    fn near_neighbours_are_analogous() {
        let colors = set(&[Rgb::new(255, 0, 0), Rgb::new(255, 127, 0)]);
        assert_eq!(evaluate_harmony(&colors), 8.0);
    }

    #[test]
    fn fewer_than_two_colors_scores_zero() {
        assert_eq!(evaluate_harmony(&set(&[])), 0.0);
        assert_eq!(evaluate_harmony(&set(&[Rgb::new(1, 2, 3)])), 0.0);
    }

    #[test]
    fn score_stays_within_bounds() {
        let colors = set(&[
            Rgb::new(255, 0, 0),
            Rgb::new(200, 200, 200),
            Rgb::new(0, 0, 255),
            Rgb::new(20, 220, 60),
        ]);
        let score = evaluate_harmony(&colors);
        assert!((0.0..=10.0).contains(&score));
    }
}
