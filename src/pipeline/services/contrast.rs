use indexmap::IndexSet;

use super::round2;
use crate::pipeline::types::Rgb;

/// Relative luminance from gamma-corrected channels, with the standard
/// perceptual weights.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Accessibility contrast ratio between two colors,
/// `(L_higher + 0.05) / (L_lower + 0.05)`. Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Map a contrast ratio onto the 1-10 scale. The scale climbs fastest
/// through the 1-4.5 readability range and flattens out past 7.
fn scale_ratio_to_score(ratio: f64) -> f64 {
    let score = if ratio < 1.0 {
        1.0
    } else if ratio < 3.0 {
        2.0 + (ratio - 1.0) / 2.0 * 3.0
    } else if ratio < 4.5 {
        5.0 + (ratio - 3.0) / 1.5 * 2.0
    } else if ratio < 7.0 {
        7.0 + (ratio - 4.5) / 2.5 * 2.0
    } else {
        9.0 + (ratio - 7.0) / 14.0
    };
    score.min(10.0)
}

/// Mean pairwise contrast score over the deduplicated set, rounded to two
/// decimals. Needs at least two distinct colors; 0 otherwise.
pub fn average_contrast_score(colors: &IndexSet<Rgb>) -> f64 {
    let colors: Vec<Rgb> = colors.iter().copied().collect();
    if colors.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..colors.len() {
        for j in (i + 1)..colors.len() {
            total += scale_ratio_to_score(contrast_ratio(colors[i], colors[j]));
            pairs += 1;
        }
    }
    round2(total / pairs as f64)
}
