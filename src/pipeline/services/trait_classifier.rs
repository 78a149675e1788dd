use tracing::debug;

use crate::pipeline::types::Rgb;

/// One named aesthetic archetype: an optional hue window plus inclusive
/// saturation and luminance windows in HSL space.
struct TraitRule {
    name: &'static str,
    hue: Option<(f64, f64)>,
    saturation: (f64, f64),
    luminance: (f64, f64),
}

impl TraitRule {
    fn matches(&self, color: Rgb) -> bool {
        let hsl = color.to_hsl();
        let hue_ok = self.hue.is_none_or(|(lo, hi)| (lo..=hi).contains(&hsl.h));
        let sat_ok = (self.saturation.0..=self.saturation.1).contains(&hsl.s);
        let lum_ok = (self.luminance.0..=self.luminance.1).contains(&hsl.l);
        hue_ok && sat_ok && lum_ok
    }
}

const TRAIT_RULES: &[TraitRule] = &[
    TraitRule {
        name: "Professional",
        hue: None,
        saturation: (0.0, 0.3),
        luminance: (0.2, 0.8),
    },
    TraitRule {
        name: "Creative",
        hue: None,
        saturation: (0.4, 1.0),
        luminance: (0.1, 0.9),
    },
    TraitRule {
        name: "Experimental",
        hue: None,
        saturation: (0.6, 1.0),
        luminance: (0.0, 1.0),
    },
    TraitRule {
        name: "Calm",
        hue: Some((180.0, 300.0)),
        saturation: (0.0, 0.3),
        luminance: (0.7, 1.0),
    },
    TraitRule {
        name: "Playful",
        hue: Some((30.0, 90.0)),
        saturation: (0.5, 1.0),
        luminance: (0.4, 0.8),
    },
    TraitRule {
        name: "Elegant",
        hue: None,
        saturation: (0.2, 0.5),
        luminance: (0.6, 1.0),
    },
    TraitRule {
        name: "Dynamic",
        hue: None,
        saturation: (0.6, 1.0),
        luminance: (0.3, 0.7),
    },
    TraitRule {
        name: "Authentic",
        hue: None,
        saturation: (0.3, 0.6),
        luminance: (0.2, 0.7),
    },
    TraitRule {
        name: "Inviting",
        hue: None,
        saturation: (0.2, 0.6),
        luminance: (0.5, 0.9),
    },
    TraitRule {
        name: "Sophisticated",
        hue: None,
        saturation: (0.4, 0.8),
        luminance: (0.3, 0.7),
    },
];

/// Score every trait as the fraction of colors falling inside all of its
/// windows and return the best label.
///
/// Runs over the accepted-token color list with duplicates, so a color used
/// twice counts twice. Ties resolve to the lexicographically smallest trait
/// name, never to table order. `None` when there are no colors to score.
pub fn classify_colors(colors: &[Rgb]) -> Option<&'static str> {
    if colors.is_empty() {
        return None;
    }

    let mut best: Option<(&'static str, f64)> = None;
    for rule in TRAIT_RULES {
        let matching = colors.iter().filter(|c| rule.matches(**c)).count();
        let score = matching as f64 / colors.len() as f64;
        debug!("trait {} scored {:.2}", rule.name, score);

        let better = match best {
            None => true,
            Some((best_name, best_score)) => {
                score > best_score || (score == best_score && rule.name < best_name)
            }
        };
        if better {
            best = Some((rule.name, score));
        }
    }
    best.map(|(name, _)| name)
}
