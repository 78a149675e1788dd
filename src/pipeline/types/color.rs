use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit-per-channel RGB color.
///
/// Equality is bit-identity and doubles as the deduplication key for the
/// whole pipeline: two normalized colors compare equal iff all three
/// channels match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` rendering used for palette output.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL via the standard max/min/delta derivation.
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is undefined, reported as 0.
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: lightness,
            };
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl {
            h: hue / 6.0 * 360.0,
            s: saturation,
            l: lightness,
        }
    }

    /// Position on the color wheel in degrees, 0-360.
    pub fn hue(&self) -> f64 {
        self.to_hsl().h
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Cylindrical HSL representation: hue in degrees [0,360), saturation and
/// lightness in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Rgb::new(255, 0, 0).hue(), 0.0);
        assert!((Rgb::new(0, 255, 0).hue() - 120.0).abs() < 1e-9);
        assert!((Rgb::new(0, 0, 255).hue() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn pure_red_is_fully_saturated() {
        let hsl = Rgb::new(255, 0, 0).to_hsl();
        assert_eq!(hsl.s, 1.0);
        assert_eq!(hsl.l, 0.5);
    }

    #[test]
    fn grays_are_achromatic() {
        let hsl = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn hex_rendering_is_lowercase() {
        assert_eq!(Rgb::new(170, 187, 204).to_hex(), "#aabbcc");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
    }
}
