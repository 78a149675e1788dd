use indexmap::IndexSet;
use tracing::warn;

use crate::error::TokenError;
use crate::pipeline::types::Rgb;

/// Validated color data for one snapshot: the deduplicated set in
/// first-appearance order, plus the raw occurrence list (duplicates
/// preserved) that dominance counting needs.
#[derive(Debug, Clone, Default)]
pub struct NormalizedColors {
    pub unique: IndexSet<Rgb>,
    pub occurrences: Vec<Rgb>,
}

impl NormalizedColors {
    pub fn is_empty(&self) -> bool {
        self.unique.is_empty()
    }
}

/// Run every raw token through validation and conversion.
///
/// Tokens that match no recognized grammar or fail numeric conversion are
/// dropped with a warning; nothing here is fatal.
pub fn normalize_tokens(tokens: &[String]) -> NormalizedColors {
    let mut normalized = NormalizedColors::default();
    for token in tokens {
        match parse_token(token) {
            Ok(color) => {
                normalized.occurrences.push(color);
                normalized.unique.insert(color);
            }
            Err(err) => warn!("dropping color token: {err}"),
        }
    }
    normalized
}

/// Parse one raw styling token into RGB.
///
/// Recognized grammars: hex (`#RGB`/`#RRGGBB`, marker optional),
/// `rgb()`/`rgba()` and `hsl()`/`hsla()`. Alpha components are validated
/// and discarded.
pub fn parse_token(token: &str) -> Result<Rgb, TokenError> {
    let token = token.trim();
    let lower = token.to_ascii_lowercase();

    if let Some(code) = lower.strip_prefix('#') {
        return parse_hex(token, code, true);
    }
    if let Some(args) = strip_function(&lower, "rgba").or_else(|| strip_function(&lower, "rgb")) {
        return parse_rgb_function(token, args);
    }
    if let Some(args) = strip_function(&lower, "hsla").or_else(|| strip_function(&lower, "hsl")) {
        return parse_hsl_function(token, args);
    }
    if (lower.len() == 3 || lower.len() == 6) && lower.bytes().all(|b| b.is_ascii_hexdigit()) {
        return parse_hex(token, &lower, false);
    }

    Err(TokenError::UnrecognizedFormat(token.to_string()))
}

fn strip_function<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    token
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Decode a hex code into RGB.
///
/// A 3-digit code expands by doubling each digit. Marker-prefixed fragments
/// shorter than 6 digits go through a lossy repair instead of rejection:
/// a 4-digit fragment keeps only its first 3 digits, and anything still
/// short is zero-padded out to a full code. Bare codes must be exactly 3 or
/// 6 digits.
fn parse_hex(token: &str, code: &str, has_marker: bool) -> Result<Rgb, TokenError> {
    if code.is_empty() || code.len() > 6 || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TokenError::UnrecognizedFormat(token.to_string()));
    }
    if !has_marker && code.len() != 3 && code.len() != 6 {
        return Err(TokenError::UnrecognizedFormat(token.to_string()));
    }

    let mut code = code.to_string();
    if code.len() == 3 {
        code = code.chars().flat_map(|c| [c, c]).collect();
    }
    if code.len() < 6 {
        if code.len() == 4 {
            code.truncate(3);
        }
        while code.len() < 6 {
            code.push('0');
        }
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&code[range], 16)
            .map_err(|_| TokenError::UnrecognizedFormat(token.to_string()))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_rgb_function(token: &str, args: &str) -> Result<Rgb, TokenError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(TokenError::UnrecognizedFormat(token.to_string()));
    }
    if parts.len() == 4 {
        parse_alpha(token, parts[3])?;
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value: u32 = part.parse().map_err(|_| TokenError::InvalidComponent {
            token: token.to_string(),
            component: part.to_string(),
        })?;
        if value > 255 {
            return Err(TokenError::OutOfRange {
                token: token.to_string(),
                value: f64::from(value),
            });
        }
        *slot = value as u8;
    }
    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

fn parse_hsl_function(token: &str, args: &str) -> Result<Rgb, TokenError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(TokenError::UnrecognizedFormat(token.to_string()));
    }
    if parts.len() == 4 {
        parse_alpha(token, parts[3])?;
    }

    let hue: f64 = parts[0].parse().map_err(|_| TokenError::InvalidComponent {
        token: token.to_string(),
        component: parts[0].to_string(),
    })?;
    let saturation = parse_percent(token, parts[1])?;
    let lightness = parse_percent(token, parts[2])?;
    hsl_to_rgb(token, hue, saturation, lightness)
}

/// Alpha is parsed for validity and then ignored: the analysis operates on
/// opaque color identity only.
fn parse_alpha(token: &str, part: &str) -> Result<(), TokenError> {
    let value: f64 = part.parse().map_err(|_| TokenError::InvalidComponent {
        token: token.to_string(),
        component: part.to_string(),
    })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(TokenError::OutOfRange {
            token: token.to_string(),
            value,
        });
    }
    Ok(())
}

fn parse_percent(token: &str, part: &str) -> Result<f64, TokenError> {
    let digits = part
        .strip_suffix('%')
        .ok_or_else(|| TokenError::InvalidComponent {
            token: token.to_string(),
            component: part.to_string(),
        })?;
    let value: f64 = digits
        .trim()
        .parse()
        .map_err(|_| TokenError::InvalidComponent {
            token: token.to_string(),
            component: part.to_string(),
        })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(TokenError::OutOfRange {
            token: token.to_string(),
            value,
        });
    }
    Ok(value / 100.0)
}

/// Piecewise HSL-to-RGB transform. Hue wraps into [0,360) before being
/// normalized; saturation and lightness are already fractions.
fn hsl_to_rgb(token: &str, hue_degrees: f64, s: f64, l: f64) -> Result<Rgb, TokenError> {
    let h = hue_degrees.rem_euclid(360.0) / 360.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let scale = |component: f64| -> Result<u8, TokenError> {
        let value = (component * 255.0).round();
        if !(0.0..=255.0).contains(&value) {
            return Err(TokenError::OutOfRange {
                token: token.to_string(),
                value,
            });
        }
        Ok(value as u8)
    };
    Ok(Rgb::new(scale(r)?, scale(g)?, scale(b)?))
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
