//! Conversion utilities between hex strings, rgba strings and the canonical
//! [`RgbaConfig`] record, plus the shade/opacity transform pipeline.
//!
//! Conversions that callers treat as fallible-by-value (`convert_hex_to_rgba`,
//! `convert_color_safe`) never return an error; everything that parses caller
//! input for construction returns a [`PaletteResult`].

use crate::{
    chroma::{format_number, round_half_up, Chroma},
    error::PaletteResult,
};

/// Canonical numeric value of a color: channels in 0-255, alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaConfig {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl RgbaConfig {
    pub(crate) fn from_chroma(color: Chroma) -> Self {
        let [red, green, blue, alpha] = color.rgba();
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub(crate) fn to_chroma(self) -> Chroma {
        Chroma::new(self.red, self.green, self.blue, self.alpha)
    }
}

/// Optional transforms applied to a hex color
///
/// Out-of-range values are ignored rather than rejected; see [`validate_shade`]
/// and [`validate_alpha`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorOptions {
    /// Target alpha, 0-1
    pub opacity: Option<f64>,
    /// Lighten (> 0) or darken (< 0) by this fraction, -1 to 1
    pub shade: Option<f64>,
}

impl ColorOptions {
    pub const fn new() -> Self {
        Self {
            opacity: None,
            shade: None,
        }
    }

    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: Some(opacity),
            ..self
        }
    }

    pub const fn with_shade(self, shade: f64) -> Self {
        Self {
            shade: Some(shade),
            ..self
        }
    }
}

/// Render `hex` as `rgba(r,g,b,a)`, optionally forcing a valid alpha.
///
/// Returns an empty string when `hex` cannot be parsed.
pub fn convert_hex_to_rgba(hex: &str, alpha: Option<f64>) -> String {
    let Ok(color) = Chroma::parse(hex) else {
        return String::new();
    };

    let color = match alpha {
        Some(alpha) if validate_alpha(Some(alpha)) => color.with_alpha(alpha),
        _ => color,
    };

    let [r, g, b, a] = color.rgba();
    format!(
        "rgba({},{},{},{})",
        format_number(r),
        format_number(g),
        format_number(b),
        format_number(a)
    )
}

/// Parse an `rgb()`/`rgba()` (or hex) string into its canonical record.
/// Alpha defaults to 1 when the string has none.
pub fn get_rgba_config(rgba: &str) -> PaletteResult<RgbaConfig> {
    Chroma::parse(rgba).map(RgbaConfig::from_chroma)
}

/// Render a record as `rgba(r, g, b, a)`.
///
/// A valid `alpha` override is composed through the color math layer, which
/// yields css output (`rgb(...)` for opaque results).
pub fn get_rgba_by_config(config: &RgbaConfig, alpha: Option<f64>) -> String {
    match alpha {
        Some(alpha) if validate_alpha(Some(alpha)) => config.to_chroma().with_alpha(alpha).css(),
        _ => format!(
            "rgba({}, {}, {}, {})",
            format_number(config.red),
            format_number(config.green),
            format_number(config.blue),
            format_number(config.alpha)
        ),
    }
}

/// Parse `color`, falling back to `fallback` when it is malformed
pub fn convert_color_safe(color: &str, fallback: Option<&str>) -> Option<RgbaConfig> {
    match Chroma::parse(color) {
        Ok(parsed) => Some(RgbaConfig::from_chroma(parsed)),
        Err(_) => fallback.and_then(|fallback| convert_color_safe(fallback, None)),
    }
}

/// Shift each rgb channel linearly toward white (`percent > 0`) or black
/// (`percent < 0`) by `|percent|`. Alpha is carried over unchanged.
pub fn shade_hex(hex: &str, percent: f64) -> PaletteResult<String> {
    let [r, g, b, alpha] = Chroma::parse(hex)?.rgba();
    let target = if percent < 0.0 { 0.0 } else { 255.0 };
    let amount = percent.abs();
    let shift = |channel: f64| round_half_up((target - channel) * amount) + channel;

    Ok(Chroma::new(shift(r), shift(g), shift(b), alpha).hex())
}

/// Apply `opts.shade` and then `opts.opacity`, each only when valid.
///
/// With neither option valid the input is returned untouched.
pub fn transform_hex(hex: &str, opts: ColorOptions) -> PaletteResult<String> {
    let shade = opts.shade.filter(|&shade| validate_shade(Some(shade)));
    let opacity = opts.opacity.filter(|&alpha| validate_alpha(Some(alpha)));

    if shade.is_none() && opacity.is_none() {
        return Ok(hex.to_string());
    }

    // Shade works on rgb only, so it runs before alpha is composed in
    let shaded = match shade {
        Some(shade) => shade_hex(hex, shade)?,
        None => hex.to_string(),
    };

    match opacity {
        Some(alpha) => Ok(Chroma::parse(&shaded)?.with_alpha(alpha).hex()),
        None => Ok(shaded),
    }
}

/// `0 <= alpha <= 1`; zero is a valid alpha
pub fn validate_alpha(alpha: Option<f64>) -> bool {
    matches!(alpha, Some(alpha) if (0.0..=1.0).contains(&alpha))
}

/// Non-zero and `|shade| <= 1`; a zero shade is a no-op and rejected
pub fn validate_shade(shade: Option<f64>) -> bool {
    matches!(shade, Some(shade) if shade != 0.0 && shade.abs() <= 1.0)
}

/// 3, 6 or 8 hex digits, with or without a leading `#`
pub fn validate_hex(color: &str) -> bool {
    let digits = color.strip_prefix('#').unwrap_or(color);
    matches!(digits.len(), 3 | 6 | 8) && digits.bytes().all(|c| c.is_ascii_hexdigit())
}

/// An `rgb(`/`rgba(` string whose components are in range
pub fn validate_rgba(rgba: &str) -> bool {
    (rgba.starts_with("rgb(") || rgba.starts_with("rgba(")) && Chroma::valid(rgba)
}

pub fn gen_random_hex() -> String {
    Chroma::random().hex()
}

pub fn gen_random_rgba_config() -> RgbaConfig {
    RgbaConfig::from_chroma(Chroma::random())
}

pub fn gen_random_rgba() -> String {
    get_rgba_by_config(&gen_random_rgba_config(), None)
}
