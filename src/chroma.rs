//! Low-level color math.
//!
//! Parses hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb(r, g, b)` and
//! `rgba(r, g, b[, a])` strings, renders them back, overrides alpha, and draws
//! random colors. Named css colors are not recognized. Every parse failure is
//! reported as [`PaletteError::InvalidColor`] carrying the offending input.

use rand::Rng;

use crate::error::{PaletteError, PaletteResult};

/// A parsed color: unrounded rgb channels (0-255) and alpha (0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Chroma {
    channels: [f64; 3],
    alpha: f64,
}

impl Chroma {
    pub(crate) fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            channels: [red, green, blue],
            alpha,
        }
    }

    /// Parse any supported color string
    pub(crate) fn parse(input: &str) -> PaletteResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PaletteError::invalid_color(input, "empty color string"));
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(args) = lower.strip_prefix("rgba(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_css_rgb(input, args, 3..=4);
        }
        if let Some(args) = lower.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_css_rgb(input, args, 3..=3);
        }

        parse_hex(input, trimmed.strip_prefix('#').unwrap_or(trimmed))
    }

    /// Whether `input` parses at all
    pub(crate) fn valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Random opaque color, drawn the way a random `#rrggbb` would be
    pub(crate) fn random() -> Self {
        let value: u32 = rand::thread_rng().gen_range(0..=0x00ff_ffff);
        Self::new(
            f64::from((value >> 16) & 0xff),
            f64::from((value >> 8) & 0xff),
            f64::from(value & 0xff),
            1.0,
        )
    }

    /// Same rgb channels, new alpha
    pub(crate) fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels rounded to integers, alpha untouched
    pub(crate) fn rgba(&self) -> [f64; 4] {
        let [r, g, b] = self.rounded();
        [f64::from(r), f64::from(g), f64::from(b), self.alpha]
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise
    pub(crate) fn hex(&self) -> String {
        let [r, g, b] = self.rounded();
        if self.alpha < 1.0 {
            let a = round_half_up(self.alpha * 255.0).clamp(0.0, 255.0) as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        } else {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
    }

    /// `rgb(r,g,b)` when opaque, `rgba(r,g,b,a)` otherwise
    pub(crate) fn css(&self) -> String {
        let [r, g, b] = self.rounded();
        if self.alpha < 1.0 {
            format!("rgba({},{},{},{})", r, g, b, format_number(self.alpha))
        } else {
            format!("rgb({},{},{})", r, g, b)
        }
    }

    fn rounded(&self) -> [u8; 3] {
        self.channels
            .map(|channel| round_half_up(channel).clamp(0.0, 255.0) as u8)
    }
}

/// Rounds half toward positive infinity
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Shortest decimal form, `-0` collapsed to `0`
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn parse_hex(input: &str, digits: &str) -> PaletteResult<Chroma> {
    let invalid = |msg: &str| PaletteError::invalid_color(input, msg);

    let values = digits
        .bytes()
        .map(nibble)
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| invalid("invalid hex digits"))?;

    let (rgb, alpha) = match values.as_slice() {
        [r, g, b] => ([r * 17, g * 17, b * 17], 255),
        [r, g, b, a] => ([r * 17, g * 17, b * 17], a * 17),
        [r1, r2, g1, g2, b1, b2] => ([r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2], 255),
        [r1, r2, g1, g2, b1, b2, a1, a2] => {
            ([r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2], a1 << 4 | a2)
        }
        _ => return Err(invalid("invalid hex length")),
    };

    // Two decimals, so `#rrggbb80` reads back as 0.5
    let alpha = round_half_up(f64::from(alpha) / 255.0 * 100.0) / 100.0;
    Ok(Chroma::new(
        f64::from(rgb[0]),
        f64::from(rgb[1]),
        f64::from(rgb[2]),
        alpha,
    ))
}

fn parse_css_rgb(
    input: &str,
    args: &str,
    arity: std::ops::RangeInclusive<usize>,
) -> PaletteResult<Chroma> {
    let invalid = |msg: &str| PaletteError::invalid_color(input, msg);

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !arity.contains(&parts.len()) {
        return Err(invalid("expected rgb(r, g, b) or rgba(r, g, b, a)"));
    }

    let mut channels = [0.0; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|v| (0.0..=255.0).contains(v))
            .ok_or_else(|| invalid("channel out of range"))?;
    }

    let alpha = match parts.get(3) {
        Some(part) => part
            .parse::<f64>()
            .ok()
            .filter(|v| (0.0..=1.0).contains(v))
            .ok_or_else(|| invalid("alpha out of range"))?,
        None => 1.0,
    };

    Ok(Chroma::new(channels[0], channels[1], channels[2], alpha))
}
