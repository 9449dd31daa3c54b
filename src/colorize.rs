//! Terminal output for colors and palettes.
//!
//! Bridges [`Color`] to owo-colors and ratatui, and renders a palette tree
//! with truecolor swatches for inspection.

use owo_colors::OwoColorize;
use ratatui::style::Color as RatatuiColor;
use std::fmt::{Display, Write};

use crate::{color::Color, freeze::BASE_KEY};

const SWATCH: &str = "██";

impl From<&Color> for owo_colors::Rgb {
    fn from(color: &Color) -> Self {
        let (r, g, b, _) = color.rgba_components();
        owo_colors::Rgb(r, g, b)
    }
}

impl From<&Color> for RatatuiColor {
    fn from(color: &Color) -> Self {
        let (r, g, b, _) = color.rgba_components();
        RatatuiColor::Rgb(r, g, b)
    }
}

/// Extension trait for painting text with palette colors.
///
/// Painting counts as using the color, so the transparent placeholder base
/// warns here like it does when rendered to a string.
pub trait ColorizeExt: OwoColorize {
    /// Foreground in `color`
    #[inline]
    fn paint(self, color: &Color) -> String
    where
        Self: Sized + Display,
    {
        color.warn_if_transparent_base();
        let (r, g, b, _) = color.rgba_components();
        format!("{}", self.truecolor(r, g, b))
    }

    /// Background in `color`
    #[inline]
    fn paint_on(self, color: &Color) -> String
    where
        Self: Sized + Display,
    {
        color.warn_if_transparent_base();
        let (r, g, b, _) = color.rgba_components();
        format!("{}", self.on_truecolor(r, g, b))
    }

    /// Foreground in the palette entry `key`, if there is one
    #[inline]
    fn paint_key(self, palette: &Color, key: &str) -> Option<String>
    where
        Self: Sized + Display,
    {
        palette.get(key).map(|color| self.paint(color))
    }
}

impl<T: OwoColorize + Display> ColorizeExt for T {}

/// One line per palette entry, nested entries indented, each with a swatch.
///
/// Reads colors the way the factories do, so the transparent placeholder is
/// listed without warning.
pub fn palette_tree(color: &Color) -> String {
    let mut out = String::new();
    write_node(&mut out, BASE_KEY, color, 0);
    out
}

fn write_node(out: &mut String, key: &str, color: &Color, depth: usize) {
    let hex = color.snapshot_hex().unwrap_or_default();
    let (r, g, b, _) = color.rgba_components();
    let marker = if color.is_transparent_base() {
        " (transparent base)"
    } else {
        ""
    };

    let _ = writeln!(
        out,
        "{:indent$}{} {}: {}{}",
        "",
        SWATCH.truecolor(r, g, b),
        key,
        hex,
        marker,
        indent = depth * 2
    );

    if let Some(base) = color.palette().base() {
        write_node(out, BASE_KEY, base, depth + 1);
    }
    for (key, child) in color.palette().iter() {
        write_node(out, key, child, depth + 1);
    }
}
