#![forbid(unsafe_code)]

//! # Chromatree
//!
//! Immutable colors that are also arbitrarily nested palettes.
//!
//! ## Overview
//!
//! Every color carries a named palette of other colors, and every palette is
//! itself a color:
//!
//! - **Self-referential palettes**: a palette's `base` defaults to the color that owns it
//! - **Controlled construction**: colors only come from factory functions, which normalize and freeze
//! - **Lossless rendering**: hex-authored colors render as hex, rgba-authored colors as rgba
//! - **Shade and opacity transforms**: linear lightening/darkening followed by alpha composition
//! - **Transparent placeholder base**: palettes without a base still compose, and using the placeholder as a color logs a warning
//!
//! ## Core Components
//!
//! - [`Color`]: the immutable color/palette value and its factories
//! - [`PaletteSpec`]: mutable palette description consumed by [`Color::from_palette`]
//! - [`Palette`]: the frozen palette a color carries
//! - [`ColorOptions`]: shade/opacity transform options
//! - [`RgbaConfig`]: canonical numeric value of a color
//! - [`ColorizeExt`]: paint terminal text with palette colors
//!
//! ## Example Usage
//!
//! ```rust
//! use chromatree::{Color, ColorOptions, PaletteSpec};
//!
//! fn main() -> chromatree::PaletteResult<()> {
//!     let white = Color::from_palette(
//!         PaletteSpec::new()
//!             .base(Color::from_rgba("rgba(255, 255, 255)")?)
//!             .entry(
//!                 "OffWhite",
//!                 Color::from_palette(
//!                     PaletteSpec::new()
//!                         .entry("light", Color::from_hex("#f8f9f9", ColorOptions::new())?)
//!                         .base(Color::from_hex("#f4f6f6", ColorOptions::new())?),
//!                 )?,
//!             ),
//!     )?;
//!
//!     let off_white = white.get("OffWhite").unwrap();
//!     assert_eq!(off_white.to_string(), "#f4f6f6");
//!     assert_eq!(off_white.get("light").unwrap().to_string(), "#f8f9f9");
//!     assert_eq!(white.to_string(), "#ffffff");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `color`: the color value, factories and the transparent base
//! - `colorize`: owo-colors and ratatui bridges
//! - `convert`: hex/rgba conversion, validation and transforms
//! - `error`: error and warning diagnostics
//! - `freeze`: palette specs and frozen palettes
//!
//! ## Error Handling
//!
//! Fallible operations return [`PaletteResult`] with a [`PaletteError`], a
//! `miette` diagnostic. Conversions meant to be checked by value
//! ([`convert_hex_to_rgba`], [`convert_color_safe`]) return empty values instead.
//!
//! ## Logging
//!
//! Rendering the transparent placeholder base emits a `tracing` warning on the
//! `chromatree::color` target. No subscriber is installed by the crate.

/// Re-exports of core components
pub use color::{Color, ColorConfig, ConstructorKey};
pub use colorize::{palette_tree, ColorizeExt};
pub use convert::{
    convert_color_safe, convert_hex_to_rgba, gen_random_hex, gen_random_rgba,
    gen_random_rgba_config, get_rgba_by_config, get_rgba_config, shade_hex, transform_hex,
    validate_alpha, validate_hex, validate_rgba, validate_shade, ColorOptions, RgbaConfig,
};
pub use error::{PaletteError, PaletteResult, TransparentBaseWarning};
pub use freeze::{Freeze, Palette, PaletteSpec, BASE_KEY};

/// Color low-level math
mod chroma;
/// Color values, factories and the transparent base
pub mod color;
/// Terminal bridges
pub mod colorize;
/// Conversion and transform utilities
pub mod convert;
/// Error types and diagnostics
pub mod error;
/// Palette specs and frozen palettes
pub mod freeze;
