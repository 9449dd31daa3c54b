//! Immutable colors that are also palettes.
//!
//! Every [`Color`] carries a frozen [`Palette`] of named sub-colors whose `base`
//! defaults to the color itself, so palettes nest to any depth and every node
//! is usable as a plain color:
//!
//! ```rust
//! use chromatree::{Color, ColorOptions, PaletteSpec};
//!
//! # fn main() -> chromatree::PaletteResult<()> {
//! let black = Color::from_hex("#111111", ColorOptions::new())?;
//! let gray = Color::from_palette(
//!     PaletteSpec::new()
//!         .base(Color::from_color(&black, ColorOptions::new().with_shade(0.5))?)
//!         .entry("s9", Color::from_color(&black, ColorOptions::new().with_shade(0.1))?)
//!         .entry("s10", black),
//! )?;
//!
//! assert_eq!(gray.to_string(), "#888888");
//! assert_eq!(gray.get("s9").unwrap().to_string(), "#292929");
//! # Ok(())
//! # }
//! ```
//!
//! Colors only come out of the factory functions. A palette declared without a
//! base gets a fully transparent placeholder base; rendering that placeholder
//! logs a warning and ignores any requested shade or opacity.

use std::{
    fmt::{self, Display},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    convert::{
        convert_hex_to_rgba, get_rgba_by_config, get_rgba_config, transform_hex, ColorOptions,
        RgbaConfig,
    },
    error::{PaletteError, PaletteResult, TransparentBaseWarning},
    freeze::{Freeze, Palette, PaletteSpec, BASE_KEY},
};

const TRANSPARENT_COLOR_RGBA: &str = "rgba(255, 255, 255, 0)";

/// Proof that a factory function is doing the constructing.
///
/// The private field keeps it from being built outside this module.
#[derive(Debug, Clone, Copy)]
pub struct ConstructorKey(());

/// Raw inputs of [`Color::new`]
#[derive(Debug, Default)]
pub struct ColorConfig {
    pub hex: Option<String>,
    pub rgba: Option<String>,
    pub palette: Option<PaletteSpec>,
    pub constructor_key: Option<ConstructorKey>,
    transparent_base: bool,
}

impl ColorConfig {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self {
            hex: Some(hex.into()),
            ..Self::default()
        }
    }

    pub fn from_rgba(rgba: impl Into<String>) -> Self {
        Self {
            rgba: Some(rgba.into()),
            ..Self::default()
        }
    }

    pub fn with_palette(self, palette: PaletteSpec) -> Self {
        Self {
            palette: Some(palette),
            ..self
        }
    }

    fn authorized(self) -> Self {
        Self {
            constructor_key: Some(ConstructorKey(())),
            ..self
        }
    }
}

/// An immutable color that doubles as a palette of named colors
#[derive(Debug)]
pub struct Color {
    hex: String,
    rgba_config: RgbaConfig,
    was_provided_hex: bool,
    palette: Palette,
    is_transparent_base: bool,
    debug_enabled: AtomicBool,
}

impl Color {
    /// Direct constructor.
    ///
    /// Fails with [`PaletteError::Construction`] unless `config` carries a
    /// [`ConstructorKey`], which only the factory functions can provide.
    pub fn new(config: ColorConfig) -> PaletteResult<Self> {
        if config.constructor_key.is_none() {
            return Err(PaletteError::Construction);
        }

        let hex = config.hex.filter(|hex| !hex.is_empty());
        let rgba_config = match (config.rgba.as_deref(), hex.as_deref()) {
            (Some(rgba), _) => get_rgba_config(rgba)?,
            (None, Some(hex)) => {
                let rgba = convert_hex_to_rgba(hex, None);
                if rgba.is_empty() {
                    return Err(PaletteError::invalid_color(hex, "expected a hex color"));
                }
                get_rgba_config(&rgba)?
            }
            (None, None) => {
                return Err(PaletteError::invalid_color(
                    "",
                    "a color needs a hex or rgba value",
                ))
            }
        };

        let was_provided_hex = hex.is_some();
        let hex = hex.unwrap_or_else(|| rgba_config.to_chroma().hex());

        Ok(Self {
            hex,
            rgba_config,
            was_provided_hex,
            // An absent base resolves to `self` in `Color::base`
            palette: config.palette.unwrap_or_default().freeze(),
            is_transparent_base: config.transparent_base && rgba_config.alpha == 0.0,
            debug_enabled: AtomicBool::new(true),
        })
    }

    /// Build from a hex string after applying `opts`
    pub fn from_hex(hex: &str, opts: ColorOptions) -> PaletteResult<Self> {
        let hex = transform_hex(hex, opts)?;
        Self::new(ColorConfig::from_hex(hex).authorized())
    }

    /// Build from an `rgb()`/`rgba()` string, untransformed
    pub fn from_rgba(rgba: &str) -> PaletteResult<Self> {
        Self::new(ColorConfig::from_rgba(rgba).authorized())
    }

    /// Recolor or clone an existing color through its hex form
    pub fn from_color(color: &Color, opts: ColorOptions) -> PaletteResult<Self> {
        let hex = color.snapshot_hex()?;
        Self::from_hex(&hex, opts)
    }

    /// Build a color whose value is the spec's base and whose palette is the
    /// whole spec. Without a base, a transparent placeholder is used.
    pub fn from_palette(spec: PaletteSpec) -> PaletteResult<Self> {
        let base = match spec.base_color() {
            Some(base) => Arc::clone(base),
            None => Arc::new(transparent_base()?),
        };

        let hex = Self::from_color(&base, ColorOptions::new())?.snapshot_hex()?;

        Self::new(
            ColorConfig::from_hex(hex)
                .with_palette(spec.base(base))
                .authorized(),
        )
    }

    /// The palette's base: the color itself unless one was given
    pub fn base(&self) -> &Color {
        self.palette.base().map_or(self, Arc::as_ref)
    }

    /// A named palette entry; `base` always resolves
    pub fn get(&self, key: &str) -> Option<&Color> {
        if key == BASE_KEY {
            Some(self.base())
        } else {
            self.palette.get(key).map(Arc::as_ref)
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rgba_config(&self) -> RgbaConfig {
        self.rgba_config
    }

    pub fn was_provided_hex(&self) -> bool {
        self.was_provided_hex
    }

    pub fn is_transparent_base(&self) -> bool {
        self.is_transparent_base
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Acquire)
    }

    /// Toggle the transparent-base warning for this color
    pub fn set_debug(&self, enabled: bool) {
        self.debug_enabled.store(enabled, Ordering::Release);
    }

    /// Hex form with `opts` applied; the transparent placeholder ignores `opts`
    pub fn to_hex(&self, opts: ColorOptions) -> PaletteResult<String> {
        self.warn_if_transparent_base();

        if self.is_transparent_base {
            return Ok(self.hex.clone());
        }
        transform_hex(&self.hex, opts)
    }

    /// Rgba form, optionally at `opacity`; the transparent placeholder ignores it
    pub fn to_rgba(&self, opacity: Option<f64>) -> String {
        self.warn_if_transparent_base();
        self.render_rgba(opacity)
    }

    /// Rounded channels with alpha scaled to 0-255
    pub fn rgba_components(&self) -> (u8, u8, u8, u8) {
        let channel = |value: f64| value.round().clamp(0.0, 255.0) as u8;
        let RgbaConfig {
            red,
            green,
            blue,
            alpha,
        } = self.rgba_config;
        (
            channel(red),
            channel(green),
            channel(blue),
            channel(alpha * 255.0),
        )
    }

    pub(crate) fn warn_if_transparent_base(&self) {
        if self.is_transparent_base && self.is_debug_enabled() {
            let warning = TransparentBaseWarning {
                hex: self.hex.clone(),
            };
            tracing::warn!(
                target: "chromatree::color",
                hex = %warning.hex,
                rgba = ?self.rgba_config,
                "{}",
                warning
            );
        }
    }

    /// Hex form read without triggering the transparent-base warning.
    ///
    /// Leaves `debug_enabled` alone, so concurrent readers of a shared color
    /// never see the flag change under them.
    pub(crate) fn snapshot_hex(&self) -> PaletteResult<String> {
        if self.is_transparent_base {
            return Ok(self.hex.clone());
        }
        transform_hex(&self.hex, ColorOptions::new())
    }

    fn render_rgba(&self, opacity: Option<f64>) -> String {
        let opacity = if self.is_transparent_base {
            None
        } else {
            opacity
        };
        get_rgba_by_config(&self.rgba_config, opacity)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.warn_if_transparent_base();

        if self.was_provided_hex {
            f.write_str(&self.hex)
        } else {
            f.write_str(&self.render_rgba(None))
        }
    }
}

fn transparent_base() -> PaletteResult<Color> {
    Color::new(ColorConfig {
        transparent_base: true,
        ..ColorConfig::from_rgba(TRANSPARENT_COLOR_RGBA).authorized()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        convert::{
            gen_random_hex, gen_random_rgba, gen_random_rgba_config, validate_hex, validate_rgba,
        },
        test_support::count_warnings,
    };
    use pretty_assertions::assert_eq;
    use std::ptr;

    fn hex(value: &str) -> Color {
        Color::from_hex(value, ColorOptions::new()).unwrap()
    }

    fn rgba(value: &str) -> Color {
        Color::from_rgba(value).unwrap()
    }

    fn no_base_palette() -> Color {
        Color::from_palette(
            PaletteSpec::new()
                .entry("light", hex(&gen_random_hex()))
                .entry("dark", rgba(&gen_random_rgba())),
        )
        .unwrap()
    }

    #[test]
    fn test_direct_construction_fails() {
        for config in [
            ColorConfig::from_hex(gen_random_hex()),
            ColorConfig::from_rgba(gen_random_rgba()),
        ] {
            let err = Color::new(config).unwrap_err();
            assert!(matches!(err, PaletteError::Construction));
            assert_eq!(
                err.to_string(),
                "Use one of the factory functions to construct a new Color instance."
            );
        }
    }

    #[test]
    fn test_debug_enabled_by_default() {
        assert!(hex(&gen_random_hex()).is_debug_enabled());
    }

    #[test]
    fn test_set_debug() {
        let color = hex(&gen_random_hex());

        for status in [false, true] {
            color.set_debug(!status);
            assert_eq!(color.is_debug_enabled(), !status);
            color.set_debug(status);
            assert_eq!(color.is_debug_enabled(), status);
        }
    }

    #[test]
    fn test_from_hex() {
        let value = gen_random_hex();
        let color = hex(&value);

        assert_eq!(color.to_hex(ColorOptions::new()).unwrap(), value);
        assert!(ptr::eq(color.base(), &color));
        assert!(color.was_provided_hex());
        assert!(!color.is_transparent_base());
    }

    #[test]
    fn test_from_hex_applies_options() {
        let color = Color::from_hex("#111111", ColorOptions::new().with_shade(0.5)).unwrap();
        assert_eq!(color.to_string(), "#888888");

        let faded = Color::from_hex("#111111", ColorOptions::new().with_opacity(0.5)).unwrap();
        assert_eq!(faded.rgba_config().alpha, 0.5);
    }

    #[test]
    fn test_from_hex_invalid() {
        let err = Color::from_hex("#nothex", ColorOptions::new()).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColor { .. }));
        assert!(Color::from_hex("", ColorOptions::new()).is_err());
    }

    #[test]
    fn test_from_rgba() {
        let value = gen_random_rgba();
        let color = rgba(&value);

        assert_eq!(color.to_rgba(None), value);
        assert!(ptr::eq(color.base(), &color));
        assert!(!color.was_provided_hex());
        assert!(Color::from_rgba("rgba(300, 0, 0)").is_err());
    }

    #[test]
    fn test_to_string_follows_authoring_form() {
        let value = gen_random_hex();
        let color = hex(&value);
        assert_eq!(color.to_string(), value);
        assert!(validate_hex(&color.to_string()));

        let value = gen_random_rgba();
        let color = rgba(&value);
        assert_eq!(color.to_string(), value);
        assert!(validate_rgba(&color.to_string()));
    }

    #[test]
    fn test_to_hex_from_rgba() {
        let color = rgba(&gen_random_rgba());
        let value = color.to_hex(ColorOptions::new()).unwrap();

        assert!(value.starts_with('#'));
        assert!(validate_hex(&value));
        assert_eq!(
            rgba("rgba(17, 17, 17, 0.5)")
                .to_hex(ColorOptions::new())
                .unwrap(),
            "#11111180"
        );
    }

    #[test]
    fn test_to_rgba() {
        let config = gen_random_rgba_config();
        let color = rgba(&get_rgba_by_config(&config, None));
        assert_eq!(get_rgba_config(&color.to_rgba(None)).unwrap(), config);

        let value = gen_random_hex();
        let color = hex(&value);
        assert_eq!(
            get_rgba_config(&color.to_rgba(None)).unwrap(),
            get_rgba_config(&convert_hex_to_rgba(&value, None)).unwrap()
        );

        let faded = get_rgba_config(&color.to_rgba(Some(0.4))).unwrap();
        assert_eq!(faded.alpha, 0.4);
    }

    #[test]
    fn test_from_color() {
        let black = hex("#111111");
        let copy = Color::from_color(&black, ColorOptions::new()).unwrap();
        assert_eq!(copy.to_string(), "#111111");

        let gray = Color::from_color(&black, ColorOptions::new().with_shade(0.5)).unwrap();
        assert_eq!(gray.to_string(), "#888888");
        assert!(black.is_debug_enabled());
    }

    #[test]
    fn test_from_palette_with_base() {
        let base = Arc::new(rgba(&gen_random_rgba()));
        let light = Arc::new(hex(&gen_random_hex()));
        let other = Arc::new(rgba(&gen_random_rgba()));

        let color = Color::from_palette(
            PaletteSpec::new()
                .base(base.clone())
                .entry("light", light.clone())
                .entry("xyz1760551234123", other.clone()),
        )
        .unwrap();

        assert!(ptr::eq(color.base(), base.as_ref()));
        assert!(ptr::eq(color.get("base").unwrap(), base.as_ref()));
        assert!(ptr::eq(color.get("light").unwrap(), light.as_ref()));
        assert!(ptr::eq(color.get("xyz1760551234123").unwrap(), other.as_ref()));
        assert!(color.get("missing").is_none());

        assert_eq!(
            color.to_hex(ColorOptions::new()).unwrap(),
            base.to_hex(ColorOptions::new()).unwrap()
        );
        assert!(!color.is_transparent_base());
    }

    #[test]
    fn test_transparent_default_base() {
        let (color, warnings) = count_warnings(no_base_palette);
        assert_eq!(warnings, 0, "building the palette must not warn");

        let base = color.base();
        assert!(base.is_transparent_base());
        assert!(!color.is_transparent_base());
        assert!(!ptr::eq(base, &color));

        let (rendered, warnings) = count_warnings(|| base.to_rgba(None));
        assert_eq!(get_rgba_config(&rendered).unwrap().alpha, 0.0);
        assert_eq!(warnings, 1);

        let (_, warnings) = count_warnings(|| base.to_string());
        assert_eq!(warnings, 1);

        let (_, warnings) = count_warnings(|| base.to_hex(ColorOptions::new()));
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_transparent_base_ignores_transforms() {
        let color = no_base_palette();
        let base = color.base();

        let ((forced, plain), warnings) = count_warnings(|| {
            (
                base.to_hex(ColorOptions::new().with_opacity(1.0).with_shade(0.5)),
                base.to_hex(ColorOptions::new()),
            )
        });
        assert_eq!(forced.unwrap(), plain.unwrap());
        assert_eq!(warnings, 2);

        assert_eq!(base.to_rgba(Some(1.0)), base.to_rgba(None));
        assert_eq!(base.to_hex(ColorOptions::new()).unwrap(), "#ffffff00");
    }

    #[test]
    fn test_transparent_base_quiet_when_debug_disabled() {
        let color = no_base_palette();
        let base = color.base();
        base.set_debug(false);

        let (_, warnings) = count_warnings(|| base.to_string());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_snapshot_leaves_debug_flag() {
        let color = no_base_palette();
        let base = color.base();

        let (_, warnings) = count_warnings(|| Color::from_color(base, ColorOptions::new()));
        assert_eq!(warnings, 0);
        assert!(base.is_debug_enabled());

        base.set_debug(false);
        Color::from_color(base, ColorOptions::new()).unwrap();
        assert!(!base.is_debug_enabled());
    }

    #[test]
    fn test_concurrent_snapshots_keep_debug_flag() {
        let color = no_base_palette();
        let shared = Arc::clone(color.palette().base().unwrap());
        let base = shared.as_ref();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        Color::from_color(base, ColorOptions::new()).unwrap();
                        Color::from_palette(PaletteSpec::new().base(Arc::clone(&shared)))
                            .unwrap();
                    }
                });
            }
        });
        assert!(base.is_debug_enabled());

        let (_, warnings) = count_warnings(|| base.to_string());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_user_transparent_color_is_not_flagged() {
        let color = rgba("rgba(255, 255, 255, 0)");
        assert!(!color.is_transparent_base());

        let (_, warnings) = count_warnings(|| color.to_string());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_rgba_components() {
        assert_eq!(hex("#ff8000").rgba_components(), (255, 128, 0, 255));
        assert_eq!(rgba("rgba(1, 2, 3, 0.5)").rgba_components(), (1, 2, 3, 128));
    }
}
