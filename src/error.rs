use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
};

#[derive(Debug, Diagnostic)]
pub enum PaletteError {
    #[diagnostic(
        code(chromatree::construction),
        help("build colors with Color::from_hex, from_rgba, from_color or from_palette")
    )]
    Construction,

    #[diagnostic(code(chromatree::invalid_color))]
    InvalidColor {
        #[source_code]
        src: String,
        #[label("not a valid color")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(chromatree::read_only))]
    ReadOnly { key: String },

    #[diagnostic(code(chromatree::not_extensible))]
    NotExtensible { key: String },
}

pub type PaletteResult<T> = std::result::Result<T, PaletteError>;

impl Display for PaletteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PaletteError::Construction => write!(
                f,
                "Use one of the factory functions to construct a new Color instance."
            ),
            PaletteError::InvalidColor { msg, .. } => write!(f, "Invalid color: {}", msg),
            PaletteError::ReadOnly { key } => write!(
                f,
                "Cannot assign to read only property '{}' of object",
                key
            ),
            PaletteError::NotExtensible { key } => write!(
                f,
                "Cannot add property {}, object is not extensible",
                key
            ),
        }
    }
}

impl Error for PaletteError {}

/// Raised (as a log event, never as an error) when the transparent placeholder
/// base of a palette is rendered as if it were a real color
#[derive(Debug, Diagnostic)]
#[diagnostic(
    code(chromatree::transparent_base),
    severity(Warning),
    help("give the palette an explicit base color")
)]
pub struct TransparentBaseWarning {
    pub hex: String,
}

impl Display for TransparentBaseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "You're attempting to use a transparent base color. This is likely an error."
        )
    }
}

impl Error for TransparentBaseWarning {}

impl PaletteError {
    /// Parse failure spanning the whole input
    pub fn invalid_color(src: impl Into<String>, msg: impl Into<String>) -> Self {
        let src = src.into();
        let err_span = (0, src.len()).into();
        Self::InvalidColor {
            src,
            err_span,
            msg: msg.into(),
        }
    }

    pub fn read_only(key: impl Into<String>) -> Self {
        Self::ReadOnly { key: key.into() }
    }

    pub fn not_extensible(key: impl Into<String>) -> Self {
        Self::NotExtensible { key: key.into() }
    }
}
