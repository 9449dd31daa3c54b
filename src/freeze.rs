//! Palette specs and their frozen form.
//!
//! A [`PaletteSpec`] is the only mutable view of a palette. Construction freezes
//! it into a [`Palette`], which has no mutating methods at all; the `try_*`
//! methods exist so that an attempted mutation fails observably instead of
//! silently.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    color::Color,
    error::{PaletteError, PaletteResult},
};

/// Key every palette resolves, explicitly or to its owner
pub const BASE_KEY: &str = "base";

/// Turns a mutable value into its immutable counterpart, once
pub trait Freeze {
    type Frozen;

    fn freeze(self) -> Self::Frozen;
}

/// Mutable description of a palette, consumed by [`Color::from_palette`]
#[derive(Debug, Clone, Default)]
pub struct PaletteSpec {
    base: Option<Arc<Color>>,
    entries: BTreeMap<String, Arc<Color>>,
}

impl PaletteSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base color
    pub fn base(mut self, color: impl Into<Arc<Color>>) -> Self {
        self.base = Some(color.into());
        self
    }

    /// Add a named color; the key `base` sets the base
    pub fn entry(mut self, key: impl Into<String>, color: impl Into<Arc<Color>>) -> Self {
        self.insert(key, color);
        self
    }

    /// Insert a named color, returning the one it replaced
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        color: impl Into<Arc<Color>>,
    ) -> Option<Arc<Color>> {
        let key = key.into();
        if key == BASE_KEY {
            self.base.replace(color.into())
        } else {
            self.entries.insert(key, color.into())
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<Color>> {
        if key == BASE_KEY {
            self.base.take()
        } else {
            self.entries.remove(key)
        }
    }

    pub fn base_color(&self) -> Option<&Arc<Color>> {
        self.base.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Color>> {
        if key == BASE_KEY {
            self.base.as_ref()
        } else {
            self.entries.get(key)
        }
    }
}

impl<K: Into<String>, C: Into<Arc<Color>>> FromIterator<(K, C)> for PaletteSpec {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (key, color) in iter {
            spec.insert(key, color);
        }
        spec
    }
}

// Entries are `Color`s, which only exist already frozen, so freezing the spec
// freezes the whole reachable tree.
impl Freeze for PaletteSpec {
    type Frozen = Palette;

    fn freeze(self) -> Palette {
        Palette {
            base: self.base,
            entries: self.entries,
        }
    }
}

/// Frozen named children of a [`Color`]
///
/// `base()` is `None` when the owning color is its own base.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    base: Option<Arc<Color>>,
    entries: BTreeMap<String, Arc<Color>>,
}

impl Palette {
    pub fn base(&self) -> Option<&Arc<Color>> {
        self.base.as_ref()
    }

    /// Explicit entries, `base` included when it was given
    pub fn get(&self, key: &str) -> Option<&Arc<Color>> {
        if key == BASE_KEY {
            self.base.as_ref()
        } else {
            self.entries.get(key)
        }
    }

    /// `base` is always present, explicitly or through the owner
    pub fn contains_key(&self, key: &str) -> bool {
        key == BASE_KEY || self.entries.contains_key(key)
    }

    /// `base` first, then the named entries in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(BASE_KEY).chain(self.entries.keys().map(String::as_str))
    }

    /// Named entries, excluding `base`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Color>)> {
        self.entries.iter().map(|(key, color)| (key.as_str(), color))
    }

    /// Number of keys, counting `base`
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Always fails: existing keys are read-only and new keys cannot be added
    pub fn try_assign(&self, key: &str, _color: impl Into<Arc<Color>>) -> PaletteResult<()> {
        if self.contains_key(key) {
            Err(PaletteError::read_only(key))
        } else {
            Err(PaletteError::not_extensible(key))
        }
    }

    /// Always fails: existing keys are read-only, missing keys were never there
    pub fn try_remove(&self, key: &str) -> PaletteResult<Arc<Color>> {
        if self.contains_key(key) {
            Err(PaletteError::read_only(key))
        } else {
            Err(PaletteError::not_extensible(key))
        }
    }
}
