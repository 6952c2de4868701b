use std::collections::BTreeMap;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PixeloomError, PixeloomResult};

const BUILTIN_THEMES: &str = include_str!("themes.json");

/// Colors for one progress bar style.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressBarTheme {
    /// Top and left edges of the outer border.
    pub border_topleft: Rgba8,
    /// Bottom and right edges of the outer border.
    pub border_bottomright: Rgba8,
    /// Background fill.
    pub bg: Rgba8,
    /// Background fill shown on the flashing half-cycle.
    pub bg_alt: Rgba8,
    /// Top and left edges of the filled block.
    pub int_topleft: Rgba8,
    /// Bottom and right edges of the filled block.
    pub int_bottomright: Rgba8,
    /// Fill of the block.
    pub int_bg: Rgba8,
}

/// Named progress bar themes.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, ProgressBarTheme>,
}

impl ThemeRegistry {
    /// Registry holding `health`, `endurance` and `melee`.
    pub fn builtin() -> PixeloomResult<Self> {
        Self::from_json(BUILTIN_THEMES)
    }

    /// Parse a JSON object mapping theme names to themes.
    pub fn from_json(json: &str) -> PixeloomResult<Self> {
        let themes: BTreeMap<String, ProgressBarTheme> = serde_json::from_str(json)
            .map_err(|e| PixeloomError::serde(format!("parse theme json: {e}")))?;
        tracing::debug!(count = themes.len(), "loaded progress bar themes");
        Ok(Self { themes })
    }

    /// Look up a theme by name.
    pub fn get(&self, name: &str) -> PixeloomResult<&ProgressBarTheme> {
        self.themes
            .get(name)
            .ok_or_else(|| PixeloomError::theme(format!("unknown progress bar theme '{name}'")))
    }

    /// Add or replace a theme.
    pub fn insert(&mut self, name: impl Into<String>, theme: ProgressBarTheme) {
        self.themes.insert(name.into(), theme);
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/theme.rs"]
mod tests;
