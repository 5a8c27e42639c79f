//! Light/dark theme preference and its color palette.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::LocalStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Stored preference; anything other than a valid theme means light.
    pub fn load(store: &LocalStore) -> Self {
        store.get(THEME_KEY).unwrap_or_default()
    }

    pub fn persist(&self, store: &mut LocalStore) -> Result<()> {
        store.set(THEME_KEY, self)
    }

    pub fn palette(self) -> Palette {
        palette(self)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ThemePreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn grey(level: u8) -> Self {
        Self { r: level, g: level, b: level }
    }
}

/// Foreground/background pair for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Colors for every surface the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub page: Swatch,
    pub card: Swatch,
    pub button: Swatch,
    pub forecast_cell: Swatch,
    pub muted: Rgb,
}

pub fn palette(theme: ThemePreference) -> Palette {
    let white = Rgb::grey(0xff);
    let black = Rgb::grey(0x00);

    match theme {
        ThemePreference::Light => Palette {
            page: Swatch { background: white, foreground: black },
            card: Swatch { background: white, foreground: black },
            button: Swatch { background: Rgb::grey(0xe5), foreground: black },
            forecast_cell: Swatch { background: Rgb::grey(0xf0), foreground: black },
            muted: Rgb::grey(0x66),
        },
        ThemePreference::Dark => Palette {
            page: Swatch { background: black, foreground: white },
            card: Swatch { background: Rgb::grey(0x33), foreground: white },
            button: Swatch { background: Rgb::grey(0x55), foreground: white },
            forecast_cell: Swatch { background: Rgb::grey(0x44), foreground: white },
            muted: Rgb::grey(0xaa),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn toggle_flips_between_two_states() {
        assert_eq!(ThemePreference::Light.toggle(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggle(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggle().toggle(), ThemePreference::Light);
    }

    #[test]
    fn theme_parse_roundtrip() {
        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(ThemePreference::try_from(theme.as_str()).expect("parse"), theme);
        }
        assert_eq!(ThemePreference::try_from("DARK").expect("parse"), ThemePreference::Dark);
        assert!(ThemePreference::try_from("sepia").is_err());
    }

    #[test]
    fn palettes_contrast_text_with_background() {
        let light = palette(ThemePreference::Light);
        assert_eq!(light.page.background, Rgb::grey(0xff));
        assert_eq!(light.page.foreground, Rgb::grey(0x00));

        let dark = ThemePreference::Dark.palette();
        assert_eq!(dark.page.background, Rgb::grey(0x00));
        assert_eq!(dark.card.background, Rgb::grey(0x33));
        assert_eq!(dark.forecast_cell.foreground, Rgb::grey(0xff));
    }

    #[test]
    fn persisted_theme_is_reloaded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open(&path);
        ThemePreference::Dark.persist(&mut store).expect("persist");

        assert_eq!(ThemePreference::load(&LocalStore::open(&path)), ThemePreference::Dark);
        let raw = fs::read_to_string(&path).expect("read");
        assert!(raw.contains(r#""theme": "dark""#));
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_light() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"theme": "sepia"}"#).expect("write");

        assert_eq!(ThemePreference::load(&LocalStore::open(&path)), ThemePreference::Light);
    }
}
