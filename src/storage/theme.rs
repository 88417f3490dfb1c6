use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{VizError, VizResult};
use crate::storage::kv::KeyValueStore;

pub const THEME_KEY: &str = "appTheme";

/// User-selected appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Concrete appearance. Rendering has no desktop preference to follow, so `System` is dark.
    pub fn resolved(self) -> Theme {
        match self {
            Self::System => Self::Dark,
            other => other,
        }
    }

    pub fn palette(self) -> Palette {
        match self.resolved() {
            Self::Light => Palette::light(),
            _ => Palette::dark(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(VizError::validation(format!(
                "unknown theme '{other}' (expected light, dark or system)"
            ))),
        }
    }
}

/// Colours used by the scenes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgba8,
    pub panel: Rgba8,
    pub panel_border: Rgba8,
    pub foreground: Rgba8,
    pub muted: Rgba8,
    pub primary: Rgba8,
    pub accent: Rgba8,
    pub destructive: Rgba8,
    pub warning: Rgba8,
    pub info: Rgba8,
    pub merged: Rgba8,
    pub code_bg: Rgba8,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Rgba8::hex(0x0f1320),
            panel: Rgba8::hex(0x1a2033),
            panel_border: Rgba8::hex(0x2c3550),
            foreground: Rgba8::hex(0xf1f4fa),
            muted: Rgba8::hex(0x9aa4bd),
            primary: Rgba8::hex(0x7c8cff),
            accent: Rgba8::hex(0x3ddc97),
            destructive: Rgba8::hex(0xf05252),
            warning: Rgba8::hex(0xeab308),
            info: Rgba8::hex(0x3b82f6),
            merged: Rgba8::hex(0xa855f7),
            code_bg: Rgba8::hex(0x131827),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Rgba8::hex(0xeef1f8),
            panel: Rgba8::hex(0xffffff),
            panel_border: Rgba8::hex(0xd5dae6),
            foreground: Rgba8::hex(0x141a2b),
            muted: Rgba8::hex(0x5b6478),
            primary: Rgba8::hex(0x4353e0),
            accent: Rgba8::hex(0x16a06a),
            destructive: Rgba8::hex(0xd92d2d),
            warning: Rgba8::hex(0xca8a04),
            info: Rgba8::hex(0x2563eb),
            merged: Rgba8::hex(0x9333ea),
            code_bg: Rgba8::hex(0xf7f8fc),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}

/// Theme preference kept under [`THEME_KEY`].
pub struct ThemeStore<S> {
    store: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored theme; missing or unrecognised values read as [`Theme::System`].
    pub fn get(&self) -> VizResult<Theme> {
        let raw = self.store.get(THEME_KEY)?;
        Ok(match raw {
            None => Theme::System,
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %s, "ignoring unrecognised stored theme");
                Theme::System
            }),
        })
    }

    pub fn set(&mut self, theme: Theme) -> VizResult<()> {
        self.store.set(THEME_KEY, theme.as_str().to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/theme.rs"]
mod tests;
