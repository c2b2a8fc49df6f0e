//! Light/dark theme and its single persisted preference flag.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::FieldError;

/// Preference key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

/// Site color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Particle hue for this theme: a light indigo on dark backgrounds, a
    /// deeper indigo on light ones.
    pub fn particle_hue(self) -> Srgb {
        match self {
            Theme::Dark => Srgb {
                r: 129.0 / 255.0,
                g: 140.0 / 255.0,
                b: 248.0 / 255.0,
            },
            Theme::Light => Srgb {
                r: 99.0 / 255.0,
                g: 102.0 / 255.0,
                b: 241.0 / 255.0,
            },
        }
    }

    /// Page background behind the particle canvas.
    pub fn background(self) -> Srgb {
        match self {
            Theme::Dark => Srgb {
                r: 15.0 / 255.0,
                g: 23.0 / 255.0,
                b: 42.0 / 255.0,
            },
            Theme::Light => Srgb {
                r: 1.0,
                g: 1.0,
                b: 1.0,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(FieldError::UnknownTheme(s.to_string())),
        }
    }
}

/// Key-value store for user preferences (browser `localStorage`, memory).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// Resolves the active theme from a preference store and persists changes.
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Loads the stored theme, falling back to the system preference when the
    /// flag is missing or unreadable.
    pub fn load(store: S, system_prefers_dark: bool) -> Self {
        let fallback = if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        };
        let theme = match store.get(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("{e}; using {fallback}");
                fallback
            }),
            None => fallback,
        };
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme, persists it, and returns the new value.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str());
        log::info!("theme set to {theme}");
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_swaps() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(FieldError::UnknownTheme(_))
        ));
    }

    #[test]
    fn themes_use_distinct_hues() {
        assert_ne!(Theme::Dark.particle_hue(), Theme::Light.particle_hue());
        assert_eq!(Theme::Light.particle_hue().to_hex(), "#6366f1");
        assert_eq!(Theme::Dark.particle_hue().to_hex(), "#818cf8");
    }

    #[test]
    fn backgrounds_differ_from_hues() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_ne!(theme.background(), theme.particle_hue());
        }
        assert_eq!(Theme::Dark.background().to_hex(), "#0f172a");
    }

    #[test]
    fn load_without_stored_flag_follows_system() {
        let c = ThemeController::load(MemoryPreferences::new(), false);
        assert_eq!(c.theme(), Theme::Light);
        let c = ThemeController::load(MemoryPreferences::new(), true);
        assert_eq!(c.theme(), Theme::Dark);
    }

    #[test]
    fn stored_flag_beats_system_preference() {
        let mut store = MemoryPreferences::new();
        store.set(THEME_KEY, "light");
        let c = ThemeController::load(store, true);
        assert_eq!(c.theme(), Theme::Light);
    }

    #[test]
    fn garbage_flag_falls_back_to_system() {
        let mut store = MemoryPreferences::new();
        store.set(THEME_KEY, "purple");
        let c = ThemeController::load(store, true);
        assert_eq!(c.theme(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_flag() {
        let mut c = ThemeController::load(MemoryPreferences::new(), true);
        assert_eq!(c.toggle(), Theme::Light);
        assert_eq!(c.store().get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(c.toggle(), Theme::Dark);
        assert_eq!(c.store().get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn persisted_flag_survives_reload() {
        let mut c = ThemeController::load(MemoryPreferences::new(), true);
        c.toggle();
        let reloaded = ThemeController::load(c.store().clone(), true);
        assert_eq!(reloaded.theme(), Theme::Light);
    }
}
