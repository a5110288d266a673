use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key of the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read a stored value. Missing or unrecognised values mean light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the theme preference lives (browser `localStorage` in the app).
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    fn load_theme(&self) -> Theme {
        Theme::from_stored(self.get(THEME_STORAGE_KEY).as_deref())
    }

    /// Flip the stored theme and return the new one.
    fn toggle_theme(&mut self) -> Theme {
        let next = self.load_theme().toggle();
        self.set(THEME_STORAGE_KEY, next.as_str());
        tracing::debug!("Theme switched to {next}");
        next
    }
}

/// In-memory store, for tests and non-browser targets.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<String>,
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        (key == THEME_STORAGE_KEY).then(|| self.value.clone()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if key == THEME_STORAGE_KEY {
            self.value = Some(value.to_string());
        }
    }
}
