//! The theme preference store.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SlotBackend;
use crate::error::Result;

/// Default slot holding the theme name.
pub const DEFAULT_THEME_KEY: &str = "psg_theme";

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the theme preference and keeps its slot in sync.
#[derive(Debug)]
pub struct ThemeStore<B: SlotBackend> {
    backend: B,
    key: String,
    theme: Theme,
}

impl<B: SlotBackend> ThemeStore<B> {
    /// Open the store on the default slot. Unset or unknown values mean dark.
    pub fn open(backend: B) -> Self {
        Self::open_with_key(backend, DEFAULT_THEME_KEY)
    }

    /// Open the store on a custom slot.
    pub fn open_with_key(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let theme = match backend.read_slot(&key) {
            Ok(Some(raw)) => Theme::from_stored(&raw).unwrap_or_else(|| {
                warn!(slot = %key, value = %raw, "Stored theme is unknown, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(slot = %key, error = %e, "Stored theme is unreadable, using default");
                Theme::default()
            }
        };
        debug!(slot = %key, %theme, "Theme loaded");
        Self {
            backend,
            key,
            theme,
        }
    }

    /// The current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.backend.write_slot(&self.key, theme.as_str())
    }

    /// Switch to the other theme, persist it, and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[test]
    fn test_default_is_dark() {
        let store = ThemeStore::open(MemoryBackend::new());
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_reads_stored_light() {
        let store = ThemeStore::open(MemoryBackend::with_slot(DEFAULT_THEME_KEY, "light"));
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_unknown_value_is_dark() {
        let store = ThemeStore::open(MemoryBackend::with_slot(DEFAULT_THEME_KEY, "sepia"));
        assert_eq!(store.theme(), Theme::Dark);
    }

    struct UnreadableBackend;

    impl SlotBackend for UnreadableBackend {
        fn read_slot(&self, _key: &str) -> Result<Option<String>> {
            Err(crate::error::Error::internal("storage unavailable"))
        }

        fn write_slot(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unreadable_slot_is_dark() {
        crate::logging::init_test_logging();
        let mut store = ThemeStore::open(UnreadableBackend);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.toggle().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let backend = MemoryBackend::new();
        let mut store = ThemeStore::open(&backend);
        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(ThemeStore::open(&backend).theme(), Theme::Light);
        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(ThemeStore::open(&backend).theme(), Theme::Dark);
    }

    #[test]
    fn test_set() {
        let backend = MemoryBackend::new();
        let mut store = ThemeStore::open(&backend);
        store.set(Theme::Light).unwrap();
        assert_eq!(
            backend.read_slot(DEFAULT_THEME_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_theme_independent_of_progress_slot() {
        let backend = MemoryBackend::new();
        let mut theme = ThemeStore::open(&backend);
        theme.set(Theme::Light).unwrap();
        assert!(backend
            .read_slot(crate::store::DEFAULT_PROGRESS_KEY)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
