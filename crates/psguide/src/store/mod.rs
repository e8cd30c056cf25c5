//! Persisted user state: checklist progress and the theme preference.
//!
//! Both stores are explicit handles over an injected [`SlotBackend`]. They read
//! their slot once when opened and write it back after every mutation.
//!
//! # Example
//!
//! ```
//! use psguide::store::{MemoryBackend, ProgressStore, ThemeStore, Theme};
//!
//! let backend = MemoryBackend::new();
//! let mut progress = ProgressStore::open(&backend);
//! assert!(progress.toggle_id("authentication__enable-2fa")?);
//!
//! // A second handle over the same backend sees the persisted state.
//! let reopened = ProgressStore::open(&backend);
//! assert!(reopened.is_done("authentication__enable-2fa"));
//!
//! let theme = ThemeStore::open(&backend);
//! assert_eq!(theme.theme(), Theme::Dark);
//! # Ok::<(), psguide::Error>(())
//! ```

mod progress;
mod theme;

use std::cell::RefCell;
use std::collections::HashMap;

pub use progress::{ProgressMap, ProgressStore, DEFAULT_PROGRESS_KEY};
pub use theme::{Theme, ThemeStore, DEFAULT_THEME_KEY};

use crate::error::Result;

/// A named-slot key-value store.
pub trait SlotBackend {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: SlotBackend + ?Sized> SlotBackend for &T {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        (**self).write_slot(key, value)
    }
}

/// In-process backend, used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with one slot.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        backend
    }
}

impl SlotBackend for MemoryBackend {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
