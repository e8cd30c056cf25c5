//! The progress store.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::SlotBackend;
use crate::document::ChecklistItem;
use crate::error::Result;

/// Default slot holding the serialized progress map.
pub const DEFAULT_PROGRESS_KEY: &str = "psg_progress_v1";

/// Completion state keyed by item identity.
///
/// Only `true` entries are kept: an absent key and a `false` value mean the
/// same thing, and storing just one form makes a double toggle an exact
/// no-op.
pub type ProgressMap = BTreeMap<String, bool>;

/// Owns the progress map and keeps its slot in sync.
#[derive(Debug)]
pub struct ProgressStore<B: SlotBackend> {
    backend: B,
    key: String,
    progress: ProgressMap,
}

impl<B: SlotBackend> ProgressStore<B> {
    /// Open the store on the default slot.
    ///
    /// Never fails: a missing, unreadable or malformed slot yields an empty
    /// map.
    pub fn open(backend: B) -> Self {
        Self::open_with_key(backend, DEFAULT_PROGRESS_KEY)
    }

    /// Open the store on a custom slot.
    pub fn open_with_key(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let progress = match backend.read_slot(&key) {
            Ok(Some(raw)) => match parse(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(slot = %key, error = %e, "Stored progress is malformed, starting empty");
                    ProgressMap::new()
                }
            },
            Ok(None) => ProgressMap::new(),
            Err(e) => {
                warn!(slot = %key, error = %e, "Stored progress is unreadable, starting empty");
                ProgressMap::new()
            }
        };
        debug!(slot = %key, done = progress.len(), "Progress loaded");

        Self {
            backend,
            key,
            progress,
        }
    }

    /// The current progress map.
    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    /// Whether the identity is marked done.
    #[must_use]
    pub fn is_done(&self, id: &str) -> bool {
        crate::summary::is_done(&self.progress, id)
    }

    /// Number of identities marked done.
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.progress.len()
    }

    /// Flip an item's state and persist. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails. The in-memory change is kept.
    pub fn toggle(&mut self, item: &ChecklistItem) -> Result<bool> {
        self.toggle_id(&item.id)
    }

    /// Flip the state stored under a raw identity and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails. The in-memory change is kept.
    pub fn toggle_id(&mut self, id: &str) -> Result<bool> {
        let now_done = if self.progress.remove(id).is_some() {
            false
        } else {
            self.progress.insert(id.to_string(), true);
            true
        };
        debug!(id = %id, done = now_done, "Item toggled");
        self.persist()?;
        Ok(now_done)
    }

    /// Clear all progress and persist the empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails. The map is cleared regardless.
    pub fn reset(&mut self) -> Result<()> {
        let cleared = self.progress.len();
        self.progress.clear();
        info!(cleared, "Progress reset");
        self.persist()
    }

    /// Serialize the map as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.progress)?)
    }

    /// Replace the map with a previously exported dump and persist it.
    ///
    /// Returns the number of identities marked done after the import.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the dump is not a JSON object of
    /// booleans; the current map is left untouched in that case.
    pub fn import(&mut self, json: &str) -> Result<usize> {
        self.progress = parse(json)?;
        info!(done = self.progress.len(), "Progress imported");
        self.persist()?;
        Ok(self.progress.len())
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.progress)?;
        self.backend.write_slot(&self.key, &raw).map_err(|e| {
            warn!(slot = %self.key, error = %e, "Failed to persist progress");
            e
        })
    }
}

fn parse(raw: &str) -> Result<ProgressMap> {
    let mut map: ProgressMap = serde_json::from_str(raw)?;
    map.retain(|_, done| *done);
    Ok(map)
}
