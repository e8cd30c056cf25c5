//! `psguide` - A personal security checklist with local progress tracking
//!
//! This library loads the checklist document, derives filtered views and
//! completion summaries from it, and persists which items the user has
//! completed.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod logging;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::Config;
pub use document::{ChecklistItem, Document, Priority, Section};
pub use error::{Error, Result};
pub use filter::{filter_sections, Filter, SectionView};
pub use logging::init_logging;
pub use storage::{Storage, StorageStats};
pub use store::{MemoryBackend, ProgressMap, ProgressStore, SlotBackend, Theme, ThemeStore};
pub use summary::{Completion, Overview, PrioritySummary};
