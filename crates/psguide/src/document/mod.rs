//! The checklist document: sections, items, and item identities.
//!
//! A [`Document`] is produced once by [`Document::load`] or
//! [`Document::from_yaml_str`] and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use psguide::document::{Document, Priority};
//!
//! let doc = Document::from_yaml_str(
//!     "- title: Authentication\n  slug: authentication\n  checklist:\n    - point: Enable 2FA\n      priority: Essential\n",
//! )?;
//!
//! let item = doc.find_item("authentication", "enable 2fa")?;
//! assert_eq!(item.id, "authentication__enable-2fa");
//! assert_eq!(item.priority, Priority::Essential);
//! # Ok::<(), psguide::Error>(())
//! ```

mod identity;
mod loader;
mod model;

pub use identity::{item_identity, slugify, IdentityAllocator, IDENTITY_SEPARATOR};
pub use model::{ChecklistItem, Document, Priority, Section};
