//! Error types for psguide.
//!
//! This module defines all error types used throughout the psguide crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for psguide operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Document Errors ===
    /// The checklist document could not be read.
    #[error("unable to load checklist data from {path}: {source}")]
    DocumentRead {
        /// Path to the document.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The checklist document is not valid YAML.
    #[error("unable to parse checklist data: {0}")]
    DocumentParse(#[from] serde_yaml::Error),

    /// The checklist document parsed, but its top level is not a sequence.
    #[error("checklist file is not in the expected format: expected a sequence of sections, found {found}")]
    DocumentShape {
        /// What was found at the top level instead.
        found: &'static str,
    },

    /// A node inside the checklist document violates the schema.
    #[error("invalid checklist entry at {path}: {message}")]
    DocumentSchema {
        /// Location of the offending node, e.g. `[2].checklist[4].point`.
        path: String,
        /// Description of the violation.
        message: String,
    },

    /// A priority name is not one of the known tiers.
    #[error("unknown priority '{value}' (expected essential, optional or advanced)")]
    UnknownPriority {
        /// The rejected value, trimmed and lowercased.
        value: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Lookup Errors ===
    /// No section carries the requested slug.
    #[error("no section with slug '{slug}'")]
    SectionNotFound {
        /// The slug that was requested.
        slug: String,
    },

    /// No item in the section matches the requested point or identity.
    #[error("no item matching '{query}' in section '{section}'")]
    ItemNotFound {
        /// Slug of the section that was searched.
        section: String,
        /// The point text or identity that was requested.
        query: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for psguide operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a schema violation error for the node at `path`.
    #[must_use]
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentSchema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an item lookup error.
    #[must_use]
    pub fn item_not_found(section: impl Into<String>, query: impl Into<String>) -> Self {
        Self::ItemNotFound {
            section: section.into(),
            query: query.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from loading the checklist document.
    #[must_use]
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentRead { .. }
                | Self::DocumentParse(_)
                | Self::DocumentShape { .. }
                | Self::DocumentSchema { .. }
        )
    }

    /// Check if this error is a failed section or item lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SectionNotFound { .. } | Self::ItemNotFound { .. }
        )
    }
}
