//! `SQLite` schema definitions for psguide.
//!
//! The metadata table always exists; everything else is created by the
//! ordered [`MIGRATIONS`] list.

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// SQL statement to create the slots table.
///
/// Each row is one named slot (progress map, theme, ...).
pub const CREATE_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// One schema step.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Version the schema is at after this step.
    pub version: i32,
    /// Short description for logs.
    pub description: &'static str,
    /// Statements to execute, as a batch.
    pub sql: &'static str,
}

/// All migrations, ordered by version with no gaps.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create slots table",
    sql: CREATE_SLOTS_TABLE,
}];
