//! Database migration system for psguide.
//!
//! The schema version lives in the metadata table. Each pending migration
//! runs in its own transaction together with the version bump.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, MIGRATIONS};

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// The schema version this build expects.
#[must_use]
pub fn current_version() -> i32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Bring the database schema up to [`current_version`].
///
/// # Errors
///
/// Returns an error if the stored version is unreadable or newer than this
/// build understands, or if a migration fails.
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let from = schema_version(conn)?;
    let target = current_version();
    if from > target {
        return Err(Error::DatabaseMigration {
            message: format!("database schema version {from} is newer than supported {target}"),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > from) {
        debug!(
            version = migration.version,
            "Applying migration: {}", migration.description
        );
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        set_schema_version(&tx, migration.version)?;
        tx.commit()?;
    }

    if from < target {
        info!(from, to = target, "Database schema migrated");
    }
    Ok(())
}

/// Read the stored schema version. A fresh database is version 0.
///
/// # Errors
///
/// Returns an error if the stored value is not an integer.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(v) => v.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {v}"),
        }),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
