//! SQLite storage bootstrap for the to-do store.
//!
//! # Responsibility
//! - Open connections that already carry the `todo_items` schema.
//! - Report schema mismatches and failed migration steps distinctly.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - No item data is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The store was written by a newer build than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// A migration step failed; nothing from the pending batch was kept.
    MigrationFailed {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "to-do store schema version {found} is newer than supported {supported}"
            ),
            Self::MigrationFailed {
                version,
                name,
                source,
            } => write!(f, "to-do store migration {version} ({name}) failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
