//! SQLite storage bootstrap, schema migration and shared handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for lecturenote core.
//! - Apply the schema migration in deterministic order.
//! - Memoize one process-lifetime connection behind [`Database`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - A failed open is never cached; the next caller retries.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;
pub mod migrations;
mod open;

pub(crate) use handle::lock_connection;
pub use handle::{Database, SharedConnection};
pub use open::{open_db, open_db_in_memory};

/// Fixed database identifier; the file-backed store is `<name>.sqlite3`.
pub const DB_NAME: &str = "lecture-notes-db";

pub type DbResult<T> = Result<T, DbError>;

/// Engine-level failure. Every variant means the store is unusable for the
/// current request.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A previous holder of the shared connection panicked mid-request.
    ConnectionPoisoned,
    /// The blocking worker running the request did not complete.
    WorkerFailed(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ConnectionPoisoned => write!(f, "shared database connection is poisoned"),
            Self::WorkerFailed(details) => write!(f, "storage worker failed: {details}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::ConnectionPoisoned
            | Self::WorkerFailed(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
