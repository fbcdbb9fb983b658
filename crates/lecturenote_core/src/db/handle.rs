//! Lazily opened, process-lifetime database handle.
//!
//! # Responsibility
//! - Open the configured store on first demand and hand the same connection
//!   to every later caller.
//!
//! # Invariants
//! - The engine is initialized at most once per successful open.
//! - Open failures are returned to the caller and not memoized.
//! - The handle is never torn down explicitly; it lives as long as the
//!   `Database` value (and its clones of the connection) do.

use super::open::{open_db, open_db_in_memory};
use super::{DbError, DbResult};
use crate::config::StoreLocation;
use log::debug;
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Connection shared by every in-flight store operation.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Guarded one-shot factory for the shared connection.
pub struct Database {
    location: StoreLocation,
    conn: OnceCell<SharedConnection>,
}

impl Database {
    /// Creates an unopened handle; nothing touches the engine yet.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Returns whether a previous call already opened the engine.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Returns the shared connection, opening and migrating it on first use.
    ///
    /// Blocks while the first open runs; concurrent first callers wait for
    /// the same initialization.
    pub fn connection(&self) -> DbResult<SharedConnection> {
        let conn = self.conn.get_or_try_init(|| {
            debug!("event=db_handle_init module=db status=start");
            let conn = match &self.location {
                StoreLocation::File(path) => open_db(path)?,
                StoreLocation::Memory => open_db_in_memory()?,
            };
            Ok::<_, DbError>(Arc::new(Mutex::new(conn)))
        })?;
        Ok(Arc::clone(conn))
    }
}

/// Locks the shared connection, mapping poisoning to an engine error.
pub(crate) fn lock_connection(conn: &SharedConnection) -> DbResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| DbError::ConnectionPoisoned)
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::config::StoreLocation;
    use crate::db::DbError;
    use std::sync::Arc;

    #[test]
    fn connection_is_memoized() {
        let db = Database::new(StoreLocation::Memory);
        assert!(!db.is_open());

        let first = db.connection().unwrap();
        let second = db.connection().unwrap();
        assert!(db.is_open());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_open_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let db = Database::new(StoreLocation::File(dir.path().to_path_buf()));

        let first = db.connection();
        assert!(matches!(first, Err(DbError::Sqlite(_))));
        assert!(!db.is_open());

        let second = db.connection();
        assert!(second.is_err());
        assert!(!db.is_open());
    }
}
