//! Connection management: one write-serialized connection.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use recal_core::errors::StorageError;

use self::pragmas::apply_pragmas;
use crate::migrations;

/// Serializes all access through a single connection. The learning store is
/// small and write-heavy relative to its read volume, so one serialized
/// connection is the whole concurrency story: per-shop upserts and batch
/// usage increments cannot interleave.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sqlite_error)?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqlite_error)?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Execute an operation with the serialized connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

pub(crate) fn sqlite_error(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}
