//! Connection pragmas.

use rusqlite::Connection;

use recal_core::errors::StorageError;

use super::sqlite_error;

/// WAL for concurrent readers, NORMAL sync, and a busy timeout so a second
/// process backs off instead of failing immediately.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(sqlite_error)
}
