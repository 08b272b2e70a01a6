//! Versioned schema migrations, applied in order via `user_version`.

pub mod v001_learning;

use rusqlite::Connection;
use tracing::debug;

use recal_core::errors::StorageError;

use crate::connection::sqlite_error;

const MIGRATIONS: &[(i64, &str)] = &[(1, v001_learning::MIGRATION_SQL)];

/// Apply every migration newer than the database's `user_version`.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(sqlite_error)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        debug!(version, "applying schema migration");
        conn.execute_batch(sql).map_err(sqlite_error)?;
        // PRAGMA does not accept bound parameters.
        conn.execute_batch(&format!("PRAGMA user_version = {version}"))
            .map_err(sqlite_error)?;
    }
    Ok(())
}
