//! Learning-store persistence errors.
//! Hard failures for writes — silently losing a taught correction is worse
//! than failing loudly.

use super::error_code::{self, RecalErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("invalid row: {message}")]
    InvalidRow { message: String },
}

impl RecalErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::STORAGE_NOT_FOUND,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
