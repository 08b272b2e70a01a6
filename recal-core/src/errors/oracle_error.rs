//! External-oracle errors (VIN decode, vehicle catalog, assist).
//! Always caught at the pipeline boundary and degraded, never rethrown
//! through a scrub.

use super::error_code::{self, RecalErrorCode};

/// A collaborator outside the core failed or misbehaved.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("{oracle} unavailable: {message}")]
    Unavailable { oracle: String, message: String },

    #[error("{oracle} timed out after {timeout_ms}ms")]
    Timeout { oracle: String, timeout_ms: u64 },

    #[error("{oracle} returned an invalid response: {message}")]
    InvalidResponse { oracle: String, message: String },
}

impl RecalErrorCode for OracleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::ORACLE_UNAVAILABLE,
            Self::Timeout { .. } => error_code::ORACLE_TIMEOUT,
            Self::InvalidResponse { .. } => error_code::ORACLE_INVALID_RESPONSE,
        }
    }
}
