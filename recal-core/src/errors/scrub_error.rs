//! Top-level scrub errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::RecalErrorCode;
use super::{ConfigError, InputError, OracleError, StorageError};

/// Errors a full estimate analysis can fail with.
///
/// Oracle failures never surface here during a scrub — they are caught and
/// degraded at the pipeline boundary. The variant exists for callers that
/// talk to oracles directly (e.g. a standalone VIN decode endpoint).
#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RecalErrorCode for ScrubError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
