//! Error handling for RECAL.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod oracle_error;
pub mod scrub_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::RecalErrorCode;
pub use input_error::InputError;
pub use oracle_error::OracleError;
pub use scrub_error::ScrubError;
pub use storage_error::StorageError;
