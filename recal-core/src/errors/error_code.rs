//! Stable machine-readable error codes.

pub const INPUT_EMPTY: &str = "INPUT_EMPTY";
pub const INPUT_TOO_LARGE: &str = "INPUT_TOO_LARGE";
pub const INPUT_GENERATED_REPORT: &str = "INPUT_GENERATED_REPORT";
pub const ORACLE_UNAVAILABLE: &str = "ORACLE_UNAVAILABLE";
pub const ORACLE_TIMEOUT: &str = "ORACLE_TIMEOUT";
pub const ORACLE_INVALID_RESPONSE: &str = "ORACLE_INVALID_RESPONSE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORAGE_NOT_FOUND: &str = "STORAGE_NOT_FOUND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Every RECAL error carries a stable code for API-layer mapping.
pub trait RecalErrorCode {
    fn error_code(&self) -> &'static str;
}
