//! Input validation errors. Surfaced to the caller, never retried.

use super::error_code::{self, RecalErrorCode};

/// The submitted document cannot be scrubbed.
///
/// Messages are actionable: they tell the user what to upload instead.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("estimate text is empty — upload the original repair estimate")]
    EmptyText,

    #[error("estimate text is {size} bytes (limit {limit}) — upload the estimate pages only")]
    TooLarge { size: usize, limit: usize },

    #[error(
        "this document looks like a generated calibration report (score {score}) — \
         upload the original estimate, not a calibration report"
    )]
    GeneratedReport { score: u32 },
}

impl RecalErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyText => error_code::INPUT_EMPTY,
            Self::TooLarge { .. } => error_code::INPUT_TOO_LARGE,
            Self::GeneratedReport { .. } => error_code::INPUT_GENERATED_REPORT,
        }
    }
}
