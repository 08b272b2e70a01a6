//! External text-understanding assist port.

use crate::errors::OracleError;
use crate::types::AssistExtraction;

/// Optional capability: an external model that extracts candidate operations
/// from raw estimate text.
///
/// Absence (no client configured) is a normal silent no-op path. The
/// implementor enforces the configured timeout budget; the pipeline treats
/// any error as "assist unavailable" and continues.
pub trait AssistClient: Send + Sync {
    /// `Ok(None)` means the assist ran but had nothing to offer.
    fn assist_extract(
        &self,
        text: &str,
        file_name: Option<&str>,
    ) -> Result<Option<AssistExtraction>, OracleError>;
}
