//! VIN decode oracle port.

use crate::errors::OracleError;
use crate::types::VinInfo;

/// Best-effort VIN decoding. Errors and timeouts must degrade to text-based
/// extraction at the call site, never fail a scrub.
pub trait VinDecoder: Send + Sync {
    fn decode(&self, vin: &str) -> Result<VinInfo, OracleError>;
}
