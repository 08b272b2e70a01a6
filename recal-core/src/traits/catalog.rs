//! Vehicle catalog lookup port.

use crate::errors::OracleError;
use crate::types::VehicleRecord;

/// Supplies vehicle records (trigger maps + ADAS systems) for a make and
/// model year. The pipeline treats the result as a read-only snapshot for
/// the duration of one scrub.
pub trait VehicleCatalog: Send + Sync {
    /// All records whose year range covers `year` and whose make plausibly
    /// matches. Loose matching is fine — the scrubber re-verifies make and
    /// picks the model itself.
    fn find_vehicles(&self, year: u16, make: &str) -> Result<Vec<VehicleRecord>, OracleError>;
}
