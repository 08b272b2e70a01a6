//! Vehicle catalog records and oracle response shapes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::collections::FxHashMap;
use super::matches::VehicleRef;

/// One repair→calibration trigger mapping from a vehicle's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerMapping {
    /// Repair keywords that fire this mapping.
    pub keywords: Vec<String>,
    /// Systems requiring calibration when any keyword hits.
    pub triggered_systems: SmallVec<[String; 2]>,
    pub repair_operation: String,
    #[serde(default)]
    pub procedure_type: Option<String>,
    #[serde(default)]
    pub procedure_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tools_required: Vec<String>,
}

/// An ADAS system listed on a vehicle profile, with its calibration type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdasSystemRef {
    pub system_name: String,
    #[serde(default)]
    pub calibration_type: Option<String>,
}

/// A vehicle record supplied by the catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    pub year_start: u16,
    pub year_end: u16,
    pub make: String,
    pub model: String,
    pub trigger_mappings: Vec<TriggerMapping>,
    #[serde(default)]
    pub adas_systems: Vec<AdasSystemRef>,
}

impl VehicleRecord {
    /// Reference view returned with scrub results.
    pub fn vehicle_ref(&self) -> VehicleRef {
        VehicleRef {
            id: self.id.clone(),
            year_start: self.year_start,
            year_end: self.year_end,
            make: self.make.clone(),
            model: self.model.clone(),
        }
    }

    /// Calibration type for a system, looked up case-insensitively.
    pub fn calibration_type_for(&self, system_name: &str) -> Option<&str> {
        let wanted = system_name.trim().to_lowercase();
        self.adas_systems
            .iter()
            .find(|s| s.system_name.trim().to_lowercase() == wanted)
            .and_then(|s| s.calibration_type.as_deref())
    }
}

/// Best-effort VIN decode result. Any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VinInfo {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    #[serde(default)]
    pub adas_features: FxHashMap<String, bool>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Vehicle fields extracted by the external assist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistVehicle {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// One candidate operation from the external assist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistOperation {
    #[serde(default)]
    pub line_number: Option<u32>,
    pub op_code: String,
    pub component: String,
    #[serde(default)]
    pub raw_text: Option<String>,
}

/// Untrusted extraction payload from the external assist.
///
/// Validated and normalized like any other extraction source before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistExtraction {
    pub document_type: String,
    pub confidence: f32,
    #[serde(default)]
    pub vehicle: AssistVehicle,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub operations: Vec<AssistOperation>,
}
