//! Calibration matches, per-line scrub results, and grouped output rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which pipeline stage produced a match.
///
/// Provenance is a first-class field so later stages never have to re-parse
/// placeholder operation names to learn where a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchSource {
    /// Direct hit against the vehicle's repair→calibration trigger map.
    Rule,
    /// Gap-filling heuristic (repair-type, ADAS-part, or proximity).
    Inferred,
    /// Shop-taught ADD rule.
    Learned,
    /// External text-understanding assist.
    Assist,
}

impl MatchSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Inferred => "inferred",
            Self::Learned => "learned",
            Self::Assist => "assist",
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One calibration recommendation on one line, with full provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationMatch {
    /// Raw, pre-canonical system name.
    pub system_name: String,
    pub calibration_type: Option<String>,
    /// Human-readable audit trail for why this match exists.
    pub reason: String,
    pub matched_keyword: String,
    pub repair_operation: String,
    pub source: MatchSource,
}

/// All matches for a single estimate line.
///
/// Invariant: no two matches share `(system_name, matched_keyword)` after
/// case normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubResult {
    pub line_number: u32,
    pub description: String,
    pub calibration_matches: Vec<CalibrationMatch>,
}

/// One of the fixed canonical systems, or a cleaned free-form fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalSystem {
    /// Stable slug, e.g. `front-radar`.
    pub key: String,
    /// Display name, e.g. `Front Radar / ACC-AEB`.
    pub label: String,
}

impl CanonicalSystem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One row per canonical calibration operation across the whole document.
///
/// Invariant: exactly one `GroupedCalibration` per canonical operation per
/// document; `trigger_lines` is sorted and unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedCalibration {
    pub system_name: String,
    pub calibration_type: Option<String>,
    /// First-seen reason — stable as more matches merge in.
    pub reason: String,
    /// Canonical recommended operation; the grouping key is its normalized
    /// text.
    pub repair_operation: String,
    pub matched_keywords: Vec<String>,
    pub trigger_lines: Vec<u32>,
    pub trigger_descriptions: Vec<String>,
}

/// The vehicle record a scrub resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRef {
    pub id: String,
    pub year_start: u16,
    pub year_end: u16,
    pub make: String,
    pub model: String,
}
