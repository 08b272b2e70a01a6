//! Parsed estimate lines and vehicle-independent repair detections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation class recovered from the leading token of an estimate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// R&I — remove and install (same part goes back on).
    RemoveInstall,
    /// R&R / Repl — remove and replace with a new part.
    RemoveReplace,
    /// Rpr — repair in place.
    Repair,
    /// Refn — refinish/paint.
    Refinish,
    /// Blend into adjacent panels.
    Blend,
    /// O/H — overhaul an assembly.
    Overhaul,
    /// Anything else (sublet, add, aim, align, section header, ...).
    Other,
}

impl OperationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RemoveInstall => "R&I",
            Self::RemoveReplace => "R&R",
            Self::Repair => "Repair",
            Self::Refinish => "Refinish",
            Self::Blend => "Blend",
            Self::Overhaul => "O/H",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One kept line of an estimate, immutable once parsed.
///
/// `line_number` is the estimate-native line id when the line starts with a
/// numeric token, otherwise the 1-based position among kept lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairLine {
    pub line_number: u32,
    pub raw_text: String,
    pub cleaned_text: String,
    pub operation_type: OperationType,
}

/// Generic repair-type buckets detected without any vehicle data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairKind {
    FrontBumper,
    RearBumper,
    BumperReinforcement,
    Grille,
    Windshield,
    SideMirror,
    Headlamp,
    Tailgate,
    Hood,
    Fender,
    QuarterPanel,
    Door,
    Roof,
    Alignment,
    Suspension,
    Steering,
    Structural,
    RadarSensor,
    Camera,
    Calibration,
}

impl RepairKind {
    /// Display label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontBumper => "Front Bumper",
            Self::RearBumper => "Rear Bumper",
            Self::BumperReinforcement => "Bumper Reinforcement",
            Self::Grille => "Grille",
            Self::Windshield => "Windshield",
            Self::SideMirror => "Side Mirror",
            Self::Headlamp => "Headlamp",
            Self::Tailgate => "Tailgate",
            Self::Hood => "Hood",
            Self::Fender => "Fender",
            Self::QuarterPanel => "Quarter Panel",
            Self::Door => "Door",
            Self::Roof => "Roof",
            Self::Alignment => "Alignment",
            Self::Suspension => "Suspension",
            Self::Steering => "Steering",
            Self::Structural => "Structural",
            Self::RadarSensor => "Radar Sensor",
            Self::Camera => "Camera",
            Self::Calibration => "Calibration",
        }
    }
}

impl fmt::Display for RepairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A repair-type detection on one line, surfaced even when no vehicle
/// calibration profile exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedRepair {
    pub line_number: u32,
    pub repair_type: RepairKind,
    pub description: String,
    pub matched_keyword: String,
}

/// ADAS hardware the vocabulary matcher can spot directly in estimate text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdasPart {
    FrontRadar,
    FrontCamera,
    BlindSpotMonitor,
    SurroundCamera,
    ParkingSensor,
    SteeringAngleSensor,
    RearCamera,
}

impl AdasPart {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontRadar => "Front Radar",
            Self::FrontCamera => "Front Camera",
            Self::BlindSpotMonitor => "Blind Spot Monitor",
            Self::SurroundCamera => "Surround View Camera",
            Self::ParkingSensor => "Parking Sensor",
            Self::SteeringAngleSensor => "Steering Angle Sensor",
            Self::RearCamera => "Rear Camera",
        }
    }
}

impl fmt::Display for AdasPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ADAS part mentioned on a specific estimate line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdasPartHit {
    pub part: AdasPart,
    pub line_number: u32,
    pub matched_keyword: String,
}
