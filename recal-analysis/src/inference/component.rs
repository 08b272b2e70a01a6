//! Component/repair-type inference and the ADAS-part guidance table.

use recal_core::types::{AdasPart, AdasPartHit, CalibrationMatch, DetectedRepair, MatchSource, RepairKind};

use crate::canonical::SystemClass;

fn class_for_repair(kind: RepairKind) -> Option<SystemClass> {
    match kind {
        RepairKind::Windshield | RepairKind::Camera | RepairKind::Headlamp => {
            Some(SystemClass::ForwardCamera)
        }
        RepairKind::FrontBumper
        | RepairKind::Grille
        | RepairKind::BumperReinforcement
        | RepairKind::RadarSensor => Some(SystemClass::FrontRadar),
        RepairKind::RearBumper
        | RepairKind::Tailgate
        | RepairKind::QuarterPanel
        | RepairKind::SideMirror => Some(SystemClass::BlindSpot),
        RepairKind::Alignment | RepairKind::Suspension | RepairKind::Steering => {
            Some(SystemClass::SteeringAngle)
        }
        _ => None,
    }
}

/// Synthesize candidate matches from detected repair types, anchored to the
/// repair's line.
pub fn infer_from_repairs(detected: &[DetectedRepair]) -> Vec<(u32, CalibrationMatch)> {
    detected
        .iter()
        .filter_map(|repair| {
            let class = class_for_repair(repair.repair_type)?;
            Some((
                repair.line_number,
                CalibrationMatch {
                    system_name: class.label().to_string(),
                    calibration_type: None,
                    reason: format!(
                        "{} work commonly disturbs the {}",
                        repair.repair_type.label(),
                        class.label()
                    ),
                    matched_keyword: repair.matched_keyword.clone(),
                    repair_operation: class.operation().to_string(),
                    source: MatchSource::Inferred,
                },
            ))
        })
        .collect()
}

struct AdasGuidance {
    system_class: SystemClass,
    calibration_type: &'static str,
    reason: &'static str,
}

/// Fixed per-ADAS-part guidance.
fn guidance_for(part: AdasPart) -> AdasGuidance {
    match part {
        AdasPart::FrontRadar => AdasGuidance {
            system_class: SystemClass::FrontRadar,
            calibration_type: "Static + Dynamic",
            reason: "front radar appears in the estimate; removal or aiming requires calibration",
        },
        AdasPart::FrontCamera => AdasGuidance {
            system_class: SystemClass::ForwardCamera,
            calibration_type: "Static + Dynamic",
            reason: "forward camera appears in the estimate; remounting requires calibration",
        },
        AdasPart::BlindSpotMonitor => AdasGuidance {
            system_class: SystemClass::BlindSpot,
            calibration_type: "Static",
            reason: "blind spot sensor appears in the estimate; bracket or bumper work requires calibration",
        },
        AdasPart::SurroundCamera => AdasGuidance {
            system_class: SystemClass::Surround,
            calibration_type: "Static",
            reason: "surround view camera appears in the estimate; lens position drives stitching accuracy",
        },
        AdasPart::ParkingSensor => AdasGuidance {
            system_class: SystemClass::Parking,
            calibration_type: "Initialization",
            reason: "parking sensors appear in the estimate; replacement requires initialization",
        },
        AdasPart::SteeringAngleSensor => AdasGuidance {
            system_class: SystemClass::SteeringAngle,
            calibration_type: "Initialization",
            reason: "steering angle sensor appears in the estimate; reset/relearn required after disturbance",
        },
        AdasPart::RearCamera => AdasGuidance {
            system_class: SystemClass::RearCamera,
            calibration_type: "Static",
            reason: "rear camera appears in the estimate; reinstallation requires calibration",
        },
    }
}

/// Synthesize candidate matches from ADAS parts spotted in the estimate.
pub fn infer_from_adas_parts(hits: &[AdasPartHit]) -> Vec<(u32, CalibrationMatch)> {
    hits.iter()
        .map(|hit| {
            let guidance = guidance_for(hit.part);
            (
                hit.line_number,
                CalibrationMatch {
                    system_name: guidance.system_class.label().to_string(),
                    calibration_type: Some(guidance.calibration_type.to_string()),
                    reason: guidance.reason.to_string(),
                    matched_keyword: hit.matched_keyword.clone(),
                    repair_operation: guidance.system_class.operation().to_string(),
                    source: MatchSource::Inferred,
                },
            )
        })
        .collect()
}
