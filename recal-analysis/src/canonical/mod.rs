//! Canonicalization: one fixed name per real-world system, operation, and
//! calibration type, across all textual synonyms.
//!
//! The heart is an ordered classification table. Order is a real invariant:
//! steering and blind-spot checks run before the generic radar/camera checks,
//! or "blind spot radar" would misclassify as front radar.

pub mod calibration_type;
pub mod operation;
pub mod system;

pub use calibration_type::{canonicalize_calibration_type, merge_calibration_types};
pub use operation::{
    calibration_operation_for_system, canonicalize_operation_name,
    is_likely_repair_trigger_operation,
};
pub use system::canonicalize_system;

use std::sync::OnceLock;

use regex::Regex;

/// The seven fixed canonical system classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SystemClass {
    SteeringAngle,
    BlindSpot,
    Surround,
    RearCamera,
    Parking,
    FrontRadar,
    ForwardCamera,
}

impl SystemClass {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::SteeringAngle => "steering-angle-sensor",
            Self::BlindSpot => "blind-spot-radar",
            Self::Surround => "surround-view-camera",
            Self::RearCamera => "rear-camera",
            Self::Parking => "parking-sensor",
            Self::FrontRadar => "front-radar",
            Self::ForwardCamera => "forward-camera",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::SteeringAngle => "Steering Angle Sensor",
            Self::BlindSpot => "Blind Spot Radar / BSM-RCTA",
            Self::Surround => "Surround View Camera / AVM",
            Self::RearCamera => "Rear Camera / Backup",
            Self::Parking => "Parking Sensors / Ultrasonic",
            Self::FrontRadar => "Front Radar / ACC-AEB",
            Self::ForwardCamera => "Forward Camera / LDW-LKA",
        }
    }

    /// The one fixed operation name for this class.
    pub(crate) fn operation(self) -> &'static str {
        match self {
            Self::SteeringAngle => "Steering Angle Sensor Reset/Relearn",
            Self::BlindSpot => "Blind Spot Radar Calibration",
            Self::Surround => "Surround View Camera Calibration",
            Self::RearCamera => "Rear Camera Calibration",
            Self::Parking => "Parking Sensor Calibration",
            Self::FrontRadar => "Front Radar Calibration",
            Self::ForwardCamera => "Forward Camera Calibration",
        }
    }
}

struct ClassRule {
    class: SystemClass,
    pattern: Regex,
}

/// The ordered `{predicate → class}` table. Evaluated top to bottom; the
/// first hit wins.
fn class_rules() -> &'static [ClassRule] {
    static RULES: OnceLock<Vec<ClassRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let table: &[(SystemClass, &str)] = &[
            (
                SystemClass::SteeringAngle,
                r"(?i)steering|\bsas\b|angle\s+sensor",
            ),
            (
                SystemClass::BlindSpot,
                r"(?i)blind\s*spot|blindspot|\bbsm\b|\bblis\b|rear\s*cross|cross[\s-]*traffic|\brcta\b|side\s*radar|corner\s*radar",
            ),
            (
                SystemClass::Surround,
                r"(?i)surround|\b360\b|around\s*view|birds?\s*eye|\bavm\b",
            ),
            (
                SystemClass::RearCamera,
                r"(?i)(?:rear|back\s*up|backup|reverse)[\s\w]*camera",
            ),
            (
                SystemClass::Parking,
                r"(?i)park(?:ing)?\s*(?:sensor|assist|aid|distance)|ultrasonic|\bpdc\b|\bsonar\b",
            ),
            (
                SystemClass::FrontRadar,
                r"(?i)radar|\bacc\b|\baeb\b|adaptive\s*cruise|collision\s*(?:avoidance|mitigation)|distance\s*sensor",
            ),
            (
                SystemClass::ForwardCamera,
                r"(?i)camera|\blkas?\b|\bldw\b|lane\s*(?:keep|departure|watch)",
            ),
        ];
        table
            .iter()
            .map(|(class, pattern)| ClassRule {
                class: *class,
                pattern: Regex::new(pattern).expect("class rule pattern is valid"),
            })
            .collect()
    })
}

/// Classify free text onto a fixed system class, or `None` for free-form.
pub(crate) fn classify(text: &str) -> Option<SystemClass> {
    class_rules()
        .iter()
        .find(|r| r.pattern.is_match(text))
        .map(|r| r.class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steering_wins_over_generic_sensor_terms() {
        assert_eq!(classify("steering angle sensor reset"), Some(SystemClass::SteeringAngle));
        assert_eq!(classify("SAS calibration"), Some(SystemClass::SteeringAngle));
    }

    #[test]
    fn blind_spot_wins_over_radar() {
        // Order sensitivity: this string also contains "radar".
        assert_eq!(classify("blind spot radar calibration"), Some(SystemClass::BlindSpot));
        assert_eq!(classify("rear cross traffic radar"), Some(SystemClass::BlindSpot));
    }

    #[test]
    fn surround_and_rear_win_over_generic_camera() {
        assert_eq!(classify("surround view camera"), Some(SystemClass::Surround));
        assert_eq!(classify("360 camera system"), Some(SystemClass::Surround));
        assert_eq!(classify("backup camera aiming"), Some(SystemClass::RearCamera));
    }

    #[test]
    fn radar_and_camera_generics_last() {
        assert_eq!(classify("front radar / acc-aeb"), Some(SystemClass::FrontRadar));
        assert_eq!(classify("windshield camera"), Some(SystemClass::ForwardCamera));
        assert_eq!(classify("millimeter wave module"), None);
    }
}
