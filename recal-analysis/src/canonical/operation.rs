//! Canonical operation names.

use std::sync::OnceLock;

use regex::Regex;

use recal_core::types::CanonicalSystem;

use super::{classify, SystemClass};
use crate::normalize::title_case;

/// Map any raw operation label onto its canonical name.
///
/// The raw label is classified first; when it carries no signal (learned
/// placeholders, bare repair text), the system name and matched keyword act
/// as tie-breakers. Free-form labels come back cleaned but unchanged in
/// meaning. Idempotent.
pub fn canonicalize_operation_name(
    raw: &str,
    system_name: &str,
    matched_keyword: &str,
) -> String {
    if let Some(class) = classify(raw) {
        return class.operation().to_string();
    }
    let hint = format!("{system_name} {matched_keyword}");
    if let Some(class) = classify(&hint) {
        return class.operation().to_string();
    }
    title_case(raw.trim())
}

/// The fixed operation for a canonical system; free-form systems use the
/// fallback when it reads like an operation, otherwise synthesize
/// "`<label>` Calibration".
pub fn calibration_operation_for_system(
    system: &CanonicalSystem,
    fallback_operation: &str,
) -> String {
    for class in [
        SystemClass::SteeringAngle,
        SystemClass::BlindSpot,
        SystemClass::Surround,
        SystemClass::RearCamera,
        SystemClass::Parking,
        SystemClass::FrontRadar,
        SystemClass::ForwardCamera,
    ] {
        if system.key == class.key() {
            return class.operation().to_string();
        }
    }

    let fallback = fallback_operation.trim();
    if !fallback.is_empty() && !is_likely_repair_trigger_operation(fallback) {
        fallback.to_string()
    } else {
        format!("{} Calibration", system.label)
    }
}

fn repair_trigger_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(bumper|grille|windshield|mirror|fender|hood|door|panel|quarter|tailgate|liftgate|replace|replacement|remove|removal|repair|refinish|blend|overhaul|install|r&i|r&r|o/h)\b",
        )
        .unwrap()
    })
}

/// True when a string describes the repair that *triggered* a calibration
/// rather than the calibration operation itself.
pub fn is_likely_repair_trigger_operation(operation: &str) -> bool {
    repair_trigger_re().is_match(operation)
}
