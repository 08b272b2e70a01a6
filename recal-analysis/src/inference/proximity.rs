//! Steering line-proximity inference.
//!
//! Some estimates narrate calibration elsewhere in free text:
//! "Steering angle sensor reset required, see Line 14". This pass is
//! deliberately narrow — the pattern alone, nothing fuzzier.

use std::sync::OnceLock;

use regex::Regex;

use recal_core::types::collections::FxHashSet;
use recal_core::types::{CalibrationMatch, MatchSource};

use crate::canonical::SystemClass;

fn steering_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Steering…Line N" within 120 characters, across newlines.
    RE.get_or_init(|| Regex::new(r"(?is)steering.{0,120}?\bline\s+(\d{1,4})\b").unwrap())
}

/// Scan raw text for steering narrative anchored to a line number.
pub fn infer_steering_proximity(raw_text: &str) -> Vec<(u32, CalibrationMatch)> {
    let mut seen_lines: FxHashSet<u32> = FxHashSet::default();
    let mut inferred = Vec::new();

    for captures in steering_line_re().captures_iter(raw_text) {
        let Some(line_number) = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok())
        else {
            continue;
        };
        if !seen_lines.insert(line_number) {
            continue;
        }
        inferred.push((
            line_number,
            CalibrationMatch {
                system_name: SystemClass::SteeringAngle.label().to_string(),
                calibration_type: None,
                reason: format!(
                    "steering calibration narrative references line {line_number}"
                ),
                matched_keyword: "steering".to_string(),
                repair_operation: SystemClass::SteeringAngle.operation().to_string(),
                source: MatchSource::Inferred,
            },
        ));
    }

    inferred
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_anchors_to_named_line() {
        let text = "Note: steering angle sensor relearn required per OEM, see Line 14 above.";
        let inferred = infer_steering_proximity(text);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].0, 14);
        assert_eq!(
            inferred[0].1.repair_operation,
            "Steering Angle Sensor Reset/Relearn"
        );
    }

    #[test]
    fn distance_cap_limits_the_pattern() {
        let filler = "x".repeat(200);
        let text = format!("steering {filler} Line 9");
        assert!(infer_steering_proximity(&text).is_empty());
    }

    #[test]
    fn duplicate_lines_collapse() {
        let text = "steering relearn Line 5\nsteering reset see Line 5";
        assert_eq!(infer_steering_proximity(text).len(), 1);
    }
}
