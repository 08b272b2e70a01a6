//! REPAIR_PATTERNS — the ordered repair-type regex table.

use std::sync::OnceLock;

use regex::Regex;

use recal_core::types::RepairKind;

pub(crate) struct RepairPattern {
    pub kind: RepairKind,
    pub regex: Regex,
    /// Generic catch-all entries yield to any specific hit of the same
    /// panel family earlier in the table.
    pub generic: bool,
}

/// Ordered table; specific patterns before generic ones.
pub(crate) fn repair_patterns() -> &'static [RepairPattern] {
    static PATTERNS: OnceLock<Vec<RepairPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let table: &[(RepairKind, &str, bool)] = &[
            (
                RepairKind::BumperReinforcement,
                r"(?i)\b(?:bumper\s+)?reinforcement\b|\bimpact\s+bar\b|\brebar\b",
                false,
            ),
            (
                RepairKind::RearBumper,
                r"(?i)\b(?:rear|rr|back)\s+(?:bumper|fascia|cover)\b",
                false,
            ),
            (
                RepairKind::FrontBumper,
                r"(?i)\b(?:front|frt|fr)\s+(?:bumper|fascia)\b",
                false,
            ),
            (RepairKind::Grille, r"(?i)\bgrille?\b", false),
            (RepairKind::Windshield, r"(?i)\bwindshield\b|\bwindscreen\b|\bw/shield\b", false),
            (
                RepairKind::SideMirror,
                r"(?i)\b(?:side|door|outside|o/s|power)\s+mirror\b|\bmirror\s+assembly\b",
                false,
            ),
            (RepairKind::Headlamp, r"(?i)\bhead\s?lamp\b|\bheadlight\b", false),
            (
                RepairKind::Tailgate,
                r"(?i)\btail\s?gate\b|\blift\s?gate\b|\bdeck\s?lid\b|\btrunk\s+lid\b",
                false,
            ),
            (RepairKind::Hood, r"(?i)\bhood\b|\bbonnet\b", false),
            (RepairKind::Fender, r"(?i)\bfender\b|\bwing\s+panel\b", false),
            (
                RepairKind::QuarterPanel,
                r"(?i)\b(?:quarter|qtr)\s+panel\b|\brear\s+quarter\b|\bbedside\b",
                false,
            ),
            (
                RepairKind::Door,
                r"(?i)\b(?:front|rear)\s+door\b|\bdoor\s+(?:shell|assembly|skin)\b",
                false,
            ),
            (RepairKind::Roof, r"(?i)\broof\b|\bsunroof\b", false),
            (
                RepairKind::Alignment,
                r"(?i)\b(?:wheel|four\s+wheel|4\s+wheel)?\s*alignment\b|\balign\b",
                false,
            ),
            (
                RepairKind::Suspension,
                r"(?i)\bsuspension\b|\bstrut\b|\bcontrol\s+arm\b|\bknuckle\b|\bsubframe\b|\bcrossmember\b",
                false,
            ),
            (
                RepairKind::Steering,
                r"(?i)\bsteering\b|\btie\s+rod\b",
                false,
            ),
            (
                RepairKind::Structural,
                r"(?i)\bframe\s+rail\b|\bcore\s+support\b|\bradiator\s+support\b|\bapron\b|\bunibody\b|\bpillar\b",
                false,
            ),
            (
                RepairKind::RadarSensor,
                r"(?i)\bradar\b|\bdistance\s+sensor\b|\bacc\s+sensor\b|\bcollision\s+sensor\b",
                false,
            ),
            (
                RepairKind::Camera,
                r"(?i)\bcamera\b",
                false,
            ),
            (
                RepairKind::Calibration,
                r"(?i)\bcalibrat\w*\b|\brecalibrat\w*\b|\baiming\b|\btarget\s+set\b|\badas\b",
                false,
            ),
            // Bare "bumper" with no front/rear qualifier reads as front.
            (RepairKind::FrontBumper, r"(?i)\bbumper\b", true),
        ];
        table
            .iter()
            .map(|(kind, pattern, generic)| RepairPattern {
                kind: *kind,
                regex: Regex::new(pattern).expect("repair pattern is valid"),
                generic: *generic,
            })
            .collect()
    })
}
