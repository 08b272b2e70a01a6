//! The rule-based scrubber: trigger-map keyword matching per line.

use recal_core::types::collections::FxHashSet;
use recal_core::types::{CalibrationMatch, MatchSource, RepairLine, ScrubResult, VehicleRecord};

use crate::normalize::is_likely_estimate_operation_line;
use crate::vocab::KeywordPattern;

struct CompiledMapping {
    mapping_index: usize,
    patterns: Vec<KeywordPattern>,
}

/// Match every operation-eligible line against the vehicle's trigger map.
///
/// Every keyword hit adds all of that mapping's triggered systems to the
/// line's match set, deduped by `(system_name, matched_keyword)`.
pub fn scrub_lines(vehicle: &VehicleRecord, lines: &[RepairLine]) -> Vec<ScrubResult> {
    // Compile each mapping's keywords once; they run against every line.
    let compiled: Vec<CompiledMapping> = vehicle
        .trigger_mappings
        .iter()
        .enumerate()
        .map(|(mapping_index, mapping)| CompiledMapping {
            mapping_index,
            patterns: mapping
                .keywords
                .iter()
                .filter_map(|k| KeywordPattern::compile(k))
                .collect(),
        })
        .collect();

    let mut results = Vec::new();

    for line in lines {
        if !is_likely_estimate_operation_line(&line.raw_text) {
            continue;
        }

        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        let mut matches: Vec<CalibrationMatch> = Vec::new();

        for compiled_mapping in &compiled {
            let mapping = &vehicle.trigger_mappings[compiled_mapping.mapping_index];
            for pattern in &compiled_mapping.patterns {
                if !pattern.matches(&line.raw_text) {
                    continue;
                }
                for system in &mapping.triggered_systems {
                    let key = (
                        system.trim().to_lowercase(),
                        pattern.keyword().trim().to_lowercase(),
                    );
                    if !seen.insert(key) {
                        continue;
                    }
                    let calibration_type = vehicle
                        .calibration_type_for(system)
                        .map(str::to_string)
                        .or_else(|| mapping.procedure_type.clone());
                    matches.push(CalibrationMatch {
                        system_name: system.clone(),
                        calibration_type,
                        reason: format!(
                            "'{}' triggers calibration for {}",
                            pattern.keyword(),
                            system
                        ),
                        matched_keyword: pattern.keyword().to_string(),
                        repair_operation: if mapping.repair_operation.trim().is_empty() {
                            mapping
                                .procedure_name
                                .clone()
                                .unwrap_or_else(|| mapping.repair_operation.clone())
                        } else {
                            mapping.repair_operation.clone()
                        },
                        source: MatchSource::Rule,
                    });
                }
            }
        }

        if !matches.is_empty() {
            results.push(ScrubResult {
                line_number: line.line_number,
                description: line.cleaned_text.clone(),
                calibration_matches: matches,
            });
        }
    }

    results
}
