//! Deduplication of per-line matches into grouped calibration rows.

use recal_core::types::collections::FxHashMap;
use recal_core::types::{CalibrationMatch, CanonicalSystem, GroupedCalibration, ScrubResult};

use crate::canonical::{
    calibration_operation_for_system, canonicalize_operation_name, canonicalize_system,
    merge_calibration_types,
};

/// Canonical system and final recommended operation for one match.
pub fn recommended_operation(m: &CalibrationMatch) -> (CanonicalSystem, String) {
    let canonical_name =
        canonicalize_operation_name(&m.repair_operation, &m.system_name, &m.matched_keyword);
    let system = canonicalize_system(&m.system_name, &canonical_name);
    let operation = calibration_operation_for_system(&system, &canonical_name);
    (system, operation)
}

/// Normalized grouping key for a recommended operation.
pub fn operation_key(operation: &str) -> String {
    operation
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

struct GroupAccumulator {
    group: GroupedCalibration,
    raw_types: Vec<String>,
    min_line: u32,
}

/// Group every match across every result into one row per canonical
/// operation.
///
/// First occurrence seeds the row and pins its reason; later occurrences
/// union keywords, trigger lines, and descriptions, and the calibration
/// type is re-merged. Output order is deterministic regardless of input
/// order: minimum trigger line ascending, system label as tiebreak.
pub fn group_calibrations(results: &[ScrubResult]) -> Vec<GroupedCalibration> {
    let mut groups: FxHashMap<String, GroupAccumulator> = FxHashMap::default();

    // Process in line order so "first occurrence" is well-defined even if
    // the caller hands results in arbitrary order.
    let mut ordered: Vec<&ScrubResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.line_number);

    for result in ordered {
        for m in &result.calibration_matches {
            let (system, operation) = recommended_operation(m);
            let key = operation_key(&operation);

            let entry = groups.entry(key).or_insert_with(|| GroupAccumulator {
                group: GroupedCalibration {
                    system_name: system.label.clone(),
                    calibration_type: None,
                    reason: m.reason.clone(),
                    repair_operation: operation.clone(),
                    matched_keywords: Vec::new(),
                    trigger_lines: Vec::new(),
                    trigger_descriptions: Vec::new(),
                },
                raw_types: Vec::new(),
                min_line: result.line_number,
            });

            entry.min_line = entry.min_line.min(result.line_number);
            push_unique_text(&mut entry.group.matched_keywords, &m.matched_keyword);
            push_unique_text(&mut entry.group.trigger_descriptions, &result.description);
            if !entry.group.trigger_lines.contains(&result.line_number) {
                entry.group.trigger_lines.push(result.line_number);
            }
            if let Some(raw_type) = &m.calibration_type {
                if !raw_type.trim().is_empty() {
                    entry.raw_types.push(raw_type.clone());
                }
            }
        }
    }

    let mut rows: Vec<(u32, GroupedCalibration)> = groups
        .into_values()
        .map(|mut acc| {
            acc.group.trigger_lines.sort_unstable();
            if !acc.raw_types.is_empty() {
                let merged = merge_calibration_types(&acc.raw_types);
                acc.group.calibration_type = (!merged.is_empty()).then_some(merged);
            }
            (acc.min_line, acc.group)
        })
        .collect();

    rows.sort_by(|(line_a, group_a), (line_b, group_b)| {
        line_a
            .cmp(line_b)
            .then_with(|| group_a.system_name.cmp(&group_b.system_name))
    });
    rows.into_iter().map(|(_, group)| group).collect()
}

/// Push `value` unless an entry with the same normalized text exists.
fn push_unique_text(list: &mut Vec<String>, value: &str) {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return;
    }
    if !list.iter().any(|v| v.trim().to_lowercase() == normalized) {
        list.push(value.to_string());
    }
}
