//! Gap-fill merge: inferred matches enter only where the rule-based pass
//! produced nothing that canonicalizes to the same operation.

use recal_core::types::collections::{FxHashMap, FxHashSet};
use recal_core::types::{CalibrationMatch, ScrubResult};

use crate::grouping::{operation_key, recommended_operation};

/// Merge inferred candidates into the result set.
///
/// A candidate is added only if no existing match anywhere in the document
/// canonicalizes to the same operation key — inference never duplicates or
/// overrides a direct match. Returns true when anything was added.
pub fn merge_missing_inferred(
    results: &mut Vec<ScrubResult>,
    candidates: Vec<(u32, CalibrationMatch)>,
    line_descriptions: &FxHashMap<u32, String>,
) -> bool {
    let mut existing_keys: FxHashSet<String> = results
        .iter()
        .flat_map(|r| r.calibration_matches.iter())
        .map(|m| operation_key(&recommended_operation(m).1))
        .collect();

    let mut added = false;

    for (line_number, candidate) in candidates {
        let key = operation_key(&recommended_operation(&candidate).1);
        if !existing_keys.insert(key) {
            continue;
        }

        let index = match results.iter().position(|r| r.line_number == line_number) {
            Some(index) => index,
            None => {
                let description = line_descriptions
                    .get(&line_number)
                    .cloned()
                    .unwrap_or_else(|| candidate.reason.clone());
                results.push(ScrubResult {
                    line_number,
                    description,
                    calibration_matches: Vec::new(),
                });
                results.len() - 1
            }
        };
        let result = &mut results[index];

        // Per-line (system, keyword) dedup invariant still holds.
        let dup = result.calibration_matches.iter().any(|m| {
            m.system_name.trim().to_lowercase() == candidate.system_name.trim().to_lowercase()
                && m.matched_keyword.trim().to_lowercase()
                    == candidate.matched_keyword.trim().to_lowercase()
        });
        if !dup {
            result.calibration_matches.push(candidate);
            added = true;
        }
    }

    if added {
        results.sort_by_key(|r| r.line_number);
    }
    added
}
