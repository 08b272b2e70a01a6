//! Repair-type and ADAS-part detection over tokenized lines.

use recal_core::types::collections::FxHashSet;
use recal_core::types::{AdasPartHit, DetectedRepair, RepairKind, RepairLine};

use super::patterns::repair_patterns;
use crate::normalize::is_likely_estimate_operation_line;
use crate::vocab::VocabularyMatcher;

/// Classify operation-eligible lines into generic repair-type buckets.
///
/// Two signals are unioned per line: the ordered REPAIR_PATTERNS regex
/// table, then the vocabulary category keyword sets, which carry synonyms
/// and abbreviations the regex table does not. Each bucket fires at most
/// once per line; front-bumper catch-alls yield to an explicit rear hit.
pub fn detect_repairs(lines: &[RepairLine], vocab: &VocabularyMatcher) -> Vec<DetectedRepair> {
    let mut detected = Vec::new();

    for line in lines {
        if !is_likely_estimate_operation_line(&line.raw_text) {
            continue;
        }
        let mut kinds_on_line: FxHashSet<RepairKind> = FxHashSet::default();

        for pattern in repair_patterns() {
            if kinds_on_line.contains(&pattern.kind) {
                continue;
            }
            if pattern.generic && has_bumper_kind(&kinds_on_line) {
                continue;
            }
            if let Some(m) = pattern.regex.find(&line.raw_text) {
                kinds_on_line.insert(pattern.kind);
                detected.push(DetectedRepair {
                    line_number: line.line_number,
                    repair_type: pattern.kind,
                    description: line.cleaned_text.clone(),
                    matched_keyword: m.as_str().to_lowercase(),
                });
            }
        }

        for (kind, keyword) in vocab.repair_categories(&line.raw_text) {
            if kinds_on_line.contains(&kind) {
                continue;
            }
            // Vocabulary front-bumper synonyms include unqualified covers;
            // an explicit rear hit wins.
            if kind == RepairKind::FrontBumper
                && kinds_on_line.contains(&RepairKind::RearBumper)
            {
                continue;
            }
            kinds_on_line.insert(kind);
            detected.push(DetectedRepair {
                line_number: line.line_number,
                repair_type: kind,
                description: line.cleaned_text.clone(),
                matched_keyword: keyword.to_string(),
            });
        }
    }

    detected
}

fn has_bumper_kind(kinds: &FxHashSet<RepairKind>) -> bool {
    kinds.contains(&RepairKind::FrontBumper) || kinds.contains(&RepairKind::RearBumper)
}

/// ADAS parts mentioned anywhere in the estimate, deduped per (line, part).
pub fn detect_adas_parts(lines: &[RepairLine], vocab: &VocabularyMatcher) -> Vec<AdasPartHit> {
    let mut hits = Vec::new();
    for line in lines {
        if !is_likely_estimate_operation_line(&line.raw_text) {
            continue;
        }
        for (part, keyword) in vocab.adas_parts(&line.raw_text) {
            hits.push(AdasPartHit {
                part,
                line_number: line.line_number,
                matched_keyword: keyword.to_string(),
            });
        }
    }
    hits
}
