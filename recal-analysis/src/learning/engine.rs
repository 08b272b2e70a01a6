//! Application of taught ADD/SUPPRESS rules to a scrubbed result set.

use tracing::debug;

use recal_core::config::LearningConfig;
use recal_core::errors::StorageError;
use recal_core::traits::LearningStore;
use recal_core::types::collections::FxHashSet;
use recal_core::types::{
    CalibrationMatch, LearningAction, LearningRule, MatchSource, RepairLine, ScrubResult,
};

use crate::scrub::{normalize_make, normalize_model};
use crate::vocab::KeywordPattern;

/// Result of one learning pass.
#[derive(Debug)]
pub struct LearningOutcome {
    pub results: Vec<ScrubResult>,
    /// Ids of every rule that caused any mutation, each at most once.
    pub applied_rule_ids: Vec<String>,
}

/// Apply a shop's taught rules to the result set.
///
/// ADD rules append a synthetic match where the line hits the rule keyword
/// and no equivalent `(system, keyword)` match exists; SUPPRESS rules remove
/// every match for their system on hit lines, regardless of which stage
/// produced it. All ADDs run before all SUPPRESSes so a suppression always
/// has the last word. Rules that mutated anything get their usage recorded
/// in one transaction.
pub fn apply_learning_rules(
    store: &dyn LearningStore,
    config: &LearningConfig,
    lines: &[RepairLine],
    vehicle_year: u16,
    vehicle_make: &str,
    vehicle_model: &str,
    shop_id: &str,
    results: Vec<ScrubResult>,
    applied_at: i64,
) -> Result<LearningOutcome, StorageError> {
    let mut results = results;
    let rules = store.rules_for_shop(shop_id)?;

    let mut applicable: Vec<&LearningRule> = rules
        .iter()
        .filter(|rule| {
            rule.confidence_weight >= config.min_apply_weight
                && rule_matches_vehicle(rule, vehicle_year, vehicle_make, vehicle_model)
        })
        .collect();
    // ADDs before SUPPRESSes, then by id: deterministic, suppress-wins.
    applicable.sort_by_key(|rule| (rule.action == LearningAction::Suppress, rule.id.clone()));

    let mut applied: FxHashSet<String> = FxHashSet::default();

    for rule in applicable {
        let Some(pattern) = KeywordPattern::compile(&rule.keyword) else {
            continue;
        };
        for line in lines {
            if !pattern.matches(&line.raw_text) {
                continue;
            }
            let mutated = match rule.action {
                LearningAction::Add => apply_add(&mut results, rule, line),
                LearningAction::Suppress => apply_suppress(&mut results, rule, line.line_number),
            };
            if mutated {
                applied.insert(rule.id.clone());
            }
        }
    }

    if !applied.is_empty() {
        let mut applied_rule_ids: Vec<String> = applied.into_iter().collect();
        applied_rule_ids.sort();
        store.record_usage(&applied_rule_ids, applied_at)?;
        debug!(rules = applied_rule_ids.len(), "learning rules applied");

        // Suppression can empty a line out entirely.
        results.retain(|r| !r.calibration_matches.is_empty());
        results.sort_by_key(|r| r.line_number);
        return Ok(LearningOutcome {
            results,
            applied_rule_ids,
        });
    }

    Ok(LearningOutcome {
        results,
        applied_rule_ids: Vec::new(),
    })
}

fn rule_matches_vehicle(rule: &LearningRule, year: u16, make: &str, model: &str) -> bool {
    if year < rule.year_start || year > rule.year_end {
        return false;
    }
    if normalize_make(&rule.make) != normalize_make(make) {
        return false;
    }
    rule.is_all_models() || normalize_model(&rule.model) == normalize_model(model)
}

fn apply_add(results: &mut Vec<ScrubResult>, rule: &LearningRule, line: &RepairLine) -> bool {
    let index = match results.iter().position(|r| r.line_number == line.line_number) {
        Some(index) => index,
        None => {
            results.push(ScrubResult {
                line_number: line.line_number,
                description: line.cleaned_text.clone(),
                calibration_matches: Vec::new(),
            });
            results.len() - 1
        }
    };
    let result = &mut results[index];

    let system_key = rule.system_name.trim().to_lowercase();
    let keyword_key = rule.keyword.trim().to_lowercase();
    let exists = result.calibration_matches.iter().any(|m| {
        m.system_name.trim().to_lowercase() == system_key
            && m.matched_keyword.trim().to_lowercase() == keyword_key
    });
    if exists {
        return false;
    }

    result.calibration_matches.push(CalibrationMatch {
        system_name: rule.system_name.clone(),
        calibration_type: rule.calibration_type.clone(),
        reason: format!("{} (learned rule)", rule.reason),
        matched_keyword: rule.keyword.clone(),
        repair_operation: "Learned Manual Operation".to_string(),
        source: MatchSource::Learned,
    });
    true
}

fn apply_suppress(results: &mut [ScrubResult], rule: &LearningRule, line_number: u32) -> bool {
    let Some(result) = results.iter_mut().find(|r| r.line_number == line_number) else {
        return false;
    };
    let system_key = rule.system_name.trim().to_lowercase();
    let before = result.calibration_matches.len();
    result
        .calibration_matches
        .retain(|m| m.system_name.trim().to_lowercase() != system_key);
    result.calibration_matches.len() != before
}
