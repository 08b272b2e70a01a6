//! Learning engine behavior against the in-memory store.

use recal_analysis::learning::{apply_learning_rules, InMemoryLearningStore};
use recal_analysis::normalize::tokenize_estimate;
use recal_core::config::LearningConfig;
use recal_core::traits::LearningStore;
use recal_core::types::{
    CalibrationMatch, LearningAction, LearningRuleDraft, MatchSource, ScrubResult,
};

fn draft(action: LearningAction, keyword: &str, system: &str, weight: f64) -> LearningRuleDraft {
    LearningRuleDraft {
        shop_id: "shop-1".to_string(),
        action,
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        year_start: 2020,
        year_end: 2024,
        keyword: keyword.to_string(),
        system_name: system.to_string(),
        calibration_type: None,
        reason: "taught".to_string(),
        confidence_weight: weight,
        created_at: 1_700_000_000,
    }
}

fn front_radar_result(line: u32) -> ScrubResult {
    ScrubResult {
        line_number: line,
        description: "Front Bumper Cover - Overhaul".to_string(),
        calibration_matches: vec![CalibrationMatch {
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: None,
            reason: "'front bumper' triggers calibration for Front Radar / ACC-AEB".to_string(),
            matched_keyword: "front bumper".to_string(),
            repair_operation: "Front Radar Calibration".to_string(),
            source: MatchSource::Rule,
        }],
    }
}

#[test]
fn suppress_is_idempotent_across_passes() {
    let store = InMemoryLearningStore::new();
    let rule = store
        .upsert_rule(&draft(
            LearningAction::Suppress,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.9,
        ))
        .unwrap();
    let config = LearningConfig::default();
    let lines = tokenize_estimate("6 O/H Front Bumper Cover");

    let first = apply_learning_rules(
        &store,
        &config,
        &lines,
        2022,
        "Toyota",
        "Camry",
        "shop-1",
        vec![front_radar_result(6)],
        1_700_000_100,
    )
    .unwrap();
    assert!(first.results.is_empty());
    assert_eq!(first.applied_rule_ids, vec![rule.id.clone()]);

    // Applying the same suppression to the already-suppressed set is a
    // no-op with an empty delta, not an error.
    let second = apply_learning_rules(
        &store,
        &config,
        &lines,
        2022,
        "Toyota",
        "Camry",
        "shop-1",
        first.results,
        1_700_000_200,
    )
    .unwrap();
    assert!(second.applied_rule_ids.is_empty());
    assert!(second.results.is_empty());

    // Usage was recorded exactly once.
    let rules = store.rules_for_shop("shop-1").unwrap();
    assert_eq!(rules[0].usage_count, 1);
    assert_eq!(rules[0].last_applied_at, Some(1_700_000_100));
}

#[test]
fn low_weight_rules_never_apply() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&draft(
            LearningAction::Suppress,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.15,
        ))
        .unwrap();
    let lines = tokenize_estimate("6 O/H Front Bumper Cover");

    let outcome = apply_learning_rules(
        &store,
        &LearningConfig::default(),
        &lines,
        2022,
        "Toyota",
        "Camry",
        "shop-1",
        vec![front_radar_result(6)],
        1_700_000_100,
    )
    .unwrap();
    assert!(outcome.applied_rule_ids.is_empty());
    assert_eq!(outcome.results.len(), 1);
}

#[test]
fn vehicle_scope_is_enforced() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&draft(
            LearningAction::Suppress,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.9,
        ))
        .unwrap();
    let lines = tokenize_estimate("6 O/H Front Bumper Cover");
    let config = LearningConfig::default();

    // Wrong year.
    let outcome = apply_learning_rules(
        &store, &config, &lines, 2019, "Toyota", "Camry", "shop-1",
        vec![front_radar_result(6)], 0,
    )
    .unwrap();
    assert!(outcome.applied_rule_ids.is_empty());

    // Wrong model.
    let outcome = apply_learning_rules(
        &store, &config, &lines, 2022, "Toyota", "Corolla", "shop-1",
        vec![front_radar_result(6)], 0,
    )
    .unwrap();
    assert!(outcome.applied_rule_ids.is_empty());
}

#[test]
fn add_rule_respects_existing_pair_but_still_counts_new_lines() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&draft(
            LearningAction::Add,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.8,
        ))
        .unwrap();
    let lines = tokenize_estimate("6 O/H Front Bumper Cover\n7 Rpr front bumper bracket");
    let config = LearningConfig::default();

    // Line 6 already carries the (system, keyword) pair — first writer
    // wins for display text. Line 7 has no match yet, so the rule adds one
    // there and counts as applied.
    let outcome = apply_learning_rules(
        &store, &config, &lines, 2022, "Toyota", "Camry", "shop-1",
        vec![front_radar_result(6)], 0,
    )
    .unwrap();
    assert_eq!(outcome.applied_rule_ids.len(), 1);
    assert_eq!(outcome.results.len(), 2);

    let line6 = outcome.results.iter().find(|r| r.line_number == 6).unwrap();
    assert_eq!(line6.calibration_matches[0].source, MatchSource::Rule);
    let line7 = outcome.results.iter().find(|r| r.line_number == 7).unwrap();
    assert_eq!(line7.calibration_matches[0].source, MatchSource::Learned);
}

#[test]
fn mixed_add_and_suppress_let_suppress_win() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&draft(
            LearningAction::Add,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.8,
        ))
        .unwrap();
    store
        .upsert_rule(&draft(
            LearningAction::Suppress,
            "front bumper",
            "Front Radar / ACC-AEB",
            0.8,
        ))
        .unwrap();
    let lines = tokenize_estimate("6 O/H Front Bumper Cover");

    let outcome = apply_learning_rules(
        &store,
        &LearningConfig::default(),
        &lines,
        2022,
        "Toyota",
        "Camry",
        "shop-1",
        Vec::new(),
        0,
    )
    .unwrap();
    // The ADD fires first, then the SUPPRESS removes what it added.
    assert_eq!(outcome.applied_rule_ids.len(), 2);
    assert!(outcome.results.is_empty());
}
