//! End-to-end pipeline tests over injected fakes.

use recal_analysis::learning::InMemoryLearningStore;
use recal_analysis::pipeline::{AnalysisRequest, EstimateAnalyzer};
use recal_core::errors::{OracleError, ScrubError, StorageError};
use recal_core::traits::{AssistClient, LearningStore, VehicleCatalog, VinDecoder};
use recal_core::types::{
    AdasSystemRef, AssistExtraction, AssistOperation, AssistVehicle, LearningAction,
    LearningEvent, LearningRule, LearningRuleDraft, MatchSource, NewLearningEvent,
    TriggerMapping, VehicleRecord, VinInfo,
};
use smallvec::smallvec;

struct StaticCatalog(Vec<VehicleRecord>);

impl VehicleCatalog for StaticCatalog {
    fn find_vehicles(&self, _year: u16, _make: &str) -> Result<Vec<VehicleRecord>, OracleError> {
        Ok(self.0.clone())
    }
}

struct NoVin;

impl VinDecoder for NoVin {
    fn decode(&self, _vin: &str) -> Result<VinInfo, OracleError> {
        Err(OracleError::Unavailable {
            oracle: "vin".to_string(),
            message: "not configured".to_string(),
        })
    }
}

struct FailingStore;

impl LearningStore for FailingStore {
    fn rules_for_shop(&self, _shop_id: &str) -> Result<Vec<LearningRule>, StorageError> {
        Err(StorageError::Sqlite {
            message: "connection refused".to_string(),
        })
    }
    fn upsert_rule(&self, _draft: &LearningRuleDraft) -> Result<LearningRule, StorageError> {
        Err(StorageError::Sqlite {
            message: "connection refused".to_string(),
        })
    }
    fn record_usage(&self, _rule_ids: &[String], _applied_at: i64) -> Result<(), StorageError> {
        Ok(())
    }
    fn append_event(&self, _event: &NewLearningEvent) -> Result<LearningEvent, StorageError> {
        Err(StorageError::Sqlite {
            message: "connection refused".to_string(),
        })
    }
    fn review_event(
        &self,
        _event_id: i64,
        _approved: bool,
        _reviewed_at: i64,
    ) -> Result<Option<LearningEvent>, StorageError> {
        Ok(None)
    }
    fn event(&self, _event_id: i64) -> Result<Option<LearningEvent>, StorageError> {
        Ok(None)
    }
}

fn camry() -> VehicleRecord {
    VehicleRecord {
        id: "toyota-camry-22".to_string(),
        year_start: 2021,
        year_end: 2024,
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        trigger_mappings: vec![TriggerMapping {
            keywords: vec!["front bumper".to_string()],
            triggered_systems: smallvec!["Front Radar / ACC-AEB".to_string()],
            repair_operation: "Front Radar Calibration".to_string(),
            procedure_type: None,
            procedure_name: None,
            location: None,
            tools_required: Vec::new(),
        }],
        adas_systems: vec![AdasSystemRef {
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: Some("Static + Dynamic".to_string()),
        }],
    }
}

fn analyzer_with(store: Box<dyn LearningStore>) -> EstimateAnalyzer {
    EstimateAnalyzer::new(
        Box::new(StaticCatalog(vec![camry()])),
        Box::new(NoVin),
        store,
    )
}

fn request(text: &str, shop: Option<&str>) -> AnalysisRequest {
    AnalysisRequest {
        estimate_text: text.to_string(),
        file_name: None,
        vin: None,
        year: Some(2022),
        make: Some("Toyota".to_string()),
        model: Some("Camry".to_string()),
        shop_id: shop.map(str::to_string),
    }
}

// ---- Scenario A: direct trigger-map hit ----

#[test]
fn direct_match_on_native_line_number() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    let report = analyzer
        .analyze(&request("6 O/H Front Bumper Cover", None))
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].line_number, 6);
    let m = &report.results[0].calibration_matches[0];
    assert_eq!(m.system_name, "Front Radar / ACC-AEB");
    assert!(m.reason.contains("triggers calibration"));
    assert_eq!(m.source, MatchSource::Rule);

    assert_eq!(report.grouped.len(), 1);
    assert_eq!(report.grouped[0].repair_operation, "Front Radar Calibration");
    assert_eq!(report.grouped[0].trigger_lines, vec![6]);
}

// ---- Scenario B: unknown make is a valid empty result ----

#[test]
fn unknown_make_yields_empty_results_with_detections() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    let report = analyzer
        .analyze(&AnalysisRequest {
            make: Some("Zonda".to_string()),
            ..request("6 O/H Front Bumper Cover\n7 Repl grille", None)
        })
        .unwrap();

    assert!(report.vehicle.is_none());
    assert!(report.results.is_empty());
    assert!(report.grouped.is_empty());
    // The caller still has something to show.
    assert!(!report.detected_repairs.is_empty());
}

// ---- Scenario C: inference fills the gap the rule pass missed ----

#[test]
fn windshield_gap_is_filled_by_inference() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    let report = analyzer.analyze(&request("3 Repl windshield", None)).unwrap();

    assert!(report.diagnostics.used_inference_fallback);
    assert_eq!(report.grouped.len(), 1);
    assert_eq!(report.grouped[0].system_name, "Forward Camera / LDW-LKA");
    assert_eq!(report.grouped[0].trigger_lines, vec![3]);
    assert_eq!(
        report.results[0].calibration_matches[0].source,
        MatchSource::Inferred
    );
    assert!(report
        .confidence
        .reasons
        .iter()
        .any(|r| r.contains("inference fallback")));
}

#[test]
fn inference_never_overrides_direct_match() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    // Line 6 produces a direct front-radar match; the front-bumper repair
    // detection would infer the same operation and must be swallowed.
    let report = analyzer
        .analyze(&request("6 O/H Front Bumper Cover", None))
        .unwrap();

    assert_eq!(report.grouped.len(), 1);
    let sources: Vec<MatchSource> = report
        .results
        .iter()
        .flat_map(|r| r.calibration_matches.iter())
        .map(|m| m.source)
        .collect();
    assert_eq!(sources, vec![MatchSource::Rule]);
}

// ---- Scenario D: a taught SUPPRESS removes the direct match ----

#[test]
fn suppress_rule_removes_direct_match() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&LearningRuleDraft {
            shop_id: "shop-1".to_string(),
            action: LearningAction::Suppress,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year_start: 2022,
            year_end: 2022,
            keyword: "front bumper".to_string(),
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: None,
            reason: "shop confirmed no radar on this trim".to_string(),
            confidence_weight: 0.9,
            created_at: 1_700_000_000,
        })
        .unwrap();
    let analyzer = analyzer_with(Box::new(store));

    let report = analyzer
        .analyze(&request("6 O/H Front Bumper Cover", Some("shop-1")))
        .unwrap();

    assert_eq!(report.applied_rule_ids.len(), 1);
    // Learning runs after inference, so the suppression has the last word
    // and the emptied line is dropped.
    assert!(report.results.is_empty());
    assert!(report.grouped.is_empty());
}

#[test]
fn add_rule_appends_learned_match() {
    let store = InMemoryLearningStore::new();
    store
        .upsert_rule(&LearningRuleDraft {
            shop_id: "shop-1".to_string(),
            action: LearningAction::Add,
            make: "Toyota".to_string(),
            model: "All Models".to_string(),
            year_start: 2020,
            year_end: 2025,
            keyword: "tow hook cover".to_string(),
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: Some("Static".to_string()),
            reason: "radar aim shifts when the tow hook cover is disturbed".to_string(),
            confidence_weight: 0.8,
            created_at: 1_700_000_000,
        })
        .unwrap();
    let analyzer = analyzer_with(Box::new(store));

    let report = analyzer
        .analyze(&request("4 Repl tow hook cover", Some("shop-1")))
        .unwrap();

    assert_eq!(report.applied_rule_ids.len(), 1);
    let learned: Vec<_> = report
        .results
        .iter()
        .flat_map(|r| r.calibration_matches.iter())
        .filter(|m| m.source == MatchSource::Learned)
        .collect();
    assert_eq!(learned.len(), 1);
    assert!(learned[0].reason.ends_with("(learned rule)"));
    assert_eq!(learned[0].repair_operation, "Learned Manual Operation");
    // Grouping still lands on the canonical operation.
    assert!(report
        .grouped
        .iter()
        .any(|g| g.repair_operation == "Front Radar Calibration"));
}

// ---- §7: learning store failure hands back pre-learning results ----

#[test]
fn learning_failure_keeps_pre_learning_results() {
    let analyzer = analyzer_with(Box::new(FailingStore));
    let report = analyzer
        .analyze(&request("6 O/H Front Bumper Cover", Some("shop-1")))
        .unwrap();

    assert!(report.applied_rule_ids.is_empty());
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.grouped.len(), 1);
}

// ---- InputError surfaces ----

#[test]
fn generated_report_is_rejected() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    let text = "ADAS Calibration Report\nProcedure Type: Static\n\
                Recommended Calibrations for Line 4, Line 6, Line 9, Line 12";
    let err = analyzer.analyze(&request(text, None)).unwrap_err();
    assert!(matches!(err, ScrubError::Input(_)));
}

// ---- Assist pass ----

struct GrilleAssist;

impl AssistClient for GrilleAssist {
    fn assist_extract(
        &self,
        _text: &str,
        _file_name: Option<&str>,
    ) -> Result<Option<AssistExtraction>, OracleError> {
        Ok(Some(AssistExtraction {
            document_type: "estimate".to_string(),
            confidence: 0.85,
            vehicle: AssistVehicle::default(),
            metadata: serde_json::Value::Null,
            operations: vec![AssistOperation {
                line_number: Some(9),
                op_code: "Repl".to_string(),
                component: "front bumper reinforcement".to_string(),
                raw_text: None,
            }],
        }))
    }
}

#[test]
fn assist_extends_rule_results_when_strictly_better() {
    let analyzer =
        analyzer_with(Box::new(InMemoryLearningStore::new())).with_assist(Box::new(GrilleAssist));
    // The raw text itself has no trigger keyword; the assist op does.
    let report = analyzer.analyze(&request("1 Repl headlamp assembly", None)).unwrap();

    assert!(report.diagnostics.used_assist);
    assert!(report
        .results
        .iter()
        .flat_map(|r| r.calibration_matches.iter())
        .any(|m| m.source == MatchSource::Assist));
    assert!(report
        .confidence
        .reasons
        .iter()
        .any(|r| r.contains("assist")));
}

// ---- SQLite-backed learning end to end ----

#[test]
fn suppress_rule_applies_through_sqlite_store() {
    use recal_core::config::LearningConfig;
    use recal_storage::SqliteLearningStore;

    let store = SqliteLearningStore::open_in_memory(&LearningConfig::default()).unwrap();
    let rule = store
        .upsert_rule(&LearningRuleDraft {
            shop_id: "shop-1".to_string(),
            action: LearningAction::Suppress,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year_start: 2022,
            year_end: 2022,
            keyword: "front bumper".to_string(),
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: None,
            reason: "no radar on this trim".to_string(),
            confidence_weight: 0.9,
            created_at: 1_700_000_000,
        })
        .unwrap();
    let analyzer = analyzer_with(Box::new(store));

    let report = analyzer
        .analyze(&request("6 O/H Front Bumper Cover", Some("shop-1")))
        .unwrap();
    assert_eq!(report.applied_rule_ids, vec![rule.id]);
    assert!(report.grouped.is_empty());
}

// ---- scrub(): the §6 surface ----

#[test]
fn scrub_surface_matches_contract() {
    let analyzer = analyzer_with(Box::new(InMemoryLearningStore::new()));
    let outcome = analyzer
        .scrub("6 O/H Front Bumper Cover", 2022, "Toyota", "Camry")
        .unwrap();
    assert!(outcome.vehicle.is_some());
    assert_eq!(outcome.results.len(), 1);

    let missing = analyzer
        .scrub("6 O/H Front Bumper Cover", 2022, "Zonda", "Huayra")
        .unwrap();
    assert!(missing.vehicle.is_none());
    assert!(missing.results.is_empty());
    assert!(!missing.detected_repairs.is_empty());
}
