//! The estimate analyzer: one synchronous pass from raw text to a grouped,
//! scored report.
//!
//! Collaborators are injected; reads of the vehicle catalog and learning
//! rules are snapshots for the duration of one analysis. A scrub either
//! completes fully or fails atomically with an error — partial results are
//! never handed out.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use recal_core::config::RecalConfig;
use recal_core::errors::ScrubError;
use recal_core::traits::{AssistClient, LearningStore, VehicleCatalog, VinDecoder};
use recal_core::types::collections::FxHashMap;
use recal_core::types::{
    AdasPartHit, DetectedRepair, GroupedCalibration, ScrubResult, VehicleRecord, VehicleRef,
};

use crate::confidence::{
    build_analysis_confidence, AnalysisConfidence, ConfidenceInputs, ExtractionConfidence,
};
use crate::grouping::group_calibrations;
use crate::inference::{
    infer_from_adas_parts, infer_from_repairs, infer_steering_proximity, merge_missing_inferred,
    run_assist_pass,
};
use crate::learning::apply_learning_rules;
use crate::normalize::{is_likely_estimate_operation_line, tokenize_estimate, validate_estimate_input};
use crate::repairs::{detect_adas_parts, detect_repairs};
use crate::scrub::{resolve_vehicle, scrub_lines};
use crate::vocab::VocabularyMatcher;

use super::diagnostics::AnalysisDiagnostics;

/// One analysis request. Vehicle identity fields are optional; a VIN fills
/// the gaps when the decoder can resolve it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub estimate_text: String,
    pub file_name: Option<String>,
    pub vin: Option<String>,
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub shop_id: Option<String>,
}

/// Output of the rule-based scrub stage alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubOutcome {
    pub vehicle: Option<VehicleRef>,
    pub results: Vec<ScrubResult>,
    pub detected_repairs: Vec<DetectedRepair>,
    pub adas_parts: Vec<AdasPartHit>,
}

/// The full analysis report the caller reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub vehicle: Option<VehicleRef>,
    pub results: Vec<ScrubResult>,
    pub detected_repairs: Vec<DetectedRepair>,
    pub adas_parts: Vec<AdasPartHit>,
    pub grouped: Vec<GroupedCalibration>,
    pub confidence: AnalysisConfidence,
    pub applied_rule_ids: Vec<String>,
    pub diagnostics: AnalysisDiagnostics,
}

/// The pipeline facade. Holds injected collaborators and the compiled
/// vocabulary; one instance serves many analyses.
pub struct EstimateAnalyzer {
    catalog: Box<dyn VehicleCatalog>,
    vin_decoder: Box<dyn VinDecoder>,
    assist: Option<Box<dyn AssistClient>>,
    store: Box<dyn LearningStore>,
    config: RecalConfig,
    vocab: VocabularyMatcher,
}

impl EstimateAnalyzer {
    pub fn new(
        catalog: Box<dyn VehicleCatalog>,
        vin_decoder: Box<dyn VinDecoder>,
        store: Box<dyn LearningStore>,
    ) -> Self {
        Self {
            catalog,
            vin_decoder,
            assist: None,
            store,
            config: RecalConfig::default(),
            vocab: VocabularyMatcher::new(),
        }
    }

    /// Attach the optional external assist capability.
    pub fn with_assist(mut self, client: Box<dyn AssistClient>) -> Self {
        self.assist = Some(client);
        self
    }

    pub fn with_config(mut self, config: RecalConfig) -> Self {
        self.config = config;
        self
    }

    /// Rule-based scrub only: tokenize, resolve the vehicle, match the
    /// trigger map, and detect generic repairs.
    ///
    /// No vehicle match is a valid empty outcome — `detected_repairs` is
    /// still populated so the caller has something to show.
    pub fn scrub(
        &self,
        estimate_text: &str,
        year: u16,
        make: &str,
        model: &str,
    ) -> Result<ScrubOutcome, ScrubError> {
        validate_estimate_input(estimate_text, &self.config.limits)?;
        let lines = tokenize_estimate(estimate_text);
        let vehicle = self.lookup_vehicle(year, make, model);
        let results = vehicle
            .as_ref()
            .map(|v| scrub_lines(v, &lines))
            .unwrap_or_default();

        Ok(ScrubOutcome {
            vehicle: vehicle.as_ref().map(VehicleRecord::vehicle_ref),
            results,
            detected_repairs: detect_repairs(&lines, &self.vocab),
            adas_parts: detect_adas_parts(&lines, &self.vocab),
        })
    }

    /// Full analysis: scrub → assist → inference gap-fill → learning →
    /// grouping → confidence.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, ScrubError> {
        validate_estimate_input(&request.estimate_text, &self.config.limits)?;
        let lines = tokenize_estimate(&request.estimate_text);

        // Vehicle identity, best-effort enriched by the VIN oracle.
        let vin = request.vin.as_deref().filter(|v| !v.trim().is_empty());
        let mut year = request.year;
        let mut make = request.make.clone().unwrap_or_default();
        let mut model = request.model.clone().unwrap_or_default();
        let mut vin_decoded = false;

        if let Some(vin) = vin {
            match self.vin_decoder.decode(vin) {
                Ok(info) => {
                    vin_decoded = info.year.is_some() && info.make.is_some();
                    if year.is_none() {
                        year = info.year;
                    }
                    if make.trim().is_empty() {
                        if let Some(decoded) = info.make {
                            make = decoded;
                        }
                    }
                    if model.trim().is_empty() {
                        if let Some(decoded) = info.model {
                            model = decoded;
                        }
                    }
                }
                Err(e) => {
                    // Degrade to text-based identity, never fail the scrub.
                    warn!(error = %e, "VIN decode unavailable");
                }
            }
        }

        let extraction = if vin_decoded {
            ExtractionConfidence::High
        } else if year.is_some() && !make.trim().is_empty() && !model.trim().is_empty() {
            ExtractionConfidence::Medium
        } else {
            ExtractionConfidence::Low
        };

        let vehicle = match year {
            Some(year) if !make.trim().is_empty() => self.lookup_vehicle(year, &make, &model),
            _ => None,
        };

        let mut results = vehicle
            .as_ref()
            .map(|v| scrub_lines(v, &lines))
            .unwrap_or_default();
        let detected_repairs = detect_repairs(&lines, &self.vocab);
        let adas_parts = detect_adas_parts(&lines, &self.vocab);

        // Assist pass: a second rule-based run over assist-extracted
        // operations, accepted only on strict improvement.
        let mut used_assist = false;
        if let (Some(client), Some(vehicle)) = (self.assist.as_deref(), vehicle.as_ref()) {
            let next_line = lines.iter().map(|l| l.line_number).max().unwrap_or(0);
            if let Some(combined) = run_assist_pass(
                client,
                &request.estimate_text,
                request.file_name.as_deref(),
                vehicle,
                &results,
                next_line,
            ) {
                results = combined;
                used_assist = true;
            }
        }

        // Inference fallbacks fill gaps only when a vehicle profile exists;
        // without one the scrub stays empty by contract.
        let mut used_inference_fallback = false;
        if vehicle.is_some() {
            let mut candidates = infer_from_repairs(&detected_repairs);
            candidates.extend(infer_from_adas_parts(&adas_parts));
            candidates.extend(infer_steering_proximity(&request.estimate_text));

            let descriptions: FxHashMap<u32, String> = lines
                .iter()
                .map(|l| (l.line_number, l.cleaned_text.clone()))
                .collect();
            used_inference_fallback =
                merge_missing_inferred(&mut results, candidates, &descriptions);
        }

        // Learning runs last so taught corrections always have the final
        // word. A store failure hands back the pre-learning result set.
        let mut applied_rule_ids = Vec::new();
        if let (Some(shop_id), Some(resolved_year)) = (request.shop_id.as_deref(), year) {
            if vehicle.is_some() {
                match apply_learning_rules(
                    self.store.as_ref(),
                    &self.config.learning,
                    &lines,
                    resolved_year,
                    &make,
                    &model,
                    shop_id,
                    results.clone(),
                    unix_now(),
                ) {
                    Ok(outcome) => {
                        results = outcome.results;
                        applied_rule_ids = outcome.applied_rule_ids;
                    }
                    Err(e) => {
                        warn!(error = %e, "learning application failed; keeping pre-learning results");
                    }
                }
            }
        }

        let grouped = group_calibrations(&results);
        let operation_line_count = lines
            .iter()
            .filter(|l| is_likely_estimate_operation_line(&l.raw_text))
            .count();

        let confidence = build_analysis_confidence(&ConfidenceInputs {
            vehicle_matched: vehicle.is_some(),
            vin_present: vin.is_some(),
            extraction,
            repair_line_count: operation_line_count,
            grouped_count: grouped.len(),
            adas_parts_detected: !adas_parts.is_empty(),
            used_assist,
            used_inference_fallback,
        });

        let mut diagnostics = AnalysisDiagnostics::tally(&results, grouped.len());
        diagnostics.vehicle_matched = vehicle.is_some();
        diagnostics.vin_decoded = vin_decoded;
        diagnostics.used_assist = used_assist;
        diagnostics.used_inference_fallback = used_inference_fallback;
        diagnostics.applied_rule_count = applied_rule_ids.len();
        debug!(%diagnostics, "analysis complete");

        Ok(AnalysisReport {
            vehicle: vehicle.as_ref().map(VehicleRecord::vehicle_ref),
            results,
            detected_repairs,
            adas_parts,
            grouped,
            confidence,
            applied_rule_ids,
            diagnostics,
        })
    }

    fn lookup_vehicle(&self, year: u16, make: &str, model: &str) -> Option<VehicleRecord> {
        let records = match self.catalog.find_vehicles(year, make) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "vehicle catalog unavailable");
                return None;
            }
        };
        resolve_vehicle(&records, year, make, model).cloned()
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
