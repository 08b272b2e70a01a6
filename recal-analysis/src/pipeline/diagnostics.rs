//! Per-analysis diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use recal_core::types::{MatchSource, ScrubResult};

/// Summary of one analysis run, for logging and operator debugging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDiagnostics {
    /// Matches across all lines before grouping.
    pub raw_match_count: usize,
    /// Grouped calibration rows.
    pub grouped_count: usize,
    /// 1 - (grouped / raw). Higher = more synonym collapse.
    pub dedup_ratio: f64,
    pub rule_matches: usize,
    pub inferred_matches: usize,
    pub learned_matches: usize,
    pub assist_matches: usize,
    pub vehicle_matched: bool,
    pub vin_decoded: bool,
    pub used_assist: bool,
    pub used_inference_fallback: bool,
    pub applied_rule_count: usize,
}

impl AnalysisDiagnostics {
    /// Tally per-source counts from the final result set.
    pub fn tally(results: &[ScrubResult], grouped_count: usize) -> Self {
        let mut diagnostics = Self {
            grouped_count,
            ..Self::default()
        };
        for m in results.iter().flat_map(|r| r.calibration_matches.iter()) {
            diagnostics.raw_match_count += 1;
            match m.source {
                MatchSource::Rule => diagnostics.rule_matches += 1,
                MatchSource::Inferred => diagnostics.inferred_matches += 1,
                MatchSource::Learned => diagnostics.learned_matches += 1,
                MatchSource::Assist => diagnostics.assist_matches += 1,
            }
        }
        if diagnostics.raw_match_count > 0 {
            diagnostics.dedup_ratio =
                1.0 - (grouped_count as f64 / diagnostics.raw_match_count as f64);
        }
        diagnostics
    }
}

impl fmt::Display for AnalysisDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisDiagnostics {{ raw={}, grouped={}, dedup={:.1}%, rule={}, inferred={}, learned={}, assist={}, rules_applied={} }}",
            self.raw_match_count,
            self.grouped_count,
            self.dedup_ratio * 100.0,
            self.rule_matches,
            self.inferred_matches,
            self.learned_matches,
            self.assist_matches,
            self.applied_rule_count,
        )
    }
}
