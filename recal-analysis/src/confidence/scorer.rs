//! The confidence scorer: a pure function from scrub facts to a bounded
//! score with reasons that mirror exactly which adjustments fired, in fixed
//! order. Reproducibility is part of the contract, not incidental.

use std::fmt;

use serde::{Deserialize, Serialize};

const BASE_SCORE: i32 = 52;
const MIN_SCORE: i32 = 45;
const MAX_SCORE: i32 = 96;

/// How the vehicle identity was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionConfidence {
    /// VIN decoded successfully.
    High,
    /// Complete year/make/model supplied by the caller.
    Medium,
    /// Partial or absent vehicle identity.
    Low,
}

impl ExtractionConfidence {
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Confidence label thresholds: ≥85 high, ≥70 medium, else low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    fn from_score(score: i32) -> Self {
        if score >= 85 {
            Self::High
        } else if score >= 70 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the scorer looks at. Derived fresh on every scrub.
#[derive(Debug, Clone)]
pub struct ConfidenceInputs {
    pub vehicle_matched: bool,
    pub vin_present: bool,
    pub extraction: ExtractionConfidence,
    /// Operation-eligible repair lines in the document.
    pub repair_line_count: usize,
    pub grouped_count: usize,
    pub adas_parts_detected: bool,
    pub used_assist: bool,
    pub used_inference_fallback: bool,
}

/// Bounded score plus its audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfidence {
    /// Always within [45, 96].
    pub score: i32,
    pub label: ConfidenceLabel,
    pub reasons: Vec<String>,
}

/// Score one analysis. Base 52, fixed adjustment order, clamp to [45, 96].
pub fn build_analysis_confidence(inputs: &ConfidenceInputs) -> AnalysisConfidence {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    if inputs.vehicle_matched {
        score += 20;
        reasons.push("vehicle calibration profile matched (+20)".to_string());
    }
    if inputs.vin_present {
        score += 8;
        reasons.push("VIN provided (+8)".to_string());
    }
    let (extraction_bonus, extraction_reason) = match inputs.extraction {
        ExtractionConfidence::High => (12, "vehicle extraction confidence high (+12)"),
        ExtractionConfidence::Medium => (7, "vehicle extraction confidence medium (+7)"),
        ExtractionConfidence::Low => (2, "vehicle extraction confidence low (+2)"),
    };
    score += extraction_bonus;
    reasons.push(extraction_reason.to_string());

    if inputs.repair_line_count >= 5 {
        score += 10;
        reasons.push(format!(
            "strong repair-line evidence: {} lines (+10)",
            inputs.repair_line_count
        ));
    } else if inputs.repair_line_count >= 2 {
        score += 5;
        reasons.push(format!(
            "moderate repair-line evidence: {} lines (+5)",
            inputs.repair_line_count
        ));
    }
    if inputs.grouped_count > 0 {
        score += 8;
        reasons.push(format!(
            "{} calibration operation(s) identified (+8)",
            inputs.grouped_count
        ));
    }
    if inputs.adas_parts_detected {
        score += 6;
        reasons.push("ADAS components present in estimate (+6)".to_string());
    }
    if inputs.used_assist {
        score += 4;
        reasons.push("external extraction assist contributed (+4)".to_string());
    }
    if inputs.used_inference_fallback {
        score -= 8;
        reasons.push("inference fallback used; direct rule match incomplete (-8)".to_string());
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    AnalysisConfidence {
        score,
        label: ConfidenceLabel::from_score(score),
        reasons,
    }
}
