//! Generated-report rejection.
//!
//! Users sometimes upload the calibration report a previous analysis
//! produced instead of the original estimate. A weighted phrase heuristic
//! catches that before the pipeline wastes a scrub on it.

use std::sync::OnceLock;

use regex::Regex;

use recal_core::config::LimitsConfig;
use recal_core::errors::InputError;

/// Ordered scored signals; the sum is compared against the configured
/// threshold.
const REPORT_SIGNALS: &[(&str, u32)] = &[
    ("calibration report", 3),
    ("procedure type:", 2),
    ("recommended calibrations", 2),
    ("trigger line", 2),
    ("confidence score", 1),
    ("this report was generated", 2),
    ("disclaimer", 1),
    ("not a substitute for oem", 1),
];

fn line_narrative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bline\s+\d+\b").unwrap())
}

/// Weighted score for "this is an already-generated report".
pub fn report_likelihood_score(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    let mut score: u32 = REPORT_SIGNALS
        .iter()
        .filter(|(phrase, _)| lowered.contains(phrase))
        .map(|(_, weight)| weight)
        .sum();

    // Dense "Line N" narrative is report prose, not estimate rows.
    if line_narrative_re().find_iter(&lowered).count() >= 4 {
        score += 2;
    }
    score
}

/// Gate an incoming document: empty, oversized, or classified as a
/// generated report ⇒ `InputError`, surfaced to the caller and not retried.
pub fn validate_estimate_input(text: &str, limits: &LimitsConfig) -> Result<(), InputError> {
    if text.trim().is_empty() {
        return Err(InputError::EmptyText);
    }
    if text.len() > limits.max_estimate_bytes {
        return Err(InputError::TooLarge {
            size: text.len(),
            limit: limits.max_estimate_bytes,
        });
    }
    let score = report_likelihood_score(text);
    if score >= limits.report_score_threshold {
        return Err(InputError::GeneratedReport { score });
    }
    Ok(())
}
