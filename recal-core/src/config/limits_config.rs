//! Input limits and document-classifier thresholds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted estimate text size in bytes.
    pub max_estimate_bytes: usize,
    /// Weighted-signal score at or above which a document is rejected as an
    /// already-generated calibration report.
    pub report_score_threshold: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_estimate_bytes: 262_144,
            report_score_threshold: 4,
        }
    }
}
