//! Learning-rule thresholds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Rules below this confidence weight are never applied.
    pub min_apply_weight: f64,
    /// Lower clamp for merged confidence weights.
    pub weight_floor: f64,
    /// Upper clamp for merged confidence weights.
    pub weight_ceiling: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_apply_weight: 0.2,
            weight_floor: 0.1,
            weight_ceiling: 1.0,
        }
    }
}
