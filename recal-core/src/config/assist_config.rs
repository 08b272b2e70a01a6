//! External-assist budget.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Hard budget the assist adapter must enforce. Failure or timeout is
    /// degraded to "assist unavailable", never a blocked scrub.
    pub timeout_ms: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self { timeout_ms: 8_000 }
    }
}
