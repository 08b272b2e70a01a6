//! Shop-taught learning rules and their audit events.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// What a taught rule does to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningAction {
    /// Append a system/keyword association.
    Add,
    /// Remove every match for the rule's system on lines its keyword hits.
    Suppress,
}

impl LearningAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Suppress => "suppress",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "suppress" => Some(Self::Suppress),
            _ => None,
        }
    }
}

impl fmt::Display for LearningAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Review lifecycle of a learning event. Transitions are one-way:
/// `Pending → Approved | Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// True once the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase and collapse internal whitespace; the normalization applied to
/// every component of a rule's identity key.
pub fn normalize_key_component(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A per-shop, per-vehicle-range taught rule. Durable state owned by the
/// core; everything about its identity is normalized at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningRule {
    /// Stable id derived from the identity key, not a row counter.
    pub id: String,
    pub shop_id: String,
    pub action: LearningAction,
    pub make: String,
    pub model: String,
    pub year_start: u16,
    pub year_end: u16,
    pub keyword: String,
    pub system_name: String,
    pub calibration_type: Option<String>,
    pub reason: String,
    /// Clamped to [0.1, 1.0]; rules below the apply floor are skipped.
    pub confidence_weight: f64,
    pub usage_count: u64,
    pub correction_count: u64,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_applied_at: Option<i64>,
}

/// Fields a human correction supplies when teaching a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningRuleDraft {
    pub shop_id: String,
    pub action: LearningAction,
    pub make: String,
    pub model: String,
    pub year_start: u16,
    pub year_end: u16,
    pub keyword: String,
    pub system_name: String,
    pub calibration_type: Option<String>,
    pub reason: String,
    pub confidence_weight: f64,
    pub created_at: i64,
}

impl LearningRuleDraft {
    /// The normalized identity key. Two corrections with the same key merge
    /// into one rule.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            normalize_key_component(&self.shop_id),
            self.action.name(),
            normalize_key_component(&self.make),
            normalize_key_component(&self.model),
            self.year_start,
            self.year_end,
            normalize_key_component(&self.keyword),
            normalize_key_component(&self.system_name),
        )
    }

    /// Stable rule id: xxh3 of the identity key, so equivalent corrections
    /// land on the same row across processes.
    pub fn stable_id(&self) -> String {
        format!("lr-{:016x}", xxh3_64(self.identity_key().as_bytes()))
    }
}

impl LearningRule {
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            normalize_key_component(&self.shop_id),
            self.action.name(),
            normalize_key_component(&self.make),
            normalize_key_component(&self.model),
            self.year_start,
            self.year_end,
            normalize_key_component(&self.keyword),
            normalize_key_component(&self.system_name),
        )
    }

    /// True when the rule's model field is the wildcard entry.
    pub fn is_all_models(&self) -> bool {
        normalize_key_component(&self.model) == "all models"
    }
}

/// Immutable audit record of one ADD/SUPPRESS correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningEvent {
    pub id: i64,
    pub shop_id: String,
    pub action: LearningAction,
    pub report_id: Option<String>,
    pub estimate_ref: Option<String>,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: Option<u16>,
    pub keyword: String,
    pub system_name: String,
    pub trigger_lines: Vec<u32>,
    pub trigger_descriptions: Vec<String>,
    pub review_status: ReviewStatus,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
}

/// Payload for appending a learning event; the store assigns the id and the
/// event starts `Pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLearningEvent {
    pub shop_id: String,
    pub action: LearningAction,
    pub report_id: Option<String>,
    pub estimate_ref: Option<String>,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: Option<u16>,
    pub keyword: String,
    pub system_name: String,
    pub trigger_lines: Vec<u32>,
    pub trigger_descriptions: Vec<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_normalizes_case_and_whitespace() {
        let draft = LearningRuleDraft {
            shop_id: "Shop-1".to_string(),
            action: LearningAction::Add,
            make: "  TOYOTA ".to_string(),
            model: "Camry  SE".to_string(),
            year_start: 2022,
            year_end: 2022,
            keyword: "Front  Bumper".to_string(),
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: None,
            reason: "taught".to_string(),
            confidence_weight: 0.8,
            created_at: 0,
        };
        assert_eq!(
            draft.identity_key(),
            "shop-1|add|toyota|camry se|2022|2022|front bumper|front radar / acc-aeb"
        );
    }

    #[test]
    fn stable_id_is_deterministic() {
        let mk = |weight: f64| LearningRuleDraft {
            shop_id: "s".to_string(),
            action: LearningAction::Suppress,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year_start: 2020,
            year_end: 2024,
            keyword: "grille".to_string(),
            system_name: "Front Radar".to_string(),
            calibration_type: None,
            reason: "r".to_string(),
            confidence_weight: weight,
            created_at: 0,
        };
        // Weight is not part of the identity.
        assert_eq!(mk(0.3).stable_id(), mk(0.9).stable_id());
    }

    #[test]
    fn review_status_transitions_are_terminal() {
        assert!(!ReviewStatus::Pending.is_terminal());
        assert!(ReviewStatus::Approved.is_terminal());
        assert!(ReviewStatus::Rejected.is_terminal());
    }
}
