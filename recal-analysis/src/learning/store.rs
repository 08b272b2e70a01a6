//! In-memory implementation of `LearningStore` for tests and embedders
//! without SQLite.

use std::sync::Mutex;

use recal_core::config::LearningConfig;
use recal_core::errors::StorageError;
use recal_core::traits::LearningStore;
use recal_core::types::collections::FxHashMap;
use recal_core::types::{
    LearningEvent, LearningRule, LearningRuleDraft, NewLearningEvent, ReviewStatus,
};

#[derive(Debug, Default)]
struct Inner {
    rules: FxHashMap<String, LearningRule>,
    events: Vec<LearningEvent>,
    next_event_id: i64,
}

/// Mutex-guarded maps; upserts and usage increments are atomic by
/// construction.
#[derive(Debug)]
pub struct InMemoryLearningStore {
    inner: Mutex<Inner>,
    weight_floor: f64,
    weight_ceiling: f64,
}

impl InMemoryLearningStore {
    pub fn new() -> Self {
        Self::with_config(&LearningConfig::default())
    }

    pub fn with_config(config: &LearningConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_event_id: 1,
                ..Inner::default()
            }),
            weight_floor: config.weight_floor,
            weight_ceiling: config.weight_ceiling,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StorageError> {
        self.inner.lock().map_err(|_| StorageError::Sqlite {
            message: "learning store lock poisoned".to_string(),
        })
    }
}

impl Default for InMemoryLearningStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningStore for InMemoryLearningStore {
    fn rules_for_shop(&self, shop_id: &str) -> Result<Vec<LearningRule>, StorageError> {
        let inner = self.lock()?;
        let mut rules: Vec<LearningRule> = inner
            .rules
            .values()
            .filter(|r| r.shop_id == shop_id)
            .cloned()
            .collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rules)
    }

    fn upsert_rule(&self, draft: &LearningRuleDraft) -> Result<LearningRule, StorageError> {
        let mut inner = self.lock()?;
        let id = draft.stable_id();

        let rule = match inner.rules.get_mut(&id) {
            Some(existing) => {
                let merged = (existing.confidence_weight + draft.confidence_weight) / 2.0;
                existing.confidence_weight =
                    merged.clamp(self.weight_floor, self.weight_ceiling);
                existing.correction_count += 1;
                existing.updated_at = draft.created_at;
                if existing.reason.trim().is_empty() {
                    existing.reason = draft.reason.clone();
                }
                existing.clone()
            }
            None => {
                let rule = LearningRule {
                    id: id.clone(),
                    shop_id: draft.shop_id.clone(),
                    action: draft.action,
                    make: draft.make.clone(),
                    model: draft.model.clone(),
                    year_start: draft.year_start,
                    year_end: draft.year_end,
                    keyword: draft.keyword.clone(),
                    system_name: draft.system_name.clone(),
                    calibration_type: draft.calibration_type.clone(),
                    reason: draft.reason.clone(),
                    confidence_weight: draft
                        .confidence_weight
                        .clamp(self.weight_floor, self.weight_ceiling),
                    usage_count: 0,
                    correction_count: 1,
                    created_at: draft.created_at,
                    updated_at: draft.created_at,
                    last_applied_at: None,
                };
                inner.rules.insert(id, rule.clone());
                rule
            }
        };
        Ok(rule)
    }

    fn record_usage(&self, rule_ids: &[String], applied_at: i64) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        for id in rule_ids {
            if let Some(rule) = inner.rules.get_mut(id) {
                rule.usage_count += 1;
                rule.last_applied_at = Some(applied_at);
            }
        }
        Ok(())
    }

    fn append_event(&self, event: &NewLearningEvent) -> Result<LearningEvent, StorageError> {
        let mut inner = self.lock()?;
        let id = inner.next_event_id;
        inner.next_event_id += 1;
        let stored = LearningEvent {
            id,
            shop_id: event.shop_id.clone(),
            action: event.action,
            report_id: event.report_id.clone(),
            estimate_ref: event.estimate_ref.clone(),
            vin: event.vin.clone(),
            make: event.make.clone(),
            model: event.model.clone(),
            year: event.year,
            keyword: event.keyword.clone(),
            system_name: event.system_name.clone(),
            trigger_lines: event.trigger_lines.clone(),
            trigger_descriptions: event.trigger_descriptions.clone(),
            review_status: ReviewStatus::Pending,
            created_at: event.created_at,
            reviewed_at: None,
        };
        inner.events.push(stored.clone());
        Ok(stored)
    }

    fn review_event(
        &self,
        event_id: i64,
        approved: bool,
        reviewed_at: i64,
    ) -> Result<Option<LearningEvent>, StorageError> {
        let mut inner = self.lock()?;
        let Some(event) = inner.events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(None);
        };
        // One-way transition: a terminal event comes back unchanged.
        if event.review_status == ReviewStatus::Pending {
            event.review_status = if approved {
                ReviewStatus::Approved
            } else {
                ReviewStatus::Rejected
            };
            event.reviewed_at = Some(reviewed_at);
        }
        Ok(Some(event.clone()))
    }

    fn event(&self, event_id: i64) -> Result<Option<LearningEvent>, StorageError> {
        let inner = self.lock()?;
        Ok(inner.events.iter().find(|e| e.id == event_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recal_core::types::LearningAction;

    fn draft(weight: f64) -> LearningRuleDraft {
        LearningRuleDraft {
            shop_id: "shop-1".to_string(),
            action: LearningAction::Add,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year_start: 2020,
            year_end: 2024,
            keyword: "front bumper".to_string(),
            system_name: "Front Radar / ACC-AEB".to_string(),
            calibration_type: None,
            reason: "shop feedback".to_string(),
            confidence_weight: weight,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn upsert_merges_equivalent_rules() {
        let store = InMemoryLearningStore::new();
        let first = store.upsert_rule(&draft(0.8)).unwrap();
        assert_eq!(first.correction_count, 1);

        let merged = store.upsert_rule(&draft(0.4)).unwrap();
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.correction_count, 2);
        assert!((merged.confidence_weight - 0.6).abs() < 1e-9);
    }

    #[test]
    fn merged_weight_is_clamped() {
        let store = InMemoryLearningStore::new();
        store.upsert_rule(&draft(0.1)).unwrap();
        let merged = store.upsert_rule(&draft(0.0)).unwrap();
        assert!(merged.confidence_weight >= 0.1);
    }

    #[test]
    fn review_is_one_way() {
        let store = InMemoryLearningStore::new();
        let event = store
            .append_event(&NewLearningEvent {
                shop_id: "shop-1".to_string(),
                action: LearningAction::Suppress,
                report_id: None,
                estimate_ref: None,
                vin: None,
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: Some(2022),
                keyword: "front bumper".to_string(),
                system_name: "Front Radar / ACC-AEB".to_string(),
                trigger_lines: vec![6],
                trigger_descriptions: vec!["Front Bumper - Overhaul".to_string()],
                created_at: 1_700_000_000,
            })
            .unwrap();
        assert_eq!(event.review_status, ReviewStatus::Pending);

        let approved = store.review_event(event.id, true, 1_700_000_100).unwrap().unwrap();
        assert_eq!(approved.review_status, ReviewStatus::Approved);

        // A second review cannot flip the terminal state.
        let still = store.review_event(event.id, false, 1_700_000_200).unwrap().unwrap();
        assert_eq!(still.review_status, ReviewStatus::Approved);
        assert_eq!(still.reviewed_at, Some(1_700_000_100));

        assert!(store.review_event(999, true, 0).unwrap().is_none());
    }
}
