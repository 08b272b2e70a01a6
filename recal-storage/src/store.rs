//! `LearningStore` backed by SQLite.

use std::path::Path;

use recal_core::config::LearningConfig;
use recal_core::errors::StorageError;
use recal_core::traits::LearningStore;
use recal_core::types::{LearningEvent, LearningRule, LearningRuleDraft, NewLearningEvent};

use crate::connection::DatabaseManager;
use crate::queries::{learning_events, learning_rules};

/// Durable learning store. All operations run on the write-serialized
/// connection, so concurrent scrubs for the same shop cannot lose updates.
pub struct SqliteLearningStore {
    db: DatabaseManager,
    weight_floor: f64,
    weight_ceiling: f64,
}

impl SqliteLearningStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path, config: &LearningConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
            weight_floor: config.weight_floor,
            weight_ceiling: config.weight_ceiling,
        })
    }

    /// In-memory store (for testing).
    pub fn open_in_memory(config: &LearningConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
            weight_floor: config.weight_floor,
            weight_ceiling: config.weight_ceiling,
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl LearningStore for SqliteLearningStore {
    fn rules_for_shop(&self, shop_id: &str) -> Result<Vec<LearningRule>, StorageError> {
        self.db
            .with_conn(|conn| learning_rules::rules_for_shop(conn, shop_id))
    }

    fn upsert_rule(&self, draft: &LearningRuleDraft) -> Result<LearningRule, StorageError> {
        self.db.with_conn(|conn| {
            learning_rules::upsert_rule(conn, draft, self.weight_floor, self.weight_ceiling)
        })
    }

    fn record_usage(&self, rule_ids: &[String], applied_at: i64) -> Result<(), StorageError> {
        if rule_ids.is_empty() {
            return Ok(());
        }
        self.db
            .with_conn(|conn| learning_rules::record_usage(conn, rule_ids, applied_at))
    }

    fn append_event(&self, event: &NewLearningEvent) -> Result<LearningEvent, StorageError> {
        self.db
            .with_conn(|conn| learning_events::append_event(conn, event))
    }

    fn review_event(
        &self,
        event_id: i64,
        approved: bool,
        reviewed_at: i64,
    ) -> Result<Option<LearningEvent>, StorageError> {
        self.db
            .with_conn(|conn| learning_events::review_event(conn, event_id, approved, reviewed_at))
    }

    fn event(&self, event_id: i64) -> Result<Option<LearningEvent>, StorageError> {
        self.db
            .with_conn(|conn| learning_events::event_by_id(conn, event_id))
    }
}
