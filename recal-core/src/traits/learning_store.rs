//! Learning-rule repository port.
//!
//! Passed into the application function explicitly — never a module-level
//! singleton. Per-shop partitioning is part of every key.

use crate::errors::StorageError;
use crate::types::{LearningEvent, LearningRule, LearningRuleDraft, NewLearningEvent};

/// Durable store for taught rules and their audit events.
///
/// Implementations must make `upsert_rule` an atomic read-check-write per
/// identity key and `record_usage` a single transaction, so two concurrent
/// scrubs for the same shop cannot lose updates. Methods take `&self`;
/// synchronization is internal.
pub trait LearningStore: Send + Sync {
    /// Read snapshot of all rules for one shop.
    fn rules_for_shop(&self, shop_id: &str) -> Result<Vec<LearningRule>, StorageError>;

    /// Insert a new rule, or merge into the rule with the same identity key:
    /// confidence weights are averaged `(existing + incoming) / 2` and
    /// clamped, and `correction_count` is incremented.
    fn upsert_rule(&self, draft: &LearningRuleDraft) -> Result<LearningRule, StorageError>;

    /// Increment `usage_count` and set `last_applied_at` for every given
    /// rule, atomically — at most once per rule per scrub.
    fn record_usage(&self, rule_ids: &[String], applied_at: i64) -> Result<(), StorageError>;

    /// Append an immutable audit event; the store assigns the id and the
    /// event starts `pending`.
    fn append_event(&self, event: &NewLearningEvent) -> Result<LearningEvent, StorageError>;

    /// One-way review transition `pending → approved | rejected`. Returns
    /// the event after the call, unchanged if it was already terminal, or
    /// `None` if no such event exists.
    fn review_event(
        &self,
        event_id: i64,
        approved: bool,
        reviewed_at: i64,
    ) -> Result<Option<LearningEvent>, StorageError>;

    /// Fetch a single event.
    fn event(&self, event_id: i64) -> Result<Option<LearningEvent>, StorageError>;
}
