//! Learning-rule queries.

use rusqlite::{params, Connection};

use recal_core::errors::StorageError;
use recal_core::types::{LearningAction, LearningRule, LearningRuleDraft};

use crate::connection::sqlite_error;

/// Atomic upsert keyed by the draft's stable id: a conflict averages the
/// confidence weights (clamped) and increments `correction_count` in the
/// same statement.
pub fn upsert_rule(
    conn: &Connection,
    draft: &LearningRuleDraft,
    weight_floor: f64,
    weight_ceiling: f64,
) -> Result<LearningRule, StorageError> {
    let id = draft.stable_id();
    conn.execute(
        "INSERT INTO learning_rules (
             id, shop_id, action, make, model, year_start, year_end,
             keyword, system_name, calibration_type, reason,
             confidence_weight, usage_count, correction_count,
             created_at, updated_at, last_applied_at
         )
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                 MAX(?13, MIN(?14, ?12)), 0, 1, ?15, ?15, NULL)
         ON CONFLICT(id) DO UPDATE SET
           confidence_weight = MAX(?13, MIN(?14,
               (learning_rules.confidence_weight + excluded.confidence_weight) / 2.0)),
           correction_count = learning_rules.correction_count + 1,
           updated_at = excluded.updated_at",
        params![
            id,
            draft.shop_id,
            draft.action.name(),
            draft.make,
            draft.model,
            draft.year_start,
            draft.year_end,
            draft.keyword,
            draft.system_name,
            draft.calibration_type,
            draft.reason,
            draft.confidence_weight,
            weight_floor,
            weight_ceiling,
            draft.created_at,
        ],
    )
    .map_err(sqlite_error)?;

    rule_by_id(conn, &id)?.ok_or_else(|| StorageError::NotFound {
        what: format!("learning rule {id}"),
    })
}

/// All rules for one shop, ordered by id for deterministic application.
pub fn rules_for_shop(conn: &Connection, shop_id: &str) -> Result<Vec<LearningRule>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, shop_id, action, make, model, year_start, year_end,
                    keyword, system_name, calibration_type, reason,
                    confidence_weight, usage_count, correction_count,
                    created_at, updated_at, last_applied_at
             FROM learning_rules
             WHERE shop_id = ?1
             ORDER BY id ASC",
        )
        .map_err(sqlite_error)?;
    let rows = stmt
        .query_map(params![shop_id], map_rule_row)
        .map_err(sqlite_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_error)
}

/// Fetch one rule.
pub fn rule_by_id(conn: &Connection, id: &str) -> Result<Option<LearningRule>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, shop_id, action, make, model, year_start, year_end,
                    keyword, system_name, calibration_type, reason,
                    confidence_weight, usage_count, correction_count,
                    created_at, updated_at, last_applied_at
             FROM learning_rules
             WHERE id = ?1",
        )
        .map_err(sqlite_error)?;
    let mut rows = stmt
        .query_map(params![id], map_rule_row)
        .map_err(sqlite_error)?;
    rows.next().transpose().map_err(sqlite_error)
}

/// Increment usage for every applied rule in one transaction — at most once
/// per rule per scrub, and never a partial batch.
pub fn record_usage(
    conn: &Connection,
    rule_ids: &[String],
    applied_at: i64,
) -> Result<(), StorageError> {
    let tx = conn.unchecked_transaction().map_err(sqlite_error)?;
    {
        let mut stmt = tx
            .prepare_cached(
                "UPDATE learning_rules
                 SET usage_count = usage_count + 1, last_applied_at = ?2
                 WHERE id = ?1",
            )
            .map_err(sqlite_error)?;
        for id in rule_ids {
            stmt.execute(params![id, applied_at]).map_err(sqlite_error)?;
        }
    }
    tx.commit().map_err(sqlite_error)
}

fn map_rule_row(row: &rusqlite::Row) -> rusqlite::Result<LearningRule> {
    let action_raw: String = row.get(2)?;
    let action = LearningAction::parse(&action_raw).unwrap_or(LearningAction::Add);
    Ok(LearningRule {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        action,
        make: row.get(3)?,
        model: row.get(4)?,
        year_start: row.get(5)?,
        year_end: row.get(6)?,
        keyword: row.get(7)?,
        system_name: row.get(8)?,
        calibration_type: row.get(9)?,
        reason: row.get(10)?,
        confidence_weight: row.get(11)?,
        usage_count: row.get::<_, i64>(12)? as u64,
        correction_count: row.get::<_, i64>(13)? as u64,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
        last_applied_at: row.get(16)?,
    })
}
