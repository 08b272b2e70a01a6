//! Learning-event queries.

use rusqlite::{params, Connection, OptionalExtension};

use recal_core::errors::StorageError;
use recal_core::types::{LearningAction, LearningEvent, NewLearningEvent, ReviewStatus};

use crate::connection::sqlite_error;

/// Append an immutable audit event; starts `pending`.
pub fn append_event(
    conn: &Connection,
    event: &NewLearningEvent,
) -> Result<LearningEvent, StorageError> {
    let trigger_lines = serde_json::to_string(&event.trigger_lines).map_err(json_error)?;
    let trigger_descriptions =
        serde_json::to_string(&event.trigger_descriptions).map_err(json_error)?;

    conn.execute(
        "INSERT INTO learning_events (
             shop_id, action, report_id, estimate_ref, vin, make, model,
             year, keyword, system_name, trigger_lines, trigger_descriptions,
             review_status, created_at, reviewed_at
         )
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                 'pending', ?13, NULL)",
        params![
            event.shop_id,
            event.action.name(),
            event.report_id,
            event.estimate_ref,
            event.vin,
            event.make,
            event.model,
            event.year,
            event.keyword,
            event.system_name,
            trigger_lines,
            trigger_descriptions,
            event.created_at,
        ],
    )
    .map_err(sqlite_error)?;

    let id = conn.last_insert_rowid();
    event_by_id(conn, id)?.ok_or_else(|| StorageError::NotFound {
        what: format!("learning event {id}"),
    })
}

/// One-way review transition, enforced in SQL: only a pending row updates.
/// Returns the event as it stands after the call.
pub fn review_event(
    conn: &Connection,
    event_id: i64,
    approved: bool,
    reviewed_at: i64,
) -> Result<Option<LearningEvent>, StorageError> {
    let status = if approved {
        ReviewStatus::Approved
    } else {
        ReviewStatus::Rejected
    };
    conn.execute(
        "UPDATE learning_events
         SET review_status = ?2, reviewed_at = ?3
         WHERE id = ?1 AND review_status = 'pending'",
        params![event_id, status.name(), reviewed_at],
    )
    .map_err(sqlite_error)?;

    event_by_id(conn, event_id)
}

/// Fetch one event.
pub fn event_by_id(conn: &Connection, event_id: i64) -> Result<Option<LearningEvent>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, shop_id, action, report_id, estimate_ref, vin, make,
                    model, year, keyword, system_name, trigger_lines,
                    trigger_descriptions, review_status, created_at, reviewed_at
             FROM learning_events
             WHERE id = ?1",
        )
        .map_err(sqlite_error)?;
    stmt.query_row(params![event_id], map_event_row)
        .optional()
        .map_err(sqlite_error)
}

fn map_event_row(row: &rusqlite::Row) -> rusqlite::Result<LearningEvent> {
    let action_raw: String = row.get(2)?;
    let status_raw: String = row.get(13)?;
    let trigger_lines_raw: String = row.get(11)?;
    let trigger_descriptions_raw: String = row.get(12)?;

    Ok(LearningEvent {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        action: LearningAction::parse(&action_raw).unwrap_or(LearningAction::Add),
        report_id: row.get(3)?,
        estimate_ref: row.get(4)?,
        vin: row.get(5)?,
        make: row.get(6)?,
        model: row.get(7)?,
        year: row.get(8)?,
        keyword: row.get(9)?,
        system_name: row.get(10)?,
        trigger_lines: serde_json::from_str(&trigger_lines_raw).unwrap_or_default(),
        trigger_descriptions: serde_json::from_str(&trigger_descriptions_raw).unwrap_or_default(),
        review_status: ReviewStatus::parse(&status_raw).unwrap_or(ReviewStatus::Pending),
        created_at: row.get(14)?,
        reviewed_at: row.get(15)?,
    })
}

fn json_error(e: serde_json::Error) -> StorageError {
    StorageError::InvalidRow {
        message: e.to_string(),
    }
}
