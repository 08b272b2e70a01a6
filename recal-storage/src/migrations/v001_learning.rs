//! V001: learning_rules and learning_events.

pub const MIGRATION_SQL: &str = r#"
-- Taught rules, one row per normalized identity key. The id is a stable
-- hash of that key, so equivalent corrections land on the same row.
CREATE TABLE IF NOT EXISTS learning_rules (
    id TEXT PRIMARY KEY,
    shop_id TEXT NOT NULL,
    action TEXT NOT NULL,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    year_start INTEGER NOT NULL,
    year_end INTEGER NOT NULL,
    keyword TEXT NOT NULL,
    system_name TEXT NOT NULL,
    calibration_type TEXT,
    reason TEXT NOT NULL,
    confidence_weight REAL NOT NULL,
    usage_count INTEGER NOT NULL DEFAULT 0,
    correction_count INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    last_applied_at INTEGER
) STRICT;

CREATE INDEX IF NOT EXISTS idx_learning_rules_shop
    ON learning_rules(shop_id);

-- Append-only audit events. Trigger lines/descriptions stored as JSON.
CREATE TABLE IF NOT EXISTS learning_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    shop_id TEXT NOT NULL,
    action TEXT NOT NULL,
    report_id TEXT,
    estimate_ref TEXT,
    vin TEXT,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    year INTEGER,
    keyword TEXT NOT NULL,
    system_name TEXT NOT NULL,
    trigger_lines TEXT NOT NULL,
    trigger_descriptions TEXT NOT NULL,
    review_status TEXT NOT NULL DEFAULT 'pending',
    created_at INTEGER NOT NULL,
    reviewed_at INTEGER
) STRICT;

CREATE INDEX IF NOT EXISTS idx_learning_events_shop
    ON learning_events(shop_id);
CREATE INDEX IF NOT EXISTS idx_learning_events_pending
    ON learning_events(id) WHERE review_status = 'pending';
"#;
