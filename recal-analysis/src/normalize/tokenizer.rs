//! Estimate line tokenization.

use std::sync::OnceLock;

use regex::Regex;

use recal_core::types::{OperationType, RepairLine};

use super::cleaner::clean_repair_description;

fn native_line_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A short leading integer followed by word-ish content. Decimals
    // ("6.5") and 4-digit years never qualify as line ids.
    RE.get_or_init(|| Regex::new(r"^\s*(\d{1,3})\s*(?P<rest>[A-Za-z&].*)$").unwrap())
}

fn operation_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?:r\s*&\s*i|r\s*&\s*r|o[-/]h|rpr|repl|refn|refinish|blnd|blend|overhaul|repair|remove|replace)\b",
        )
        .unwrap()
    })
}

/// Split raw estimate text into numbered repair lines.
///
/// Empty lines are discarded. Each kept line is numbered by its 1-based
/// position unless it starts with an estimate-native numeric line id, which
/// is extracted and preferred.
pub fn tokenize_estimate(text: &str) -> Vec<RepairLine> {
    let mut lines = Vec::new();
    let mut position = 0u32;

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        position += 1;

        let line_number = native_line_number_re()
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(position);

        lines.push(RepairLine {
            line_number,
            raw_text: trimmed.to_string(),
            cleaned_text: clean_repair_description(trimmed),
            operation_type: parse_operation_type(trimmed),
        });
    }

    lines
}

/// Classify the leading operation token of a line.
pub fn parse_operation_type(line: &str) -> OperationType {
    // Skip a native line-number prefix before reading the token.
    let body = native_line_number_re()
        .captures(line)
        .and_then(|c| c.name("rest"))
        .map(|m| m.as_str())
        .unwrap_or(line);

    let Some(m) = operation_token_re().find(body) else {
        return OperationType::Other;
    };
    let token = m.as_str().trim().to_lowercase().replace(' ', "");

    match token.as_str() {
        "r&i" => OperationType::RemoveInstall,
        "r&r" | "repl" | "replace" => OperationType::RemoveReplace,
        "rpr" | "repair" => OperationType::Repair,
        "refn" | "refinish" => OperationType::Refinish,
        "blnd" | "blend" => OperationType::Blend,
        "o/h" | "o-h" | "overhaul" => OperationType::Overhaul,
        _ => OperationType::Other,
    }
}
