//! External-model assist pass.
//!
//! The assist's output is untrusted: operations are sanitized, turned into
//! synthetic estimate lines, and re-run through the same rule-based
//! scrubber. The second pass is accepted only when it yields strictly more
//! matches than the first.

use tracing::{debug, warn};

use recal_core::traits::AssistClient;
use recal_core::types::collections::FxHashSet;
use recal_core::types::{AssistOperation, MatchSource, RepairLine, ScrubResult, VehicleRecord};

use crate::normalize::cleaner::clean_repair_description;
use crate::normalize::tokenizer::parse_operation_type;
use crate::scrub::scrub_lines;

const MAX_FIELD_CHARS: usize = 120;

/// Run the assist and fold accepted extra matches into a combined result
/// set. `None` means the assist contributed nothing (absent signal, error,
/// or no strict improvement) and the base results stand.
pub fn run_assist_pass(
    client: &dyn AssistClient,
    raw_text: &str,
    file_name: Option<&str>,
    vehicle: &VehicleRecord,
    base: &[ScrubResult],
    next_line: u32,
) -> Option<Vec<ScrubResult>> {
    let extraction = match client.assist_extract(raw_text, file_name) {
        Ok(Some(extraction)) => extraction,
        Ok(None) => return None,
        Err(e) => {
            // Assist unavailable is a degraded path, never a failed scrub.
            warn!(error = %e, "external assist unavailable, continuing without it");
            return None;
        }
    };

    let synthetic = synthetic_lines(&extraction.operations, next_line);
    if synthetic.is_empty() {
        return None;
    }

    let mut assist_results = scrub_lines(vehicle, &synthetic);
    for result in &mut assist_results {
        for m in &mut result.calibration_matches {
            m.source = MatchSource::Assist;
        }
    }

    let combined = combine(base, assist_results);
    let base_count: usize = base.iter().map(|r| r.calibration_matches.len()).sum();
    let combined_count: usize = combined.iter().map(|r| r.calibration_matches.len()).sum();

    if combined_count > base_count {
        debug!(
            base = base_count,
            combined = combined_count,
            "assist pass accepted"
        );
        Some(combined)
    } else {
        None
    }
}

/// Turn sanitized assist operations into synthetic estimate lines.
fn synthetic_lines(operations: &[AssistOperation], next_line: u32) -> Vec<RepairLine> {
    let mut lines = Vec::new();
    let mut fallback_line = next_line;

    for op in operations {
        let op_code = sanitize(&op.op_code);
        let component = sanitize(&op.component);
        if op_code.is_empty() && component.is_empty() {
            continue;
        }
        let text = format!("{op_code} {component}").trim().to_string();

        let line_number = match op.line_number {
            Some(n) if n > 0 => n,
            _ => {
                fallback_line += 1;
                fallback_line
            }
        };
        lines.push(RepairLine {
            line_number,
            raw_text: text.clone(),
            cleaned_text: clean_repair_description(&text),
            operation_type: parse_operation_type(&text),
        });
    }
    lines
}

fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FIELD_CHARS)
        .collect();
    cleaned.trim().to_string()
}

/// Union base and assist results per line, keeping the per-line
/// `(system, keyword)` dedup invariant.
fn combine(base: &[ScrubResult], assist: Vec<ScrubResult>) -> Vec<ScrubResult> {
    let mut combined: Vec<ScrubResult> = base.to_vec();

    for assist_result in assist {
        match combined
            .iter_mut()
            .find(|r| r.line_number == assist_result.line_number)
        {
            Some(existing) => {
                let mut seen: FxHashSet<(String, String)> = existing
                    .calibration_matches
                    .iter()
                    .map(|m| {
                        (
                            m.system_name.trim().to_lowercase(),
                            m.matched_keyword.trim().to_lowercase(),
                        )
                    })
                    .collect();
                for m in assist_result.calibration_matches {
                    let key = (
                        m.system_name.trim().to_lowercase(),
                        m.matched_keyword.trim().to_lowercase(),
                    );
                    if seen.insert(key) {
                        existing.calibration_matches.push(m);
                    }
                }
            }
            None => combined.push(assist_result),
        }
    }

    combined.sort_by_key(|r| r.line_number);
    combined
}
