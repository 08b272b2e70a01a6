//! Best-effort "Component - Operation" display text.
//!
//! Display only — every matching stage runs on the raw/lowercased line, not
//! on this cleanup.

use std::sync::OnceLock;

use regex::Regex;

/// Ordered component-name patterns; first hit wins.
const COMPONENT_PATTERNS: &[&str] = &[
    "bumper reinforcement",
    "front bumper cover",
    "rear bumper cover",
    "front bumper",
    "rear bumper",
    "bumper cover",
    "bumper",
    "grille",
    "windshield",
    "quarter panel",
    "side mirror",
    "door mirror",
    "mirror",
    "headlamp",
    "headlight",
    "tailgate",
    "liftgate",
    "hood",
    "fender",
    "door",
    "roof",
    "radar sensor",
    "radar",
    "camera",
    "parking sensor",
    "steering angle sensor",
    "alignment",
    "suspension",
    "steering",
];

fn operation_display_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*\d{0,4}\s*(r\s*&\s*i|r\s*&\s*r|o[-/]h|rpr|repl|refn|refinish|blnd|blend|subl|sublet|aim|align|calibrat\w*|repair|remove|replace|overhaul)\b",
        )
        .unwrap()
    })
}

fn strip_noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Part numbers, prices, quantities, quality markers.
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\$\s?\d[\d,]*(?:\.\d{2})?|\b\d+\.\d{2}\b|\b[a-z0-9]*\d{5,}[a-z0-9]*\b|#\s?\d+|\bqty\b\s*\d*|\bx\s?\d\b|\b(?:lkq|capa|nsf|a/m|oem|reman|recond)\b",
        )
        .unwrap()
    })
}

/// Extract a legible "Component - Operation" string from a raw line.
///
/// Falls back to aggressive noise stripping, then to a raw truncation if
/// nothing legible remains.
pub fn clean_repair_description(line: &str) -> String {
    let operation = operation_display_re()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| display_operation(m.as_str()));

    let lowered = line.to_lowercase();
    let component = COMPONENT_PATTERNS
        .iter()
        .find(|p| lowered.contains(*p))
        .map(|p| title_case(p));

    match (component, operation) {
        (Some(c), Some(o)) => format!("{c} - {o}"),
        (Some(c), None) => c,
        (None, op) => {
            let stripped = strip_noise_re().replace_all(line, " ");
            let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
            let base = if collapsed.len() >= 3 {
                collapsed
            } else {
                line.trim().to_string()
            };
            let truncated = truncate(&base, 80);
            match op {
                Some(o) if !truncated.is_empty() => format!("{} - {o}", title_case(&truncated)),
                _ => title_case(&truncated),
            }
        }
    }
}

fn display_operation(token: &str) -> String {
    let compact = token.to_lowercase().replace(char::is_whitespace, "");
    match compact.as_str() {
        "r&i" => "R&I".to_string(),
        "r&r" | "repl" | "replace" => "Replace".to_string(),
        "rpr" | "repair" => "Repair".to_string(),
        "refn" | "refinish" => "Refinish".to_string(),
        "blnd" | "blend" => "Blend".to_string(),
        "o/h" | "o-h" | "overhaul" => "Overhaul".to_string(),
        "subl" | "sublet" => "Sublet".to_string(),
        "aim" => "Aim".to_string(),
        "align" => "Align".to_string(),
        "remove" => "Remove".to_string(),
        other if other.starts_with("calibrat") => "Calibrate".to_string(),
        other => title_case(other),
    }
}

/// Title-case each whitespace-separated word. Short all-caps tokens are
/// preserved and short `/`-joined tokens ("o/h") are treated as acronyms.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            if word.len() <= 4 {
                if word.chars().all(|c| !c.is_ascii_lowercase()) {
                    return word.to_string();
                }
                if word.contains('/') {
                    return word.to_uppercase();
                }
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].trim_end().to_string()
}
