//! Calibration-type canonicalization and merging.

use crate::normalize::title_case;

pub const TYPE_STATIC_DYNAMIC: &str = "Static + Dynamic";
pub const TYPE_STATIC: &str = "Static";
pub const TYPE_DYNAMIC: &str = "Dynamic";
pub const TYPE_CODING: &str = "Coding / Initialization";
pub const TYPE_INITIALIZATION: &str = "Initialization";
pub const TYPE_OEM: &str = "OEM Procedure";

/// Fixed priority order for joining merged types.
const TYPE_PRIORITY: &[&str] = &[
    TYPE_STATIC_DYNAMIC,
    TYPE_STATIC,
    TYPE_DYNAMIC,
    TYPE_CODING,
    TYPE_INITIALIZATION,
    TYPE_OEM,
];

/// Map free text onto the closed calibration-type vocabulary; unknown text
/// comes back title-cased. "static"+"dynamic" both present wins over either
/// alone.
pub fn canonicalize_calibration_type(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }
    let has_static = lowered.contains("static");
    let has_dynamic = lowered.contains("dynamic");
    if has_static && has_dynamic {
        return TYPE_STATIC_DYNAMIC.to_string();
    }
    if has_static {
        return TYPE_STATIC.to_string();
    }
    if has_dynamic {
        return TYPE_DYNAMIC.to_string();
    }
    if lowered.contains("coding") {
        return TYPE_CODING.to_string();
    }
    if lowered.contains("initializ") {
        return TYPE_INITIALIZATION.to_string();
    }
    if lowered.contains("oem") {
        return TYPE_OEM.to_string();
    }
    title_case(raw.trim())
}

/// Merge many raw calibration types into one display string.
///
/// Commutative, idempotent, and associative: inputs are split into their
/// component types, canonicalized into a set, reduced (Static+Dynamic
/// collapse, drop OEM Procedure when anything more specific exists, drop
/// plain Initialization when Coding/Initialization exists), then joined in
/// fixed priority order with alphabetical tiebreak.
pub fn merge_calibration_types<S: AsRef<str>>(types: &[S]) -> String {
    let mut set: Vec<String> = Vec::new();
    for raw in types {
        // Split previously joined values so merging is associative.
        for part in raw.as_ref().split('/') {
            let canonical = canonicalize_calibration_type(part);
            if !canonical.is_empty() && !set.contains(&canonical) {
                set.push(canonical);
            }
        }
    }

    // "Coding / Initialization" splits into Coding → Coding/Init plus plain
    // Initialization; the reductions below re-collapse it.
    if set.iter().any(|t| t == TYPE_STATIC) && set.iter().any(|t| t == TYPE_DYNAMIC) {
        set.retain(|t| t != TYPE_STATIC && t != TYPE_DYNAMIC);
        if !set.contains(&TYPE_STATIC_DYNAMIC.to_string()) {
            set.push(TYPE_STATIC_DYNAMIC.to_string());
        }
    }
    if set.iter().any(|t| t == TYPE_STATIC_DYNAMIC) {
        set.retain(|t| t != TYPE_STATIC && t != TYPE_DYNAMIC);
    }
    if set.iter().any(|t| t == TYPE_CODING) {
        set.retain(|t| t != TYPE_INITIALIZATION);
    }
    if set.len() > 1 {
        set.retain(|t| t != TYPE_OEM);
    }

    set.sort_by(|a, b| {
        let pa = TYPE_PRIORITY.iter().position(|p| p == a).unwrap_or(TYPE_PRIORITY.len());
        let pb = TYPE_PRIORITY.iter().position(|p| p == b).unwrap_or(TYPE_PRIORITY.len());
        pa.cmp(&pb).then_with(|| a.cmp(b))
    });
    set.join(" / ")
}
