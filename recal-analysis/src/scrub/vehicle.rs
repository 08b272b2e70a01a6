//! Vehicle resolution against the catalog snapshot.

use recal_core::types::VehicleRecord;

/// Trim/drivetrain/body tokens stripped when comparing model "cores".
const TRIM_TOKENS: &[&str] = &[
    "base", "s", "se", "sel", "sl", "le", "xle", "xse", "l", "lx", "ex", "ex-l", "si",
    "touring", "sport", "limited", "premium", "platinum", "denali", "lt", "ltz", "rs", "ss",
    "gt", "trd", "pro", "lariat", "xl", "xlt", "awd", "4wd", "fwd", "rwd", "2wd", "hybrid",
    "phev", "ev", "turbo", "sedan", "coupe", "hatchback", "wagon", "crew", "cab", "4dr",
    "2dr", "nightshade", "off-road",
];

/// Wildcard model entry matching any model of its make.
const ALL_MODELS: &str = "all models";

/// Lowercase, collapse whitespace, and fold common make aliases
/// (Mercedes-Benz variants in particular) onto one normalized name.
pub fn normalize_make(raw: &str) -> String {
    let collapsed = raw
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    match collapsed.as_str() {
        "mercedes-benz" | "mercedes benz" | "mb" | "mercedes" => "mercedes".to_string(),
        "vw" => "volkswagen".to_string(),
        "chevy" => "chevrolet".to_string(),
        other => other.to_string(),
    }
}

/// Lowercase and collapse whitespace.
pub fn normalize_model(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip trailing trim tokens: "camry se awd" → "camry".
pub fn model_core(raw: &str) -> String {
    let normalized = normalize_model(raw);
    let mut tokens: Vec<&str> = normalized.split(' ').collect();
    while tokens.len() > 1 {
        let last = tokens[tokens.len() - 1];
        if TRIM_TOKENS.contains(&last) {
            tokens.pop();
        } else {
            break;
        }
    }
    tokens.join(" ")
}

/// Resolve the best catalog record for (year, make, model).
///
/// Precedence: exact normalized model, core model, substring containment
/// (min length 4, either direction), then the make's "All Models" wildcard.
/// No make match at all is a legitimate "no data" outcome, not an error.
pub fn resolve_vehicle<'a>(
    records: &'a [VehicleRecord],
    year: u16,
    make: &str,
    model: &str,
) -> Option<&'a VehicleRecord> {
    let wanted_make = normalize_make(make);
    let candidates: Vec<&VehicleRecord> = records
        .iter()
        .filter(|r| r.year_start <= year && year <= r.year_end)
        .filter(|r| normalize_make(&r.make) == wanted_make)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let wanted_model = normalize_model(model);
    let wanted_core = model_core(model);

    if let Some(hit) = candidates
        .iter()
        .find(|r| normalize_model(&r.model) == wanted_model && !wanted_model.is_empty())
    {
        return Some(hit);
    }
    if let Some(hit) = candidates
        .iter()
        .find(|r| model_core(&r.model) == wanted_core && !wanted_core.is_empty())
    {
        return Some(hit);
    }
    if wanted_model.len() >= 4 {
        if let Some(hit) = candidates.iter().find(|r| {
            let record_model = normalize_model(&r.model);
            record_model.len() >= 4
                && (record_model.contains(&wanted_model) || wanted_model.contains(&record_model))
        }) {
            return Some(hit);
        }
    }
    candidates
        .iter()
        .find(|r| normalize_model(&r.model) == ALL_MODELS)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recal_core::types::VehicleRecord;

    fn record(id: &str, make: &str, model: &str, year_start: u16, year_end: u16) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            year_start,
            year_end,
            make: make.to_string(),
            model: model.to_string(),
            trigger_mappings: Vec::new(),
            adas_systems: Vec::new(),
        }
    }

    #[test]
    fn make_aliases_fold() {
        assert_eq!(normalize_make("Mercedes-Benz"), "mercedes");
        assert_eq!(normalize_make("MERCEDES  BENZ"), "mercedes");
        assert_eq!(normalize_make("Toyota"), "toyota");
    }

    #[test]
    fn model_core_strips_trim_tokens() {
        assert_eq!(model_core("Camry SE"), "camry");
        assert_eq!(model_core("F-150 XLT Crew Cab"), "f-150");
        assert_eq!(model_core("Model 3"), "model 3");
    }

    #[test]
    fn resolution_precedence() {
        let records = vec![
            record("wild", "Toyota", "All Models", 2018, 2026),
            record("core", "Toyota", "Camry", 2018, 2026),
            record("exact", "Toyota", "Camry SE", 2018, 2026),
        ];
        // Exact beats core.
        let hit = resolve_vehicle(&records, 2022, "Toyota", "camry se").unwrap();
        assert_eq!(hit.id, "exact");
        // Core comparison strips the trim.
        let hit = resolve_vehicle(&records, 2022, "Toyota", "Camry XLE").unwrap();
        assert_eq!(hit.id, "core");
        // Unknown model falls to the wildcard.
        let hit = resolve_vehicle(&records, 2022, "Toyota", "Sienna").unwrap();
        assert_eq!(hit.id, "wild");
    }

    #[test]
    fn containment_needs_four_chars() {
        let records = vec![record("r", "Honda", "Civic Type R", 2020, 2025)];
        assert!(resolve_vehicle(&records, 2022, "Honda", "civic").is_some());
        // Two-char fragments never match by containment.
        assert!(resolve_vehicle(&records, 2022, "Honda", "ci").is_none());
    }

    #[test]
    fn no_make_match_is_none() {
        let records = vec![record("r", "Toyota", "Camry", 2018, 2026)];
        assert!(resolve_vehicle(&records, 2022, "Zonda", "Camry").is_none());
        // Year outside range also misses.
        assert!(resolve_vehicle(&records, 2010, "Toyota", "Camry").is_none());
    }
}
