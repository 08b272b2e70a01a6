//! Canonical system resolution.

use recal_core::types::CanonicalSystem;

use super::classify;
use crate::normalize::title_case;

/// Resolve a raw system name (plus its operation name as extra signal) onto
/// one of the seven fixed canonical systems, or a cleaned free-form
/// fallback keyed by its own normalized text.
pub fn canonicalize_system(raw_system_name: &str, operation_name: &str) -> CanonicalSystem {
    let combined = format!("{raw_system_name} {operation_name}");
    if let Some(class) = classify(&combined) {
        return CanonicalSystem::new(class.key(), class.label());
    }

    let base = if raw_system_name.trim().is_empty() {
        operation_name.trim()
    } else {
        raw_system_name.trim()
    };
    if base.is_empty() {
        return CanonicalSystem::new("unspecified", "Unspecified System");
    }

    let label = title_case(base);
    CanonicalSystem::new(slug(&label), label)
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_collapse_to_one_system() {
        let a = canonicalize_system("front radar / acc-aeb", "");
        let b = canonicalize_system("Front Radar / ACC-AEB", "Front Radar Calibration");
        let c = canonicalize_system("ACC sensor", "radar aiming");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.key, "front-radar");
        assert_eq!(a.label, "Front Radar / ACC-AEB");
    }

    #[test]
    fn operation_name_contributes_signal() {
        let sys = canonicalize_system("driver assist module", "blind spot aiming");
        assert_eq!(sys.key, "blind-spot-radar");
    }

    #[test]
    fn free_form_fallback_keyed_by_own_text() {
        let sys = canonicalize_system("Night Vision", "");
        assert_eq!(sys.key, "night-vision");
        assert_eq!(sys.label, "Night Vision");
    }
}
