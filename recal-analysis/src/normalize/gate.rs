//! The operation-line gate.
//!
//! Runs before any keyword matching to suppress false positives from
//! boilerplate, legal, vendor, and address text — the main noise source in
//! OCR'd estimates.

use std::sync::OnceLock;

use regex::Regex;

fn street_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\d+\s+[a-z0-9 .'-]+\b(street|st|avenue|ave|road|rd|boulevard|blvd|drive|dr|lane|ln|way|court|ct|highway|hwy|parkway|pkwy|suite|ste)\b\.?",
        )
        .unwrap()
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\+?1[-. ])?\(?\d{3}\)?[-. ]\d{3}[-. ]\d{4}").unwrap()
    })
}

fn city_state_zip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b[a-z .'-]+,\s*[a-z]{2}\s+\d{5}(?:-\d{4})?\b").unwrap()
    })
}

fn vendor_address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Vendor quality code (CAPA, NSF, A/M...) prefixing a street address.
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z]{1,4}(?:/[A-Z])?\d*\s+\d+\s+[A-Za-z0-9 .'-]+").unwrap()
    })
}

fn operation_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*\d{0,4}\s*(rpr|repl|o[-/]h|r\s*&\s*i|r\s*&\s*r|subl|sublet|add|blnd|blend|refn|refinish|aim|align|calibrat|repair|remove|replace|overhaul)\b",
        )
        .unwrap()
    })
}

/// True when a raw line plausibly describes an estimate operation rather
/// than address/phone/vendor/legal boilerplate.
pub fn is_likely_estimate_operation_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return false;
    }

    if street_suffix_re().is_match(trimmed)
        || phone_re().is_match(trimmed)
        || city_state_zip_re().is_match(trimmed)
        || (vendor_address_re().is_match(trimmed) && !operation_start_re().is_match(trimmed))
    {
        return false;
    }

    operation_start_re().is_match(trimmed) || is_section_header(trimmed)
}

/// Short all-caps section headers ("FRONT BUMPER", "SUPPLEMENT 1") stay
/// eligible — they often carry the component the following lines omit.
fn is_section_header(line: &str) -> bool {
    if line.len() > 32 {
        return false;
    }
    let letters = line.chars().filter(|c| c.is_ascii_alphabetic()).count();
    letters >= 3
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_whitespace() || c == '&')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbered_operation_lines() {
        assert!(is_likely_estimate_operation_line("6 O/H Front Bumper Cover"));
        assert!(is_likely_estimate_operation_line("Repl windshield w/ moulding"));
        assert!(is_likely_estimate_operation_line("12 R&I radar sensor"));
        assert!(is_likely_estimate_operation_line("Aim headlamps"));
    }

    #[test]
    fn rejects_short_and_address_lines() {
        assert!(!is_likely_estimate_operation_line("ok"));
        assert!(!is_likely_estimate_operation_line("1234 Main Street"));
        assert!(!is_likely_estimate_operation_line("Springfield, IL 62704"));
        assert!(!is_likely_estimate_operation_line("Call (555) 867-5309 for questions"));
    }

    #[test]
    fn rejects_vendor_address_but_not_vendor_parts() {
        assert!(!is_likely_estimate_operation_line("CAPA 4100 Industrial Blvd"));
        // A quality-marker on a real operation line stays eligible.
        assert!(is_likely_estimate_operation_line("Repl CAPA bumper cover"));
    }

    #[test]
    fn accepts_section_headers() {
        assert!(is_likely_estimate_operation_line("FRONT BUMPER"));
        assert!(!is_likely_estimate_operation_line(
            "All amounts are subject to the insurer's final review"
        ));
    }
}
