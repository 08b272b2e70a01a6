//! Algebraic properties of the canonicalizer.

use proptest::prelude::*;

use recal_analysis::canonical::{
    canonicalize_calibration_type, canonicalize_operation_name, canonicalize_system,
    merge_calibration_types,
};

const CANONICAL_TYPES: &[&str] = &[
    "Static + Dynamic",
    "Static",
    "Dynamic",
    "Coding / Initialization",
    "Initialization",
    "OEM Procedure",
];

const RAW_OPERATIONS: &[&str] = &[
    "inferred radar trigger",
    "Front Radar Calibration",
    "steering angle sensor reset",
    "blind spot monitor aiming",
    "surround view target setup",
    "rear camera aim",
    "backup camera calibration",
    "parking sensor initialization",
    "windshield camera calibration",
    "Night Vision Aiming",
    "adaptive cruise alignment",
];

#[test]
fn operation_canonicalization_is_idempotent_on_samples() {
    for raw in RAW_OPERATIONS {
        let once = canonicalize_operation_name(raw, "", "");
        let twice = canonicalize_operation_name(&once, "", "");
        assert_eq!(once, twice, "not idempotent for {raw:?}");
    }
}

#[test]
fn system_canonicalization_is_stable_under_own_output() {
    for raw in RAW_OPERATIONS {
        let op = canonicalize_operation_name(raw, "", "");
        let system = canonicalize_system(raw, &op);
        let again = canonicalize_system(&system.label, &op);
        assert_eq!(system, again, "system flapped for {raw:?}");
    }
}

#[test]
fn merge_pairs_commute_across_canonical_set() {
    for a in CANONICAL_TYPES {
        for b in CANONICAL_TYPES {
            assert_eq!(
                merge_calibration_types(&[a, b]),
                merge_calibration_types(&[b, a]),
                "merge not commutative for ({a}, {b})"
            );
        }
    }
}

#[test]
fn merge_drops_oem_procedure_when_more_specific_types_exist() {
    assert_eq!(
        merge_calibration_types(&["Static", "Dynamic", "OEM Procedure"]),
        "Static + Dynamic"
    );
}

// Order-sensitivity of the classification table is an invariant, not an
// accident: these strings contain tokens from more than one rule.
#[test]
fn classification_order_is_preserved() {
    assert_eq!(
        canonicalize_operation_name("steering angle radar module", "", ""),
        "Steering Angle Sensor Reset/Relearn"
    );
    assert_eq!(
        canonicalize_operation_name("blind spot radar", "", ""),
        "Blind Spot Radar Calibration"
    );
    assert_eq!(
        canonicalize_operation_name("surround camera", "", ""),
        "Surround View Camera Calibration"
    );
    assert_eq!(
        canonicalize_operation_name("rear view camera", "", ""),
        "Rear Camera Calibration"
    );
}

proptest! {
    #[test]
    fn operation_canonicalization_idempotent_for_arbitrary_text(
        raw in "[a-zA-Z0-9 /+-]{0,40}",
    ) {
        let once = canonicalize_operation_name(&raw, "", "");
        let twice = canonicalize_operation_name(&once, "", "");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn calibration_type_canonicalization_idempotent(
        raw in "[a-zA-Z /+]{0,30}",
    ) {
        let once = canonicalize_calibration_type(&raw);
        let twice = canonicalize_calibration_type(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_permutation_invariant(
        indices in proptest::collection::vec(0usize..6, 1..5),
    ) {
        let types: Vec<&str> = indices.iter().map(|i| CANONICAL_TYPES[*i]).collect();
        let mut reversed = types.clone();
        reversed.reverse();
        prop_assert_eq!(
            merge_calibration_types(&types),
            merge_calibration_types(&reversed)
        );
    }

    #[test]
    fn merge_is_idempotent_under_self_application(
        indices in proptest::collection::vec(0usize..6, 1..5),
    ) {
        let types: Vec<&str> = indices.iter().map(|i| CANONICAL_TYPES[*i]).collect();
        let merged = merge_calibration_types(&types);
        prop_assert_eq!(merge_calibration_types(&[merged.clone()]), merged);
    }
}
