//! Property tests: numeric widening makes matching insensitive to bit width
//! but never to numeric category.

use mimic_types::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A narrow unsigned value paired with its `u64` counterpart.
fn arb_unsigned() -> impl Strategy<Value = (Value, u64)> {
    prop_oneof![
        any::<u8>().prop_map(|n| (Value::U8(n), n as u64)),
        any::<u16>().prop_map(|n| (Value::U16(n), n as u64)),
        any::<u32>().prop_map(|n| (Value::U32(n), n as u64)),
        any::<u64>().prop_map(|n| (Value::U64(n), n)),
    ]
}

/// A narrow signed value paired with its `i64` counterpart.
fn arb_signed() -> impl Strategy<Value = (Value, i64)> {
    prop_oneof![
        any::<i8>().prop_map(|n| (Value::I8(n), n as i64)),
        any::<i16>().prop_map(|n| (Value::I16(n), n as i64)),
        any::<i32>().prop_map(|n| (Value::I32(n), n as i64)),
        any::<i64>().prop_map(|n| (Value::I64(n), n)),
    ]
}

/// Small nested values mixing references, lists and records.
fn arb_nested() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<u8>().prop_map(Value::U8),
        any::<i16>().prop_map(Value::I16),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,6}".prop_map(Value::Str),
        Just(Value::Nil),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            inner.clone().prop_map(|v| Value::Ref(Box::new(v))),
            (inner.clone(), inner).prop_map(|(a, b)| Value::record("Pair", [("a", a), ("b", b)])),
        ]
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Any unsigned width satisfies an equality built against the u64 form.
    #[test]
    fn unsigned_widths_match_u64_equality((narrow, wide) in arb_unsigned()) {
        prop_assert!(equal(wide).matches(&widen(&narrow)).unwrap());
        prop_assert_eq!(widen(&narrow), Value::U64(wide));
    }

    /// Any signed width satisfies an equality built against the i64 form.
    #[test]
    fn signed_widths_match_i64_equality((narrow, wide) in arb_signed()) {
        prop_assert!(equal(wide).matches(&widen(&narrow)).unwrap());
    }

    /// Signed and unsigned categories never compare equal.
    #[test]
    fn categories_stay_distinct(n in 0u8..=127) {
        prop_assert!(!equal(n as u64).matches(&widen(&Value::I8(n as i8))).unwrap());
        prop_assert!(!equal(n as i64).matches(&widen(&Value::U8(n))).unwrap());
    }

    /// Widening and normalization are idempotent.
    #[test]
    fn normalization_is_idempotent(v in arb_nested()) {
        prop_assert_eq!(widen(&widen(&v)), widen(&v));
        prop_assert_eq!(normalize(&normalize(&v)), normalize(&v));
    }

    /// A value is always equivalent to itself behind a reference.
    #[test]
    fn equivalence_sees_through_references(v in arb_nested()) {
        let m = equivalent_to(v.clone());
        prop_assert!(m.matches(&Value::reference(v)).unwrap());
    }
}
