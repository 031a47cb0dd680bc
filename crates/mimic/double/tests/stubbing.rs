//! Property tests for unmatched invocations on a `Double`.

use mimic::{Double, DoubleConfig, DoubleError, Spied, Value};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_invocation() -> impl Strategy<Value = (String, Vec<Value>)> {
    (
        "[A-Z][a-z]{0,6}",
        prop::collection::vec(any::<i32>().prop_map(Value::I32), 0..4),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// With stubbing on, anything unmatched answers with no values.
    #[test]
    fn stubbed_double_never_fails((operation, args) in arb_invocation()) {
        let mut double = Double::with_config(DoubleConfig::default().with_stub(true));
        prop_assert!(double.invoke(&operation, args).unwrap().is_empty());
    }

    /// With stubbing off, the unmatched invocation comes back in the error
    /// and is still recorded.
    #[test]
    fn unmatched_invocation_is_reported((operation, args) in arb_invocation()) {
        let mut double = Double::new();
        let err = double.invoke(&operation, args.clone()).unwrap_err();
        prop_assert_eq!(err, DoubleError::Unmatched { operation: operation.clone(), args });
        prop_assert_eq!(double.spy().count(&operation, &[]).unwrap(), 1);
    }
}
