//! Behavior records and scoring.
//!
//! A [`Call`] is one allowed behavior for an operation: an optional list of
//! parameter matchers plus at most one [`Outcome`]. When an invocation
//! arrives, every call registered for the operation is scored against the
//! actual arguments:
//!
//! 1. no parameter matchers at all: score = 1 (matches anything, but barely);
//! 2. arity differs from the actual argument count: score = 0;
//! 3. any position fails its matcher: score = 0;
//! 4. otherwise each position adds 4 for an equality or nil matcher, 3 for an
//!    equivalence matcher and 2 for any other matcher.
//!
//! Exact expectations therefore outrank looser ones, and every call with
//! matchers outranks the parameterless wildcard. Imagine mocking
//! `Add(a, b, c)`:
//!
//! ```text
//! allow("Add").raising("so confused")                        // wildcard
//! allow("Add").with(1, 2, 3).returning(6)                    // 4+4+4 = 12
//! allow("Add").with(1, 2, anything_of_type("i64")).raising(..)  // 4+4+2 = 10
//! allow("Add").with(be_numerically(">", 0), 2, anything()).returning(0)
//!
//! Add(7, 2, "hi")  -> 0
//! Add(1, 2, 99)    -> raises
//! Add(1, 2, 3)     -> 6
//! Add(8, 8, 8)     -> raises "so confused"
//! ```

use mimic_types::{widen, MatchResult, MatcherKind, SharedMatcher, Value};

use crate::error::BehaviorError;
use crate::outcome::{Outcome, Raised};

/// Score of a call registered without parameter matchers.
pub const WILDCARD_SCORE: u32 = 1;

/// Per-position weight of a satisfied matcher.
pub fn weight(kind: MatcherKind) -> u32 {
    match kind {
        MatcherKind::Equality | MatcherKind::Absence => 4,
        MatcherKind::Equivalence => 3,
        MatcherKind::Predicate => 2,
    }
}

/// One allowed behavior of a mocked operation.
#[derive(Clone, Debug, Default)]
pub struct Call {
    params: Option<Vec<SharedMatcher>>,
    outcome: Option<Outcome>,
}

impl Call {
    /// Wildcard call with no outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter matchers, or `None` when the call accepts any arguments.
    pub fn params(&self) -> Option<&[SharedMatcher]> {
        self.params.as_deref()
    }

    /// Outcome of the call, if one was set.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Attach parameter matchers. Allowed once per call, and only before
    /// the outcome.
    pub fn set_params(&mut self, params: Vec<SharedMatcher>) -> Result<(), BehaviorError> {
        if self.params.is_some() {
            return Err(BehaviorError::ParamsAlreadySet);
        }
        if let Some(outcome) = &self.outcome {
            return Err(BehaviorError::ParamsAfterOutcome(outcome.kind()));
        }
        self.params = Some(params);
        Ok(())
    }

    /// Attach the outcome. A call carries at most one outcome of one kind;
    /// any second attempt is rejected whatever the order.
    pub fn set_outcome(&mut self, outcome: Outcome) -> Result<(), BehaviorError> {
        if let Some(existing) = &self.outcome {
            let (existing, attempted) = (existing.kind(), outcome.kind());
            return Err(if existing == attempted {
                BehaviorError::OutcomeAlreadySet(attempted)
            } else {
                BehaviorError::ConflictingOutcomes {
                    existing,
                    attempted,
                }
            });
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Score this call against actual arguments; 0 means no match.
    ///
    /// Arguments are widened before each matcher sees them. Scoring never
    /// runs the outcome.
    pub fn score(&self, args: &[Value]) -> MatchResult<u32> {
        let Some(params) = &self.params else {
            return Ok(WILDCARD_SCORE);
        };
        if params.len() != args.len() {
            return Ok(0);
        }

        let mut score = 0;
        for (matcher, arg) in params.iter().zip(args) {
            if !matcher.matches(&widen(arg))? {
                return Ok(0);
            }
            score += weight(matcher.kind());
        }
        Ok(score)
    }

    /// Run the outcome with the raw arguments.
    ///
    /// A call without an outcome yields an empty result, which is distinct
    /// from the call not matching at all.
    pub fn execute(&self, args: &[Value]) -> Result<Vec<Value>, Raised> {
        match &self.outcome {
            Some(Outcome::Delegate(func)) => Ok(func(args)),
            Some(Outcome::Raise(reason)) => Err(Raised(reason.clone())),
            Some(Outcome::Return(values)) => Ok(values.clone()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::outcome::OutcomeKind;
    use mimic_types::{anything, match_params, match_regexp, params, values};

    fn call_with(p: Vec<mimic_types::Param>) -> Call {
        let mut call = Call::new();
        call.set_params(match_params(p)).unwrap();
        call
    }

    #[test]
    fn wildcard_scores_one_for_any_arity() {
        let call = Call::new();
        assert_eq!(call.score(&[]).unwrap(), 1);
        assert_eq!(call.score(&values![1, 2, 3]).unwrap(), 1);
    }

    #[test]
    fn arity_mismatch_disqualifies() {
        let call = call_with(params![1, 2]);
        assert_eq!(call.score(&values![1]).unwrap(), 0);
        assert_eq!(call.score(&values![1, 2, 3]).unwrap(), 0);
    }

    #[test]
    fn empty_matcher_list_never_scores() {
        let call = call_with(params![]);
        assert_eq!(call.score(&[]).unwrap(), 0);
        assert_eq!(call.score(&values![1]).unwrap(), 0);
    }

    #[test]
    fn weights_by_matcher_kind() {
        let call = call_with(params![1, Value::Nil, vec![1, 2], anything()]);
        let args = values![1, Value::Nil, vec![1, 2], "x"];
        assert_eq!(call.score(&args).unwrap(), 4 + 4 + 3 + 2);
    }

    #[test]
    fn any_failing_position_scores_zero() {
        let call = call_with(params![1, anything()]);
        assert_eq!(call.score(&values![2, "x"]).unwrap(), 0);
    }

    #[test]
    fn equality_outranks_equivalence() {
        let eq = call_with(params![mimic_types::equal(5)]);
        let equiv = call_with(params![mimic_types::equivalent_to(5)]);
        let args = values![5];
        assert!(eq.score(&args).unwrap() > equiv.score(&args).unwrap());
    }

    #[test]
    fn actual_arguments_are_widened() {
        let call = call_with(params![5u64]);
        assert!(call.score(&[Value::U8(5)]).unwrap() > 0);
    }

    #[test]
    fn matcher_errors_propagate() {
        let call = call_with(params![match_regexp("[")]);
        assert!(call.score(&values!["x"]).is_err());
    }

    #[test]
    fn params_set_once() {
        let mut call = call_with(params![1]);
        assert_eq!(
            call.set_params(match_params(params![2])),
            Err(BehaviorError::ParamsAlreadySet)
        );
    }

    #[test]
    fn params_rejected_once_outcome_is_set() {
        let mut call = Call::new();
        call.set_outcome(Outcome::Return(values![1])).unwrap();
        assert_eq!(
            call.set_params(match_params(params![2])),
            Err(BehaviorError::ParamsAfterOutcome(OutcomeKind::Return))
        );
        assert!(call.params().is_none());
        assert_eq!(call.score(&values![9]).unwrap(), 1);
    }

    #[test]
    fn outcome_exclusivity_in_every_order() {
        let outcomes = || {
            vec![
                Outcome::Delegate(Arc::new(|_: &[Value]| Vec::<Value>::new())),
                Outcome::Raise(Value::from("boom")),
                Outcome::Return(values![1]),
            ]
        };
        for (i, first) in outcomes().into_iter().enumerate() {
            for (j, second) in outcomes().into_iter().enumerate() {
                let mut call = Call::new();
                call.set_outcome(first.clone()).unwrap();
                let err = call.set_outcome(second).unwrap_err();
                if i == j {
                    assert!(matches!(err, BehaviorError::OutcomeAlreadySet(_)));
                } else {
                    assert!(matches!(err, BehaviorError::ConflictingOutcomes { .. }));
                }
            }
        }
    }

    #[test]
    fn conflicting_outcome_names_both_kinds() {
        let mut call = Call::new();
        call.set_outcome(Outcome::Return(values![])).unwrap();
        let err = call.set_outcome(Outcome::Raise(Value::Nil)).unwrap_err();
        assert_eq!(
            err,
            BehaviorError::ConflictingOutcomes {
                existing: OutcomeKind::Return,
                attempted: OutcomeKind::Raise,
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot simultaneously returning() and raising(); choose one"
        );
    }

    #[test]
    fn execute_each_outcome() {
        let mut delegate = Call::new();
        delegate
            .set_outcome(Outcome::Delegate(Arc::new(|args: &[Value]| {
                vec![Value::U64(args.len() as u64)]
            })))
            .unwrap();
        assert_eq!(delegate.execute(&values![1, 2]).unwrap(), values![2u64]);

        let mut raise = Call::new();
        raise.set_outcome(Outcome::Raise(Value::from("nope"))).unwrap();
        assert_eq!(raise.execute(&[]).unwrap_err(), Raised(Value::from("nope")));

        let mut ret = Call::new();
        ret.set_outcome(Outcome::Return(values![6])).unwrap();
        assert_eq!(ret.execute(&[]).unwrap(), values![6]);

        assert!(Call::new().execute(&[]).unwrap().is_empty());
    }
}
