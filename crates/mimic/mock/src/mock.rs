//! The behavior registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mimic_types::Value;
use tracing::{debug, trace};

use crate::allowed::Allowed;
use crate::call::Call;
use crate::error::{BehaviorError, MockError, MockResult};
use crate::tie_break::{LastAllowed, TieBreak};

/// State container for mocked behavior.
///
/// Holds, per operation name, the calls allowed through [`Mock::allow`] in
/// registration order. A test double embeds a `Mock` and forwards each of
/// its methods to [`Mock::call`] or [`Mock::try_call`]:
///
/// ```rust
/// use mimic_mock::Mock;
/// use mimic_types::{anything, params, values};
///
/// let mut mock = Mock::new();
/// mock.allow().call("Add").with(params![1, 2, 3]).returning(values![6]);
/// mock.allow()
///     .call("Add")
///     .with(params![anything(), anything(), anything()])
///     .returning(values![0]);
///
/// assert_eq!(mock.call("Add", &values![1, 2, 3]), Some(values![6]));
/// assert_eq!(mock.call("Add", &values![9, 9, 9]), Some(values![0]));
/// assert_eq!(mock.call("Sub", &values![1, 1]), None);
/// ```
#[derive(Clone)]
pub struct Mock {
    calls: Option<BTreeMap<String, Vec<Call>>>,
    tie_break: Arc<dyn TieBreak>,
}

impl Mock {
    /// An empty, ready-to-use registry.
    pub fn new() -> Self {
        Self {
            calls: Some(BTreeMap::new()),
            tie_break: Arc::new(LastAllowed),
        }
    }

    /// A registry slot that was never set up. Every operation on it fails
    /// until [`Mock::initialize`] is called.
    pub fn uninitialized() -> Self {
        Self {
            calls: None,
            tie_break: Arc::new(LastAllowed),
        }
    }

    /// Make the registry usable, keeping any behaviors already allowed.
    pub fn initialize(&mut self) {
        self.calls.get_or_insert_with(BTreeMap::new);
    }

    /// Whether the registry can accept calls.
    pub fn is_initialized(&self) -> bool {
        self.calls.is_some()
    }

    /// Replace the tie-break strategy.
    pub fn with_tie_break(mut self, tie_break: impl TieBreak + 'static) -> Self {
        self.tie_break = Arc::new(tie_break);
        self
    }

    /// Replace the default tie-break strategy.
    pub fn set_tie_break(&mut self, tie_break: Arc<dyn TieBreak>) {
        self.tie_break = tie_break;
    }

    /// Start programming a behavior.
    ///
    /// # Panics
    ///
    /// Panics if the registry is not initialized.
    #[track_caller]
    pub fn allow(&mut self) -> Allowed<'_> {
        match self.try_allow() {
            Ok(allowed) => allowed,
            Err(err) => panic!("mimic: {err}"),
        }
    }

    /// Fallible form of [`Mock::allow`]; fails on an uninitialized registry.
    pub fn try_allow(&mut self) -> Result<Allowed<'_>, BehaviorError> {
        if !self.is_initialized() {
            return Err(BehaviorError::Uninitialized);
        }
        Ok(Allowed::new(self))
    }

    /// Append a fresh call for `operation`, returning its index.
    pub(crate) fn open(&mut self, operation: &str) -> Result<usize, BehaviorError> {
        let calls = self.calls.as_mut().ok_or(BehaviorError::Uninitialized)?;
        let list = calls.entry(operation.to_string()).or_default();
        list.push(Call::new());
        debug!(operation, index = list.len() - 1, "allowed call opened");
        Ok(list.len() - 1)
    }

    pub(crate) fn call_mut(&mut self, operation: &str, index: usize) -> Option<&mut Call> {
        self.calls.as_mut()?.get_mut(operation)?.get_mut(index)
    }

    /// Calls allowed for `operation`, in registration order.
    pub fn calls(&self, operation: &str) -> &[Call] {
        self.calls
            .as_ref()
            .and_then(|calls| calls.get(operation))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Operation names with at least one allowed call, sorted.
    pub fn operations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .flat_map(|calls| calls.keys())
            .map(String::as_str)
            .collect()
    }

    /// Total number of allowed calls across all operations.
    pub fn len(&self) -> usize {
        self.calls
            .iter()
            .flat_map(|calls| calls.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether no behavior is allowed for any operation.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the best call for an invocation using the registry's tie-break.
    ///
    /// `Ok(None)` means no call matched, including when nothing was ever
    /// allowed for `operation`.
    pub fn resolve(&self, operation: &str, args: &[Value]) -> MockResult<Option<&Call>> {
        self.resolve_with(operation, args, self.tie_break.as_ref())
    }

    /// Find the best call for an invocation using an explicit tie-break.
    ///
    /// Calls scoring 0 are discarded; among the rest only those with the
    /// highest score are kept. A single survivor wins outright, several go
    /// to `tie_break`.
    pub fn resolve_with(
        &self,
        operation: &str,
        args: &[Value],
        tie_break: &dyn TieBreak,
    ) -> MockResult<Option<&Call>> {
        let calls = self
            .calls
            .as_ref()
            .ok_or_else(|| MockError::Uninitialized {
                operation: operation.to_string(),
            })?
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut best = 0;
        let mut tied: Vec<&Call> = Vec::new();
        for (index, call) in calls.iter().enumerate() {
            let score = call.score(args).map_err(|source| MockError::Match {
                operation: operation.to_string(),
                source,
            })?;
            trace!(operation, index, score, "scored allowed call");
            if score == 0 || score < best {
                continue;
            }
            if score > best {
                best = score;
                tied.clear();
            }
            tied.push(call);
        }

        let chosen = match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            candidates => {
                let index = tie_break.choose(&tied);
                let call = tied.get(index).copied().ok_or(MockError::InvalidTieBreak {
                    operation: operation.to_string(),
                    chosen: index,
                    candidates,
                })?;
                Some(call)
            }
        };
        debug!(
            operation,
            score = best,
            tied = tied.len(),
            matched = chosen.is_some(),
            "resolved invocation"
        );
        Ok(chosen)
    }

    /// Resolve an invocation and run the winning call's outcome.
    ///
    /// Returns `Ok(None)` when nothing matched and `Ok(Some(values))` when a
    /// call matched; a matched call with no outcome yields an empty list. A
    /// raise outcome is returned as [`MockError::Raised`].
    pub fn try_call(&self, operation: &str, args: &[Value]) -> MockResult<Option<Vec<Value>>> {
        match self.resolve(operation, args)? {
            Some(call) => Ok(Some(call.execute(args)?)),
            None => Ok(None),
        }
    }

    /// Resolve an invocation and run its outcome, unwinding on failure.
    ///
    /// # Panics
    ///
    /// A raise outcome panics with its [`Raised`](crate::Raised) value as
    /// the payload. An uninitialized registry or a failing matcher panics
    /// with the error message. Panics from delegates propagate unchanged.
    #[track_caller]
    pub fn call(&self, operation: &str, args: &[Value]) -> Option<Vec<Value>> {
        match self.try_call(operation, args) {
            Ok(values) => values,
            Err(MockError::Raised(raised)) => std::panic::panic_any(raised),
            Err(err) => panic!("mimic: {err}"),
        }
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;
    use crate::outcome::Raised;
    use crate::tie_break::FirstAllowed;
    use mimic_types::{anything, be_numerically, equivalent_to, match_regexp, params, values};

    fn add_mock() -> Mock {
        let mut mock = Mock::new();
        mock.allow().call("Add").raising("so confused");
        mock.allow().call("Add").with(params![1, 2, 3]).returning(values![6]);
        mock.allow()
            .call("Add")
            .with(params![1, 2, mimic_types::anything_of_type("i64")])
            .raising("so number");
        mock.allow()
            .call("Add")
            .with(params![be_numerically(">", 0), equivalent_to(2.0), anything()])
            .returning(values![0]);
        mock
    }

    #[test]
    fn most_specific_call_wins() {
        let mock = add_mock();
        assert_eq!(mock.try_call("Add", &values![7, 2.0, "hi"]).unwrap(), Some(values![0]));
        assert_eq!(mock.try_call("Add", &values![1, 2, 3]).unwrap(), Some(values![6]));
        assert_eq!(
            mock.try_call("Add", &values![1, 2, 99]),
            Err(MockError::Raised(Raised(Value::from("so number"))))
        );
        assert_eq!(
            mock.try_call("Add", &values![8, 8, 8]),
            Err(MockError::Raised(Raised(Value::from("so confused"))))
        );
    }

    #[test]
    fn unknown_operation_is_no_match() {
        let mock = Mock::new();
        assert!(mock.resolve("Nope", &[]).unwrap().is_none());
        assert_eq!(mock.call("Nope", &values![1]), None);
    }

    #[test]
    fn wildcard_is_last_resort() {
        let mut mock = Mock::new();
        mock.allow().call("Get").with(params![anything()]).returning(values!["specific"]);
        mock.allow().call("Get").returning(values!["wildcard"]);

        assert_eq!(mock.call("Get", &values![1]), Some(values!["specific"]));
        assert_eq!(mock.call("Get", &values![1, 2]), Some(values!["wildcard"]));
        assert_eq!(mock.call("Get", &[]), Some(values!["wildcard"]));
    }

    #[test]
    fn later_registration_wins_a_tie() {
        let mut mock = Mock::new();
        mock.allow().call("Foo").with(params![1]).returning(values!["A"]);
        mock.allow().call("Foo").with(params![1]).returning(values!["B"]);
        assert_eq!(mock.call("Foo", &values![1]), Some(values!["B"]));
    }

    #[test]
    fn tie_break_is_overridable() {
        let mut mock = Mock::new().with_tie_break(FirstAllowed);
        mock.allow().call("Foo").with(params![1]).returning(values!["A"]);
        mock.allow().call("Foo").with(params![1]).returning(values!["B"]);
        assert_eq!(mock.call("Foo", &values![1]), Some(values!["A"]));

        let last = mock
            .resolve_with("Foo", &values![1], &LastAllowed)
            .unwrap()
            .unwrap();
        assert_eq!(last.execute(&[]).unwrap(), values!["B"]);
    }

    #[test]
    fn lower_scores_never_reach_the_tie_break() {
        let mut mock = Mock::new().with_tie_break(|tied: &[&Call]| {
            assert_eq!(tied.len(), 2);
            0
        });
        mock.allow().call("Foo").with(params![anything()]).returning(values!["loose"]);
        mock.allow().call("Foo").with(params![1]).returning(values!["A"]);
        mock.allow().call("Foo").with(params![1]).returning(values!["B"]);
        assert_eq!(mock.call("Foo", &values![1]), Some(values!["A"]));
    }

    #[test]
    fn out_of_range_tie_break_is_an_error() {
        let mut mock = Mock::new().with_tie_break(|_: &[&Call]| 7);
        mock.allow().call("Foo").returning(values![]);
        mock.allow().call("Foo").returning(values![]);
        assert_eq!(
            mock.resolve("Foo", &[]).unwrap_err(),
            MockError::InvalidTieBreak {
                operation: "Foo".into(),
                chosen: 7,
                candidates: 2,
            }
        );
    }

    #[test]
    fn matched_call_without_outcome_returns_empty() {
        let mut mock = Mock::new();
        mock.allow().call("Close");
        assert_eq!(mock.call("Close", &[]), Some(vec![]));
        assert_eq!(mock.call("Open", &[]), None);
    }

    #[test]
    fn delegate_receives_raw_arguments() {
        let mut mock = Mock::new();
        mock.allow()
            .call("Echo")
            .with(params![5u64])
            .doing(|args: &[Value]| args.to_vec());
        assert_eq!(mock.call("Echo", &[Value::U8(5)]), Some(vec![Value::U8(5)]));
    }

    #[test]
    fn raise_outcome_unwinds_with_reason() {
        let mut mock = Mock::new();
        mock.allow()
            .call("Sail")
            .with(params!["west", anything(), "mi"])
            .raising("Please use kilometers");

        let err = catch_unwind(AssertUnwindSafe(|| mock.call("Sail", &values!["west", 3, "mi"])))
            .unwrap_err();
        let raised = err.downcast_ref::<Raised>().unwrap();
        assert_eq!(raised.reason(), &Value::from("Please use kilometers"));
    }

    #[test]
    fn matcher_error_is_reported() {
        let mut mock = Mock::new();
        mock.allow().call("Find").with(params![match_regexp("(")]).returning(values![]);
        assert!(matches!(
            mock.try_call("Find", &values!["x"]),
            Err(MockError::Match { ref operation, .. }) if operation == "Find"
        ));
    }

    #[test]
    fn uninitialized_registry_fails_fast() {
        let mut mock = Mock::uninitialized();
        assert_eq!(
            mock.resolve("Foo", &[]).unwrap_err(),
            MockError::Uninitialized {
                operation: "Foo".into()
            }
        );
        assert!(matches!(mock.try_allow(), Err(BehaviorError::Uninitialized)));

        mock.initialize();
        assert!(mock.resolve("Foo", &[]).unwrap().is_none());
    }

    #[test]
    #[should_panic(expected = "mock registry is not initialized")]
    fn allow_on_uninitialized_registry_panics() {
        let mut mock = Mock::uninitialized();
        mock.allow();
    }

    #[test]
    fn introspection() {
        let mock = add_mock();
        assert_eq!(mock.operations(), vec!["Add"]);
        assert_eq!(mock.calls("Add").len(), 4);
        assert_eq!(mock.len(), 4);
        assert!(mock.calls("Sub").is_empty());
        assert!(Mock::uninitialized().is_empty());
    }
}
