use std::fmt;
use std::sync::Arc;

use crate::error::MatchResult;
use crate::value::Value;

/// How specific a matcher is, for the purpose of ranking behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// Exact equality with an expected value.
    Equality,
    /// Satisfied only by [`Value::Nil`].
    Absence,
    /// Deep structural equality after dereferencing and widening.
    Equivalence,
    /// Any other predicate: ranges, patterns, types, "anything".
    Predicate,
}

/// Capability to test one argument value.
///
/// A failure to match is not an error: `Ok(false)` means the value does not
/// satisfy the matcher, `Err` means the matcher could not decide.
///
/// Matchers from other libraries plug in by implementing this trait and are
/// classified as [`MatcherKind::Predicate`] unless they say otherwise.
pub trait Matcher: fmt::Debug + Send + Sync {
    fn matches(&self, actual: &Value) -> MatchResult<bool>;

    fn kind(&self) -> MatcherKind {
        MatcherKind::Predicate
    }

    /// Short human-readable description, e.g. `Equal(5)`.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// A matcher shared between behavior records, builders and ledger queries.
pub type SharedMatcher = Arc<dyn Matcher>;

/// Erase a concrete matcher into a [`SharedMatcher`].
pub fn shared<M: Matcher + 'static>(matcher: M) -> SharedMatcher {
    Arc::new(matcher)
}
