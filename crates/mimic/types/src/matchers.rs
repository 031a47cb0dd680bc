//! Built-in matchers.
//!
//! `equal`, `equivalent_to` and `be_nil` are what the parameter materializer
//! produces for literal values; the rest are predicates a caller passes in
//! explicitly, for example:
//!
//! ```
//! use mimic_types::{anything, be_numerically, match_regexp, params};
//!
//! let sail = params![match_regexp("west|east"), be_numerically(">", 0), anything()];
//! assert_eq!(sail.len(), 3);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{MatchError, MatchResult};
use crate::matcher::{Matcher, MatcherKind};
use crate::value::Value;
use crate::widen::{normalize, widen};

/// Satisfied by a value equal to `expected`.
///
/// Numerics are compared in their widened form, so `Equal(5u64)` accepts
/// `5u8` but not `5i64`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equal {
    /// Value to compare against.
    pub expected: Value,
}

/// Build an [`Equal`] matcher for `expected`.
pub fn equal(expected: impl Into<Value>) -> Equal {
    Equal {
        expected: expected.into(),
    }
}

impl Matcher for Equal {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        Ok(widen(&self.expected) == widen(actual))
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Equality
    }

    fn describe(&self) -> String {
        format!("Equal({})", self.expected)
    }
}

/// Satisfied by a value structurally equal to `expected` once both sides
/// are dereferenced and widened.
#[derive(Clone, Debug, PartialEq)]
pub struct Equivalent {
    /// Value to compare against.
    pub expected: Value,
}

/// Build an [`Equivalent`] matcher for `expected`.
pub fn equivalent_to(expected: impl Into<Value>) -> Equivalent {
    Equivalent {
        expected: expected.into(),
    }
}

impl Matcher for Equivalent {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        Ok(normalize(&self.expected) == normalize(actual))
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Equivalence
    }

    fn describe(&self) -> String {
        format!("BeEquivalentTo({})", self.expected)
    }
}

/// Satisfied only by [`Value::Nil`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeNil;

/// Build a [`BeNil`] matcher.
pub fn be_nil() -> BeNil {
    BeNil
}

impl Matcher for BeNil {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        Ok(actual.is_nil())
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Absence
    }

    fn describe(&self) -> String {
        "BeNil".into()
    }
}

/// Satisfied by any value, including nil.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeAnything;

/// Build a [`BeAnything`] matcher.
pub fn be_anything() -> BeAnything {
    BeAnything
}

/// Alias of [`be_anything`] that reads better in a parameter list.
pub fn anything() -> BeAnything {
    BeAnything
}

impl Matcher for BeAnything {
    fn matches(&self, _actual: &Value) -> MatchResult<bool> {
        Ok(true)
    }

    fn describe(&self) -> String {
        "BeAnything".into()
    }
}

/// Satisfied by any value whose [`Value::type_name`] equals `expected`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaveType {
    /// Required type name.
    pub expected: String,
}

/// Build a [`HaveType`] matcher for the type name `expected`.
pub fn have_type(expected: impl Into<String>) -> HaveType {
    HaveType {
        expected: expected.into(),
    }
}

/// Alias of [`have_type`] that reads better in a parameter list.
pub fn anything_of_type(expected: impl Into<String>) -> HaveType {
    have_type(expected)
}

impl Matcher for HaveType {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        Ok(actual.type_name() == self.expected)
    }

    fn describe(&self) -> String {
        format!("HaveType({:?})", self.expected)
    }
}

/// Numeric comparison against `expected` using one of
/// `==`, `!=`, `<`, `<=`, `>`, `>=`.
///
/// Non-numeric actual values never satisfy the matcher. An operator outside
/// that set is reported as [`MatchError::UnsupportedOperator`].
#[derive(Clone, Debug, PartialEq)]
pub struct BeNumerically {
    /// One of `==`, `!=`, `<`, `<=`, `>`, `>=`.
    pub comparator: String,
    /// Operand on the right-hand side.
    pub expected: Value,
}

/// Build a [`BeNumerically`] matcher from a comparator and an operand.
pub fn be_numerically(comparator: impl Into<String>, expected: impl Into<Value>) -> BeNumerically {
    BeNumerically {
        comparator: comparator.into(),
        expected: expected.into(),
    }
}

/// Compare two numerics. Integer pairs compare exactly whatever their
/// signedness; only a float on either side goes through `f64`.
fn compare_numeric(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (widen(actual), widen(expected)) {
        (Value::I64(a), Value::I64(e)) => Some(a.cmp(&e)),
        (Value::U64(a), Value::U64(e)) => Some(a.cmp(&e)),
        (Value::I64(a), Value::U64(e)) => Some(i128::from(a).cmp(&i128::from(e))),
        (Value::U64(a), Value::I64(e)) => Some(i128::from(a).cmp(&i128::from(e))),
        (a, e) => a.as_f64()?.partial_cmp(&e.as_f64()?),
    }
}

impl Matcher for BeNumerically {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        let accept: fn(Ordering) -> bool = match self.comparator.as_str() {
            "==" => |o| o == Ordering::Equal,
            "!=" => |o| o != Ordering::Equal,
            "<" => |o| o == Ordering::Less,
            "<=" => |o| o != Ordering::Greater,
            ">" => |o| o == Ordering::Greater,
            ">=" => |o| o != Ordering::Less,
            other => return Err(MatchError::UnsupportedOperator(other.to_string())),
        };
        if !self.expected.is_numeric() {
            return Err(MatchError::Custom(format!(
                "BeNumerically expects a numeric operand, got {}",
                self.expected.type_name()
            )));
        }
        if !actual.is_numeric() {
            return Ok(false);
        }
        Ok(compare_numeric(actual, &self.expected).is_some_and(accept))
    }

    fn describe(&self) -> String {
        format!("BeNumerically({:?}, {})", self.comparator, self.expected)
    }
}

/// Satisfied by a string value matching a regular expression.
///
/// The pattern is compiled once; an invalid pattern surfaces as
/// [`MatchError::InvalidPattern`] every time the matcher is consulted.
#[derive(Clone, Debug)]
pub struct MatchRegexp {
    pattern: String,
    compiled: Result<Regex, String>,
}

/// Build a [`MatchRegexp`] matcher, compiling `pattern` up front.
pub fn match_regexp(pattern: impl Into<String>) -> MatchRegexp {
    let pattern = pattern.into();
    let compiled = Regex::new(&pattern).map_err(|e| e.to_string());
    MatchRegexp { pattern, compiled }
}

impl MatchRegexp {
    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Matcher for MatchRegexp {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        let regex = self
            .compiled
            .as_ref()
            .map_err(|reason| MatchError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: reason.clone(),
            })?;
        Ok(actual.as_str().is_some_and(|s| regex.is_match(s)))
    }

    fn describe(&self) -> String {
        format!("MatchRegexp({:?})", self.pattern)
    }
}

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Satisfied when a caller-supplied predicate returns true.
#[derive(Clone)]
pub struct Satisfy {
    description: String,
    predicate: Predicate,
}

/// Build a [`Satisfy`] matcher around `predicate`.
pub fn satisfy<F>(description: impl Into<String>, predicate: F) -> Satisfy
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Satisfy {
        description: description.into(),
        predicate: Arc::new(predicate),
    }
}

impl fmt::Debug for Satisfy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfy")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Matcher for Satisfy {
    fn matches(&self, actual: &Value) -> MatchResult<bool> {
        Ok((self.predicate)(actual))
    }

    fn describe(&self) -> String {
        format!("Satisfy({:?})", self.description)
    }
}
