use std::fmt;
use std::sync::Arc;

use mimic_types::Value;
use thiserror::Error;

/// Delegate invoked with the raw, unwidened argument list.
///
/// The delegate owns its own signature checking: a mismatch with the mocked
/// operation surfaces only when the delegate runs.
pub type CallFunc = Arc<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

/// What a matched behavior does.
#[derive(Clone)]
pub enum Outcome {
    Delegate(CallFunc),
    Raise(Value),
    Return(Vec<Value>),
}

impl Outcome {
    /// Kind of this outcome.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Delegate(_) => OutcomeKind::Delegate,
            Outcome::Raise(_) => OutcomeKind::Raise,
            Outcome::Return(_) => OutcomeKind::Return,
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Delegate(_) => f.write_str("Delegate(..)"),
            Outcome::Raise(reason) => f.debug_tuple("Raise").field(reason).finish(),
            Outcome::Return(values) => f.debug_tuple("Return").field(values).finish(),
        }
    }
}

/// Discriminant of [`Outcome`], named after the builder method that sets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Delegate,
    Raise,
    Return,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutcomeKind::Delegate => "doing",
            OutcomeKind::Raise => "raising",
            OutcomeKind::Return => "returning",
        })
    }
}

/// A configured failure raised by a matched behavior.
///
/// [`Mock::call`](crate::Mock::call) unwinds with this as the panic payload;
/// [`Mock::try_call`](crate::Mock::try_call) returns it as an error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("raised: {0}")]
pub struct Raised(pub Value);

impl Raised {
    /// Value the call raised with.
    pub fn reason(&self) -> &Value {
        &self.0
    }
}
