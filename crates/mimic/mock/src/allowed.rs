//! Fluent construction of allowed calls.

use mimic_types::{match_params, Param, Value};

use crate::call::Call;
use crate::error::BehaviorError;
use crate::mock::Mock;
use crate::outcome::Outcome;

/// Builder for one allowed call at a time, borrowed from a [`Mock`].
///
/// The sequence is always `call` first, then optionally `with`, then at most
/// one of `returning`, `raising` or `doing`. Once an outcome is set the call's
/// parameters are frozen. Anything else is a programming
/// error: the plain methods panic at the offending call site, the `try_`
/// variants return the [`BehaviorError`] instead.
///
/// ```rust
/// use mimic_mock::Mock;
/// use mimic_types::{params, values};
///
/// let mut mock = Mock::new();
/// mock.allow().call("Get").with(params!["key"]).returning(values![42]);
/// mock.allow().to_receive("Put").and_raise("read only");
/// ```
#[derive(Debug)]
pub struct Allowed<'m> {
    mock: &'m mut Mock,
    current: Option<(String, usize)>,
}

#[track_caller]
fn fail(err: BehaviorError) -> ! {
    panic!("mimic: {err}")
}

impl<'m> Allowed<'m> {
    pub(crate) fn new(mock: &'m mut Mock) -> Self {
        Self {
            mock,
            current: None,
        }
    }

    /// Operation of the call under construction, if one was opened.
    pub fn operation(&self) -> Option<&str> {
        self.current.as_ref().map(|(operation, _)| operation.as_str())
    }

    fn current_call(&mut self, method: &'static str) -> Result<&mut Call, BehaviorError> {
        let (operation, index) = self
            .current
            .as_ref()
            .ok_or(BehaviorError::NoOpenCall(method))?;
        self.mock
            .call_mut(operation, *index)
            .ok_or(BehaviorError::NoOpenCall(method))
    }

    /// Open a new allowed call for `operation`.
    #[track_caller]
    pub fn call(self, operation: impl Into<String>) -> Self {
        match self.try_call(operation) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::call`].
    pub fn try_call(mut self, operation: impl Into<String>) -> Result<Self, BehaviorError> {
        if let Some((open, _)) = &self.current {
            return Err(BehaviorError::OperationAlreadyOpen(open.clone()));
        }
        let operation = operation.into();
        let index = self.mock.open(&operation)?;
        self.current = Some((operation, index));
        Ok(self)
    }

    /// Open a call and attach its parameters in one step. An empty
    /// parameter list leaves the call as a wildcard.
    #[track_caller]
    pub fn call_with(self, operation: impl Into<String>, params: Vec<Param>) -> Self {
        match self.try_call_with(operation, params) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::call_with`].
    pub fn try_call_with(
        self,
        operation: impl Into<String>,
        params: Vec<Param>,
    ) -> Result<Self, BehaviorError> {
        let allowed = self.try_call(operation)?;
        if params.is_empty() {
            return Ok(allowed);
        }
        allowed.try_with(params)
    }

    /// Restrict the call to invocations whose arguments match `params`.
    #[track_caller]
    pub fn with(self, params: Vec<Param>) -> Self {
        match self.try_with(params) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::with`].
    pub fn try_with(mut self, params: Vec<Param>) -> Result<Self, BehaviorError> {
        self.current_call("with")?.set_params(match_params(params))?;
        Ok(self)
    }

    /// Make the call return `values`.
    #[track_caller]
    pub fn returning(self, values: Vec<Value>) -> Self {
        match self.try_returning(values) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::returning`].
    pub fn try_returning(self, values: Vec<Value>) -> Result<Self, BehaviorError> {
        self.try_outcome("returning", Outcome::Return(values))
    }

    /// Make the call raise `reason`.
    #[track_caller]
    pub fn raising(self, reason: impl Into<Value>) -> Self {
        match self.try_raising(reason) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::raising`].
    pub fn try_raising(self, reason: impl Into<Value>) -> Result<Self, BehaviorError> {
        self.try_outcome("raising", Outcome::Raise(reason.into()))
    }

    /// Delegate the call to `func`, which receives the raw arguments.
    #[track_caller]
    pub fn doing<F>(self, func: F) -> Self
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        match self.try_doing(func) {
            Ok(allowed) => allowed,
            Err(err) => fail(err),
        }
    }

    /// Fallible form of [`Allowed::doing`].
    pub fn try_doing<F>(self, func: F) -> Result<Self, BehaviorError>
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.try_outcome("doing", Outcome::Delegate(std::sync::Arc::new(func)))
    }

    fn try_outcome(
        mut self,
        method: &'static str,
        outcome: Outcome,
    ) -> Result<Self, BehaviorError> {
        self.current_call(method)?.set_outcome(outcome)?;
        Ok(self)
    }

    /// Alias of [`Allowed::call`].
    #[track_caller]
    pub fn to_receive(self, operation: impl Into<String>) -> Self {
        self.call(operation)
    }

    /// Alias of [`Allowed::returning`].
    #[track_caller]
    pub fn and_return(self, values: Vec<Value>) -> Self {
        self.returning(values)
    }

    /// Alias of [`Allowed::raising`].
    #[track_caller]
    pub fn and_raise(self, reason: impl Into<Value>) -> Self {
        self.raising(reason)
    }
}
