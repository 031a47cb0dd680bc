//! Attaching mocks and spies to test doubles.

use mimic_mock::{Allowed, Mock};
use mimic_spy::Spy;
use mimic_types::{Param, Value};
use tracing::{debug, warn};

use crate::config::DoubleConfig;
use crate::error::{DoubleError, DoubleResult};

/// A test double that owns a behavior registry.
pub trait Mocked {
    fn mock(&self) -> &Mock;
    fn mock_mut(&mut self) -> &mut Mock;
}

/// A test double that owns an observation ledger.
pub trait Spied {
    fn spy(&self) -> &Spy;
    fn spy_mut(&mut self) -> &mut Spy;
}

impl Mocked for Mock {
    fn mock(&self) -> &Mock {
        self
    }

    fn mock_mut(&mut self) -> &mut Mock {
        self
    }
}

impl Spied for Spy {
    fn spy(&self) -> &Spy {
        self
    }

    fn spy_mut(&mut self) -> &mut Spy {
        self
    }
}

/// Start programming a behavior of `double`.
///
/// # Panics
///
/// Panics if the double's registry is not initialized.
#[track_caller]
pub fn allow<D: Mocked + ?Sized>(double: &mut D) -> Allowed<'_> {
    double.mock_mut().allow()
}

/// Shortcut for `allow(double).call_with(operation, params)`.
#[track_caller]
pub fn allow_call<D: Mocked + ?Sized>(
    double: &mut D,
    operation: impl Into<String>,
    params: Vec<Param>,
) -> Allowed<'_> {
    allow(double).call_with(operation, params)
}

/// A ready-made double holding both a [`Mock`] and a [`Spy`].
///
/// Hand-written doubles either embed one and forward to [`Double::invoke`],
/// or embed a bare `Mock`/`Spy` and implement [`Mocked`]/[`Spied`]
/// themselves.
///
/// ```rust
/// use mimic::{allow, params, values, Double, Spied};
///
/// let mut double = Double::new();
/// allow(&mut double).call("Add").with(params![1, 2]).returning(values![3]);
///
/// assert_eq!(double.invoke("Add", values![1, 2]).unwrap(), values![3]);
/// assert!(double.invoke("Add", values![2, 2]).is_err());
/// assert_eq!(double.spy().count_params("Add", params![]).unwrap(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Double {
    mock: Mock,
    spy: Spy,
    config: DoubleConfig,
}

impl Double {
    /// Double with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DoubleConfig::default())
    }

    /// Double driven by `config`.
    pub fn with_config(config: DoubleConfig) -> Self {
        let mut mock = Mock::new();
        mock.set_tie_break(config.tie_break.strategy());
        Self {
            mock,
            spy: Spy::new(),
            config,
        }
    }

    /// Configuration the double was built with.
    pub fn config(&self) -> &DoubleConfig {
        &self.config
    }

    /// Record and resolve an invocation.
    ///
    /// # Panics
    ///
    /// A raise outcome unwinds with its [`Raised`](mimic_mock::Raised)
    /// payload. Use [`Double::try_invoke`] to get it as an error instead.
    #[track_caller]
    pub fn invoke(&mut self, operation: &str, args: Vec<Value>) -> DoubleResult<Vec<Value>> {
        match self.try_invoke(operation, args) {
            Err(DoubleError::Raised(raised)) => std::panic::panic_any(raised),
            other => other,
        }
    }

    /// Record and resolve an invocation without unwinding.
    ///
    /// An unmatched invocation yields no values when stubbing is enabled and
    /// [`DoubleError::Unmatched`] otherwise.
    pub fn try_invoke(&mut self, operation: &str, args: Vec<Value>) -> DoubleResult<Vec<Value>> {
        if self.config.record_calls {
            self.spy.observe(operation, args.clone())?;
        }

        match self.mock.try_call(operation, &args)? {
            Some(values) => Ok(values),
            None if self.config.stub => {
                debug!(operation, "unmatched invocation stubbed");
                Ok(Vec::new())
            }
            None => {
                warn!(operation, args = ?args, "unmatched invocation");
                Err(DoubleError::Unmatched {
                    operation: operation.to_string(),
                    args,
                })
            }
        }
    }
}

impl Default for Double {
    fn default() -> Self {
        Self::new()
    }
}

impl Mocked for Double {
    fn mock(&self) -> &Mock {
        &self.mock
    }

    fn mock_mut(&mut self) -> &mut Mock {
        &mut self.mock
    }
}

impl Spied for Double {
    fn spy(&self) -> &Spy {
        &self.spy
    }

    fn spy_mut(&mut self) -> &mut Spy {
        &mut self.spy
    }
}
