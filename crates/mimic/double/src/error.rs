use mimic_mock::{MockError, Raised};
use mimic_spy::SpyError;
use mimic_types::Value;
use thiserror::Error;

/// Errors surfaced by a [`Double`](crate::Double).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoubleError {
    #[error("no allowed call matches {operation}{args:?}")]
    Unmatched { operation: String, args: Vec<Value> },

    #[error(transparent)]
    Raised(#[from] Raised),

    #[error("mock error: {0}")]
    Mock(MockError),

    #[error("spy error: {0}")]
    Spy(#[from] SpyError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<MockError> for DoubleError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Raised(raised) => DoubleError::Raised(raised),
            other => DoubleError::Mock(other),
        }
    }
}

/// Result type for test double operations
pub type DoubleResult<T> = std::result::Result<T, DoubleError>;
