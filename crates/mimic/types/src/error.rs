use thiserror::Error;

/// Errors raised by a matcher while testing a value.
///
/// A value that simply does not satisfy a matcher is not an error; these
/// variants describe matchers that could not reach a verdict at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("unsupported comparison operator {0:?}")]
    UnsupportedOperator(String),

    #[error("matcher failed: {0}")]
    Custom(String),
}

/// Result type for matcher operations
pub type MatchResult<T> = std::result::Result<T, MatchError>;
