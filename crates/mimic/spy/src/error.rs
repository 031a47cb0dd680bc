use mimic_types::MatchError;
use thiserror::Error;

/// Errors from the observation ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpyError {
    #[error("spy ledger is not initialized (queried {operation:?})")]
    Uninitialized { operation: String },

    #[error("criterion failed: {0}")]
    Match(#[from] MatchError),
}

/// Result type for spy operations
pub type SpyResult<T> = std::result::Result<T, SpyError>;
