use mimic_types::MatchError;
use thiserror::Error;

use crate::outcome::{OutcomeKind, Raised};

/// Misuse of the behavior builder.
///
/// These are programmer errors; the [`Allowed`](crate::Allowed) builder
/// panics with them at the moment of the offending call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("must use call() before specifying {0}()")]
    NoOpenCall(&'static str),

    #[error("cannot use call() twice on the same Allowed (already configuring {0:?})")]
    OperationAlreadyOpen(String),

    #[error("cannot specify with() twice")]
    ParamsAlreadySet,

    #[error("cannot specify with() after {0}()")]
    ParamsAfterOutcome(OutcomeKind),

    #[error("cannot specify {0}() twice")]
    OutcomeAlreadySet(OutcomeKind),

    #[error("cannot simultaneously {existing}() and {attempted}(); choose one")]
    ConflictingOutcomes {
        existing: OutcomeKind,
        attempted: OutcomeKind,
    },

    #[error("mock registry is not initialized")]
    Uninitialized,
}

/// Errors from resolving or executing an invocation against a [`Mock`](crate::Mock).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MockError {
    #[error("mock registry is not initialized (invoked {operation:?})")]
    Uninitialized { operation: String },

    #[error("matcher failed while resolving {operation:?}: {source}")]
    Match {
        operation: String,
        #[source]
        source: MatchError,
    },

    #[error("tie-break for {operation:?} chose index {chosen} out of {candidates} candidates")]
    InvalidTieBreak {
        operation: String,
        chosen: usize,
        candidates: usize,
    },

    #[error(transparent)]
    Raised(#[from] Raised),
}

/// Result type for mock operations
pub type MockResult<T> = std::result::Result<T, MockError>;
