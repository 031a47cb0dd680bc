//! # Mimic Mock
//!
//! The behavior registry: programmed responses for the operations of a test
//! double, and the resolution algorithm that picks one for each invocation.
//!
//! ## Key Components
//!
//! - [`Mock`]: per-operation ordered lists of allowed calls
//! - [`Allowed`]: builder enforcing the call / with / outcome sequence
//! - [`Call`]: one allowed behavior and its scoring against actual arguments
//! - [`Outcome`]: delegate, raise or return
//! - [`TieBreak`]: strategy for equally scored calls ([`LastAllowed`] by default)
//!
//! ## Resolution
//!
//! Every call for the invoked operation is scored; zero scores are dropped
//! and only the highest score survives. Exact expectations beat equivalence,
//! equivalence beats predicates, and any call with parameters beats a call
//! allowed without them.
//!
//! ```rust
//! use mimic_mock::Mock;
//! use mimic_types::{anything, params, values};
//!
//! let mut mock = Mock::new();
//! mock.allow().call("Add").with(params![1, 2, 3]).returning(values![6]);
//! mock.allow()
//!     .call("Add")
//!     .with(params![anything(), anything(), anything()])
//!     .returning(values![0]);
//!
//! assert_eq!(mock.call("Add", &values![1, 2, 3]), Some(values![6]));
//! assert_eq!(mock.call("Add", &values![9, 9, 9]), Some(values![0]));
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod allowed;
pub mod call;
pub mod error;
pub mod mock;
pub mod outcome;
pub mod tie_break;

pub use allowed::Allowed;
pub use call::{weight, Call, WILDCARD_SCORE};
pub use error::{BehaviorError, MockError, MockResult};
pub use mock::Mock;
pub use outcome::{CallFunc, Outcome, OutcomeKind, Raised};
pub use tie_break::{FirstAllowed, LastAllowed, TieBreak, TieBreakMode};
