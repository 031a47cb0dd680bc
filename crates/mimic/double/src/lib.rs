//! # Mimic
//!
//! Behavior matching and invocation resolution for hand-written test doubles.
//!
//! A double forwards each of its methods to a [`Mock`], which picks the most
//! specific allowed call for the actual arguments, and optionally records the
//! invocation in a [`Spy`] for later counting.
//!
//! ## Key Components
//!
//! - [`Mocked`] / [`Spied`]: explicit attachment of a registry and a ledger
//! - [`allow`] / [`allow_call`]: entry points for programming behavior
//! - [`Double`]: ready-made double bundling both, driven by [`DoubleConfig`]
//! - [`delegate0`] .. [`delegate3`]: typed closures as delegates
//!
//! ## Example
//!
//! ```rust
//! use mimic::{allow, anything, params, values, Mock, Mocked};
//!
//! struct Calculator {
//!     mock: Mock,
//! }
//!
//! impl Mocked for Calculator {
//!     fn mock(&self) -> &Mock {
//!         &self.mock
//!     }
//!     fn mock_mut(&mut self) -> &mut Mock {
//!         &mut self.mock
//!     }
//! }
//!
//! impl Calculator {
//!     fn add(&self, a: i64, b: i64, c: i64) -> i64 {
//!         self.mock
//!             .call("Add", &values![a, b, c])
//!             .and_then(|out| out.first().and_then(|v| v.as_f64()))
//!             .map_or(0, |v| v as i64)
//!     }
//! }
//!
//! let mut calc = Calculator { mock: Mock::new() };
//! allow(&mut calc).call("Add").with(params![1, 2, 3]).returning(values![6]);
//! allow(&mut calc)
//!     .call("Add")
//!     .with(params![anything(), anything(), anything()])
//!     .returning(values![0]);
//!
//! assert_eq!(calc.add(1, 2, 3), 6);
//! assert_eq!(calc.add(9, 9, 9), 0);
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod delegate;
pub mod double;
pub mod error;

pub use config::DoubleConfig;
pub use delegate::{delegate0, delegate1, delegate2, delegate3};
pub use double::{allow, allow_call, Double, Mocked, Spied};
pub use error::{DoubleError, DoubleResult};

pub use mimic_mock::{
    Allowed, BehaviorError, Call, CallFunc, FirstAllowed, LastAllowed, Mock, MockError,
    MockResult, Outcome, OutcomeKind, Raised, TieBreak, TieBreakMode,
};
pub use mimic_spy::{LedgerSnapshot, Observation, Spy, SpyError, SpyResult};
pub use mimic_types::{
    anything, anything_of_type, be_anything, be_nil, be_numerically, equal, equivalent_to,
    have_type, match_params, match_regexp, params, satisfy, shared, values, FromValue,
    MatchError, Matcher, MatcherKind, Param, SharedMatcher, Value,
};
