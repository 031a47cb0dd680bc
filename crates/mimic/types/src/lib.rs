//! # Mimic Types
//!
//! Leaf abstractions shared by the mock registry and the spy ledger.
//!
//! ## Key Components
//!
//! - [`Value`]: dynamic argument model for mocked invocations
//! - [`widen`] / [`normalize`]: numeric widening applied before matching
//! - [`Matcher`]: the capability to test one argument value
//! - Built-in matchers: [`equal`], [`equivalent_to`], [`be_nil`], [`anything`],
//!   [`have_type`], [`be_numerically`], [`match_regexp`], [`satisfy`]
//! - [`match_params`]: turns literals and matchers into a matcher per position
//!
//! ## Example
//!
//! ```rust
//! use mimic_types::{match_params, params, MatcherKind, Value};
//!
//! let matchers = match_params(params![5u64, vec![1, 2], Value::Nil]);
//! assert_eq!(matchers[0].kind(), MatcherKind::Equality);
//! assert_eq!(matchers[1].kind(), MatcherKind::Equivalence);
//! assert_eq!(matchers[2].kind(), MatcherKind::Absence);
//!
//! // Widening happens at match time, not at construction time.
//! assert!(matchers[0].matches(&Value::U8(5)).unwrap());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod matcher;
pub mod matchers;
pub mod params;
pub mod value;
pub mod widen;

pub use error::{MatchError, MatchResult};
pub use matcher::{shared, Matcher, MatcherKind, SharedMatcher};
pub use matchers::{
    anything, anything_of_type, be_anything, be_nil, be_numerically, equal, equivalent_to,
    have_type, match_regexp, satisfy, BeAnything, BeNil, BeNumerically, Equal, Equivalent,
    HaveType, MatchRegexp, Satisfy,
};
pub use params::{match_params, Param};
pub use value::{FromValue, Value};
pub use widen::{normalize, widen};
