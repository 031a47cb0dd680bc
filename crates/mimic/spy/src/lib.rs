//! # Mimic Spy
//!
//! An append-only ledger of the invocations a test double received,
//! queried after the fact.
//!
//! ## Key Components
//!
//! - [`Spy`]: per-operation ledger with prefix counting and closest match
//! - [`Observation`]: one recorded invocation
//! - [`LedgerSnapshot`]: serializable copy of a whole ledger
//!
//! ## Example
//!
//! ```rust
//! use mimic_spy::Spy;
//! use mimic_types::{params, values};
//!
//! let mut spy = Spy::new();
//! spy.observe("Foo", values![1, true, "x"]).unwrap();
//! spy.observe("Foo", values![1, false, "y"]).unwrap();
//!
//! assert_eq!(spy.count_params("Foo", params![1]).unwrap(), 2);
//! assert_eq!(spy.count_params("Foo", params![1, true]).unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod observation;
pub mod spy;

pub use error::{SpyError, SpyResult};
pub use observation::{LedgerSnapshot, Observation};
pub use spy::Spy;
