//! Tie-breaking between equally scored behaviors.
//!
//! The strategy is owned by the [`Mock`](crate::Mock) that uses it, or passed
//! explicitly to [`Mock::resolve_with`](crate::Mock::resolve_with). Any
//! `Fn(&[&Call]) -> usize` closure is a strategy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::call::Call;

/// Picks one call among several that share the best score.
///
/// `tied` is in registration order and holds at least two calls. The return
/// value is an index into `tied`.
pub trait TieBreak: Send + Sync {
    fn choose(&self, tied: &[&Call]) -> usize;
}

/// The most recently allowed call wins. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastAllowed;

impl TieBreak for LastAllowed {
    fn choose(&self, tied: &[&Call]) -> usize {
        tied.len().saturating_sub(1)
    }
}

/// The earliest allowed call wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstAllowed;

impl TieBreak for FirstAllowed {
    fn choose(&self, _tied: &[&Call]) -> usize {
        0
    }
}

impl<F> TieBreak for F
where
    F: Fn(&[&Call]) -> usize + Send + Sync,
{
    fn choose(&self, tied: &[&Call]) -> usize {
        self(tied)
    }
}

/// Serializable selector for the built-in strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    #[default]
    Last,
    First,
}

impl TieBreakMode {
    /// Strategy implementing this mode.
    pub fn strategy(self) -> Arc<dyn TieBreak> {
        match self {
            TieBreakMode::Last => Arc::new(LastAllowed),
            TieBreakMode::First => Arc::new(FirstAllowed),
        }
    }
}
