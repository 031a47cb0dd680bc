//! The observation ledger.
//!
//! Append-only: entries are never matched or rewritten when recorded, only
//! queried afterwards. [`Spy::reset`] is the one way to forget them.

use std::collections::BTreeMap;

use mimic_types::{match_params, Param, SharedMatcher, Value};
use tracing::trace;

use crate::error::{SpyError, SpyResult};
use crate::observation::{LedgerSnapshot, Observation};

/// State container for recording calls made to a test double.
#[derive(Clone, Debug)]
pub struct Spy {
    observed: Option<BTreeMap<String, Vec<Observation>>>,
    next_sequence: u64,
}

impl Spy {
    /// An empty, ready-to-use ledger.
    pub fn new() -> Self {
        Self {
            observed: Some(BTreeMap::new()),
            next_sequence: 0,
        }
    }

    /// A ledger slot that was never set up. Every operation on it fails until
    /// [`Spy::initialize`] is called.
    pub fn uninitialized() -> Self {
        Self {
            observed: None,
            next_sequence: 0,
        }
    }

    /// Make the ledger usable, keeping any recorded invocations.
    pub fn initialize(&mut self) {
        self.observed.get_or_insert_with(BTreeMap::new);
    }

    /// Whether the ledger can record invocations.
    pub fn is_initialized(&self) -> bool {
        self.observed.is_some()
    }

    fn ledger(&self, operation: &str) -> SpyResult<&BTreeMap<String, Vec<Observation>>> {
        self.observed.as_ref().ok_or_else(|| SpyError::Uninitialized {
            operation: operation.to_string(),
        })
    }

    /// Record an invocation of `operation`.
    pub fn observe(&mut self, operation: impl Into<String>, args: Vec<Value>) -> SpyResult<()> {
        let operation = operation.into();
        let Some(observed) = self.observed.as_mut() else {
            return Err(SpyError::Uninitialized { operation });
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        trace!(operation = %operation, sequence, arity = args.len(), "observed invocation");
        observed
            .entry(operation)
            .or_default()
            .push(Observation { sequence, args });
        Ok(())
    }

    /// Count recorded invocations of `operation` whose leading arguments
    /// satisfy `criteria`, one criterion per position.
    ///
    /// This is a prefix match: trailing arguments beyond the criteria are
    /// ignored, and no criteria at all counts every invocation.
    pub fn count(&self, operation: &str, criteria: &[SharedMatcher]) -> SpyResult<usize> {
        let mut count = 0;
        for observation in self.observations(operation)? {
            if satisfies_prefix(&observation.args, criteria)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// [`Spy::count`] with literal criteria turned into matchers first.
    pub fn count_params(&self, operation: &str, criteria: Vec<Param>) -> SpyResult<usize> {
        self.count(operation, &match_params(criteria))
    }

    /// Arguments of the recorded invocation satisfying the most criteria.
    ///
    /// The earliest invocation wins a tie. `None` only when `operation` was
    /// never recorded. Criteria that fail with an error count as unsatisfied.
    pub fn closest_match(
        &self,
        operation: &str,
        criteria: &[SharedMatcher],
    ) -> SpyResult<Option<&[Value]>> {
        let mut best: Option<(&Observation, usize)> = None;
        for observation in self.observations(operation)? {
            let satisfied = criteria
                .iter()
                .zip(&observation.args)
                .filter(|(criterion, arg)| criterion.matches(arg).unwrap_or(false))
                .count();
            if best.map_or(true, |(_, most)| satisfied > most) {
                best = Some((observation, satisfied));
            }
        }
        Ok(best.map(|(observation, _)| observation.args.as_slice()))
    }

    /// Recorded invocations of `operation`, oldest first.
    pub fn observations(&self, operation: &str) -> SpyResult<&[Observation]> {
        Ok(self
            .ledger(operation)?
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Operation names recorded at least once, sorted.
    pub fn operations(&self) -> Vec<&str> {
        self.observed
            .iter()
            .flat_map(|observed| observed.keys())
            .map(String::as_str)
            .collect()
    }

    /// Total number of recorded invocations.
    pub fn len(&self) -> usize {
        self.observed
            .iter()
            .flat_map(|observed| observed.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every recorded invocation. An uninitialized ledger becomes
    /// initialized.
    pub fn reset(&mut self) {
        self.observed = Some(BTreeMap::new());
        self.next_sequence = 0;
    }

    /// Serializable copy of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            operations: self.observed.clone().unwrap_or_default(),
            total: self.len(),
        }
    }
}

impl Default for Spy {
    fn default() -> Self {
        Self::new()
    }
}

fn satisfies_prefix(args: &[Value], criteria: &[SharedMatcher]) -> SpyResult<bool> {
    if args.len() < criteria.len() {
        return Ok(false);
    }
    for (criterion, arg) in criteria.iter().zip(args) {
        if !criterion.matches(arg)? {
            return Ok(false);
        }
    }
    Ok(true)
}
