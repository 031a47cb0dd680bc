use std::collections::BTreeMap;

use mimic_types::Value;
use serde::{Deserialize, Serialize};

/// One recorded invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Position in the ledger across all operations, starting at 0.
    pub sequence: u64,
    /// Arguments exactly as they were passed.
    pub args: Vec<Value>,
}

/// Point-in-time copy of a whole ledger, for diagnostics and reporting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub operations: BTreeMap<String, Vec<Observation>>,
    pub total: usize,
}

impl LedgerSnapshot {
    /// Observations in the order they were recorded, across operations.
    pub fn chronological(&self) -> Vec<(&str, &Observation)> {
        let mut all: Vec<_> = self
            .operations
            .iter()
            .flat_map(|(operation, observations)| {
                observations.iter().map(move |o| (operation.as_str(), o))
            })
            .collect();
        all.sort_by_key(|(_, o)| o.sequence);
        all
    }
}
