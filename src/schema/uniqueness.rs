//! Value history for unique columns
//!
//! Duplicates can only be known once every row has been seen, so values are
//! collected during the pass and checked once at the end.

use std::collections::{BTreeMap, HashMap};

use super::types::Value;

/// Per-column value history, consumed once by `duplicates`.
#[derive(Debug, Default)]
pub struct UniquenessAccumulator {
    seen: BTreeMap<usize, Vec<Value>>,
}

impl UniquenessAccumulator {
    /// Creates an accumulator tracking the given columns
    pub fn new(columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            seen: columns.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    /// Appends a row's value for every tracked column
    pub fn record(&mut self, row: &[Value]) {
        for (column, values) in self.seen.iter_mut() {
            values.push(row.get(*column).cloned().flatten());
        }
    }

    /// Returns the first column (in column order) holding a repeated value,
    /// together with each repeated value once, in first-occurrence order.
    pub fn into_first_duplicates(self) -> Option<(usize, Vec<Value>)> {
        self.seen.into_iter().find_map(|(column, values)| {
            let dups = repeated_values(values);
            if dups.is_empty() {
                None
            } else {
                Some((column, dups))
            }
        })
    }
}

/// Values occurring more than once, each listed once in first-occurrence order.
pub(crate) fn repeated_values(values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut counts: HashMap<Value, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    order.into_iter().filter(|v| counts[v] > 1).collect()
}
