//! In-memory cache of resolved pairwise comparisons.
//!
//! Entries are directed: resolving `a < b` writes `(a, b) -> Less` and
//! `(b, a) -> Greater` as two independent rows. Lookups never infer one
//! direction from the other.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Outcomes of every question answered during one ranking session.
///
/// Keyed as a two-level map (`first -> second -> outcome`) so lookups work on
/// borrowed elements without cloning a tuple key.
#[derive(Debug, Clone)]
pub struct ComparisonCache<T> {
    entries: HashMap<T, HashMap<T, Ordering>>,
    len: usize,
}

impl<T> Default for ComparisonCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            len: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> ComparisonCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `chosen` precedes `alternative`.
    pub fn set(&mut self, chosen: T, alternative: T) {
        self.put(chosen.clone(), alternative.clone(), Ordering::Less);
        self.put(alternative, chosen, Ordering::Greater);
    }

    /// Outcome previously recorded for the ordered pair `(a, b)`.
    pub fn get(&self, a: &T, b: &T) -> Option<Ordering> {
        self.entries.get(a)?.get(b).copied()
    }

    pub fn contains(&self, a: &T, b: &T) -> bool {
        self.get(a, b).is_some()
    }

    /// Number of directed entries (two per answered question).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn put(&mut self, first: T, second: T, outcome: Ordering) {
        let previous = self.entries.entry(first).or_default().insert(second, outcome);
        if previous.is_none() {
            self.len += 1;
        }
    }
}
