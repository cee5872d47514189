//! Suspension protocol shared by every sort engine.

use std::cmp::Ordering;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::cache::ComparisonCache;

use super::Strategy;

// =============================================================================
// Engine status
// =============================================================================

/// Status of an engine after one `advance()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortState<T> {
    /// Terminal. The list is a permutation of the input, most preferred first.
    Sorted { sorted_list: Vec<T> },
    /// The engine cannot continue until this pair is resolved.
    ComparisonNeeded { elements: (T, T) },
}

impl<T> SortState<T> {
    pub fn is_sorted(&self) -> bool {
        matches!(self, SortState::Sorted { .. })
    }

    pub fn into_sorted(self) -> Option<Vec<T>> {
        match self {
            SortState::Sorted { sorted_list } => Some(sorted_list),
            SortState::ComparisonNeeded { .. } => None,
        }
    }
}

/// A comparison the cache could not answer.
///
/// Carried as the error half of a lookup so a sort pass can bail out with `?`
/// at the first unknown pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved<T>(pub T, pub T);

impl<T> From<Unresolved<T>> for SortState<T> {
    fn from(pair: Unresolved<T>) -> Self {
        SortState::ComparisonNeeded {
            elements: (pair.0, pair.1),
        }
    }
}

/// Caller misuse of the advance/resolve protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("advance called while a requested comparison is still unresolved")]
    ComparisonOutstanding,
    #[error("resolved pair does not match the outstanding comparison")]
    NotRequested,
    #[error("resolve called with no comparison outstanding")]
    NothingOutstanding,
}

// =============================================================================
// Engine contract
// =============================================================================

/// A comparison sort that pauses whenever it needs an unknown pairwise answer.
///
/// Call [`advance`](Self::advance) until it returns [`SortState::Sorted`].
/// Every [`SortState::ComparisonNeeded`] must be answered with exactly one
/// [`resolve`](Self::resolve) call before advancing again.
pub trait SuspendableSort<T> {
    fn advance(&mut self) -> Result<SortState<T>, ProtocolError>;

    /// Record that `chosen` precedes `alternative`. The two must be the pair
    /// most recently requested, in either order.
    fn resolve(&mut self, chosen: T, alternative: T) -> Result<(), ProtocolError>;

    /// Questions answered so far in this session.
    fn comparisons_resolved(&self) -> usize;

    fn strategy(&self) -> Strategy;
}

// =============================================================================
// Shared bookkeeping
// =============================================================================

/// Cache plus the single outstanding question, shared by both engines.
#[derive(Debug, Clone)]
pub(crate) struct Ledger<T> {
    cache: ComparisonCache<T>,
    outstanding: Option<(T, T)>,
    resolved: usize,
}

impl<T: Clone + Eq + Hash> Ledger<T> {
    pub(crate) fn new() -> Self {
        Self {
            cache: ComparisonCache::new(),
            outstanding: None,
            resolved: 0,
        }
    }

    /// Identical elements compare `Equal` without touching the cache.
    pub(crate) fn lookup(&self, a: &T, b: &T) -> Result<Ordering, Unresolved<T>> {
        if a == b {
            return Ok(Ordering::Equal);
        }
        self.cache
            .get(a, b)
            .ok_or_else(|| Unresolved(a.clone(), b.clone()))
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), ProtocolError> {
        if self.outstanding.is_some() {
            return Err(ProtocolError::ComparisonOutstanding);
        }
        Ok(())
    }

    /// Remember the question handed to the caller and build the matching state.
    pub(crate) fn suspend(&mut self, pair: Unresolved<T>) -> SortState<T> {
        self.outstanding = Some((pair.0.clone(), pair.1.clone()));
        pair.into()
    }

    pub(crate) fn resolve(&mut self, chosen: T, alternative: T) -> Result<(), ProtocolError> {
        let Some((a, b)) = self.outstanding.as_ref() else {
            return Err(ProtocolError::NothingOutstanding);
        };
        let matches = (chosen == *a && alternative == *b) || (chosen == *b && alternative == *a);
        if !matches {
            return Err(ProtocolError::NotRequested);
        }
        self.outstanding = None;
        self.cache.set(chosen, alternative);
        self.resolved += 1;
        Ok(())
    }

    pub(crate) fn resolved(&self) -> usize {
        self.resolved
    }
}
