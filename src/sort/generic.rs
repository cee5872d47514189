//! Restart-based suspendable sort over any [`TrySort`] procedure.
//!
//! Every `advance()` re-runs the procedure on a fresh copy of the input with a
//! comparator backed by the cache. The first pair the cache cannot answer
//! aborts the pass and is handed to the caller. Each answer grows the cache,
//! so the passes replay further each time until one completes.
//!
//! Restarting costs CPU, not questions: replayed comparisons are cache hits.
//! The questions asked are whatever the procedure happens to need, with no
//! attempt to minimize them. Prefer [`HeapSort`](super::HeapSort) when the
//! oracle's time is the scarce resource.

use std::hash::Hash;

use tracing::debug;

use super::procedure::{BinaryInsertionSort, TrySort};
use super::types::{Ledger, ProtocolError, SortState, SuspendableSort};
use super::Strategy;

#[derive(Debug, Clone)]
pub struct GenericSort<T, P = BinaryInsertionSort> {
    elements: Vec<T>,
    procedure: P,
    ledger: Ledger<T>,
    sorted: Option<Vec<T>>,
    passes: usize,
}

impl<T: Clone + Eq + Hash> GenericSort<T, BinaryInsertionSort> {
    pub fn new(elements: Vec<T>) -> Self {
        Self::with_procedure(elements, BinaryInsertionSort)
    }
}

impl<T: Clone + Eq + Hash, P: TrySort> GenericSort<T, P> {
    pub fn with_procedure(elements: Vec<T>, procedure: P) -> Self {
        Self {
            elements,
            procedure,
            ledger: Ledger::new(),
            sorted: None,
            passes: 0,
        }
    }

    /// Number of sort passes started, including the one that completed.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl<T: Clone + Eq + Hash, P: TrySort> SuspendableSort<T> for GenericSort<T, P> {
    fn advance(&mut self) -> Result<SortState<T>, ProtocolError> {
        self.ledger.ensure_idle()?;
        if let Some(sorted_list) = &self.sorted {
            return Ok(SortState::Sorted {
                sorted_list: sorted_list.clone(),
            });
        }

        self.passes += 1;
        let mut working = self.elements.clone();
        let ledger = &self.ledger;
        match self
            .procedure
            .try_sort_by(&mut working, |a, b| ledger.lookup(a, b))
        {
            Ok(()) => {
                debug!(passes = self.passes, "generic sort finished");
                self.sorted = Some(working.clone());
                Ok(SortState::Sorted {
                    sorted_list: working,
                })
            }
            Err(pair) => {
                debug!(passes = self.passes, "generic sort suspended on unknown comparison");
                Ok(self.ledger.suspend(pair))
            }
        }
    }

    fn resolve(&mut self, chosen: T, alternative: T) -> Result<(), ProtocolError> {
        self.ledger.resolve(chosen, alternative)?;
        debug!(resolved = self.ledger.resolved(), "generic sort comparison resolved");
        Ok(())
    }

    fn comparisons_resolved(&self) -> usize {
        self.ledger.resolved()
    }

    fn strategy(&self) -> Strategy {
        P::STRATEGY
    }
}
