//! Step-resumable bottom-up heapsort ("heapsort with bounce").
//!
//! A classic sift-down compares the sifted value against both children at
//! every level. Bottom-up sift-down instead follows the greater child all the
//! way to a leaf (one comparison per level, between siblings), then bounces
//! back up from that leaf until it meets a value not below the sifted one.
//! Sifted values usually belong near the bottom, so the bounce is short and
//! the oracle sees fewer questions overall.
//!
//! The engine is an explicit state machine. When a comparison is missing it
//! returns the pair and keeps its exact position (phase, sift cursor, heap
//! boundary); the next `advance()` continues that same sift.

use std::cmp::Ordering;
use std::hash::Hash;

use tracing::debug;

use super::types::{Ledger, ProtocolError, SortState, SuspendableSort, Unresolved};
use super::Strategy;

// =============================================================================
// Positional arithmetic
// =============================================================================

fn parent(index: usize) -> usize {
    debug_assert!(index > 0);
    (index - 1) / 2
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

fn right_child(index: usize) -> usize {
    2 * index + 2
}

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sifting internal nodes from the last parent down to the root.
    InitialHeapify { parent: usize },
    /// Moving the max out of `[0, heap_size)` one element at a time.
    Extracting,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiftStep {
    /// Descending along the greater child.
    LeafSearch { cursor: usize },
    /// Climbing back from the leaf towards `node`.
    Bounce { cursor: usize },
}

/// An in-progress sift of the value at `node`.
///
/// `elements[node]` is untouched until the sift settles, so it always holds
/// the value being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sift {
    node: usize,
    step: SiftStep,
}

impl Sift {
    fn new(node: usize) -> Self {
        Self {
            node,
            step: SiftStep::LeafSearch { cursor: node },
        }
    }
}

/// Bottom-up heapsort that suspends on every unknown comparison.
///
/// Builds a max-heap, so the final list runs from the most preferred element
/// (the one chosen over all others) to the least.
#[derive(Debug, Clone)]
pub struct HeapSort<T> {
    elements: Vec<T>,
    heap_size: usize,
    phase: Phase,
    sift: Option<Sift>,
    ledger: Ledger<T>,
}

impl<T: Clone + Eq + Hash> HeapSort<T> {
    /// No comparisons are made until the first `advance()`.
    pub fn new(elements: Vec<T>) -> Self {
        let n = elements.len();
        let phase = if n >= 2 {
            Phase::InitialHeapify { parent: parent(n - 1) }
        } else {
            Phase::Extracting
        };
        Self {
            elements,
            heap_size: n,
            phase,
            sift: None,
            ledger: Ledger::new(),
        }
    }

    /// Current boundary between the heap and the sorted tail.
    pub fn heap_size(&self) -> usize {
        self.heap_size
    }

    fn run(&mut self) -> Result<Vec<T>, Unresolved<T>> {
        loop {
            if let Some(mut sift) = self.sift.take() {
                let outcome = self.sift_down(&mut sift);
                if outcome.is_err() {
                    self.sift = Some(sift);
                }
                outcome?;
                self.finish_sift();
                continue;
            }

            match self.phase {
                Phase::InitialHeapify { parent } => {
                    self.sift = Some(Sift::new(parent));
                }
                Phase::Extracting => {
                    if self.heap_size == 0 {
                        self.phase = Phase::Done;
                        debug!(len = self.elements.len(), "heapsort finished");
                        continue;
                    }
                    self.elements.swap(0, self.heap_size - 1);
                    self.heap_size -= 1;
                    self.sift = Some(Sift::new(0));
                }
                Phase::Done => return Ok(self.elements.clone()),
            }
        }
    }

    fn finish_sift(&mut self) {
        if let Phase::InitialHeapify { parent } = self.phase {
            self.phase = if parent == 0 {
                Phase::Extracting
            } else {
                Phase::InitialHeapify { parent: parent - 1 }
            };
        }
    }

    /// Advance `sift` until it settles or needs an answer. The cursor inside
    /// `sift` is updated in place so a suspended sift resumes where it stopped.
    fn sift_down(&mut self, sift: &mut Sift) -> Result<(), Unresolved<T>> {
        loop {
            match sift.step {
                SiftStep::LeafSearch { cursor } => {
                    let (left, right) = (left_child(cursor), right_child(cursor));
                    if right < self.heap_size {
                        let next = match self.compare(right, left)? {
                            Ordering::Greater => right,
                            _ => left,
                        };
                        sift.step = SiftStep::LeafSearch { cursor: next };
                    } else {
                        // The last level may hold a lone left child.
                        let leaf = if left < self.heap_size { left } else { cursor };
                        sift.step = SiftStep::Bounce { cursor: leaf };
                    }
                }
                SiftStep::Bounce { cursor } => {
                    if cursor == sift.node {
                        return Ok(());
                    }
                    match self.compare(sift.node, cursor)? {
                        Ordering::Greater => {
                            sift.step = SiftStep::Bounce {
                                cursor: parent(cursor),
                            };
                        }
                        _ => {
                            self.settle(sift.node, cursor);
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Shift every value on the path `node -> target` up one level and drop
    /// the value from `node` into `target`.
    fn settle(&mut self, node: usize, target: usize) {
        let mut path = Vec::new();
        let mut pos = target;
        while pos != node {
            path.push(pos);
            pos = parent(pos);
        }
        let mut hole = node;
        for &next in path.iter().rev() {
            self.elements.swap(hole, next);
            hole = next;
        }
    }

    fn compare(&self, first: usize, second: usize) -> Result<Ordering, Unresolved<T>> {
        if first == second {
            return Ok(Ordering::Equal);
        }
        self.ledger
            .lookup(&self.elements[first], &self.elements[second])
    }
}

impl<T: Clone + Eq + Hash> SuspendableSort<T> for HeapSort<T> {
    fn advance(&mut self) -> Result<SortState<T>, ProtocolError> {
        self.ledger.ensure_idle()?;
        match self.run() {
            Ok(sorted_list) => Ok(SortState::Sorted { sorted_list }),
            Err(pair) => {
                debug!(
                    heap_size = self.heap_size,
                    phase = ?self.phase,
                    sift = ?self.sift,
                    "heapsort suspended on unknown comparison"
                );
                Ok(self.ledger.suspend(pair))
            }
        }
    }

    fn resolve(&mut self, chosen: T, alternative: T) -> Result<(), ProtocolError> {
        self.ledger.resolve(chosen, alternative)?;
        debug!(resolved = self.ledger.resolved(), "heapsort comparison resolved");
        Ok(())
    }

    fn comparisons_resolved(&self) -> usize {
        self.ledger.resolved()
    }

    fn strategy(&self) -> Strategy {
        Strategy::Heap
    }
}
