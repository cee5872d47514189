//! Suspendable comparison sorts.
//!
//! Two engines sit behind the same [`SuspendableSort`] protocol:
//! - [`HeapSort`]: bottom-up heapsort that keeps partial progress across
//!   suspensions and keeps the number of questions low.
//! - [`GenericSort`]: restarts an off-the-shelf [`TrySort`] procedure on every
//!   advance. Simple, but not resumption-efficient.
//!
//! Callers pick one through [`Strategy`] and [`build_sorter`].

pub mod generic;
pub mod heap;
pub mod procedure;
pub mod types;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use generic::GenericSort;
pub use heap::HeapSort;
pub use procedure::{BinaryInsertionSort, MergeSort, TrySort};
pub use types::{ProtocolError, SortState, SuspendableSort, Unresolved};

/// Which engine orders the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Bottom-up heapsort with bounce.
    #[default]
    Heap,
    /// Restarted binary insertion sort.
    Insertion,
    /// Restarted merge sort.
    Merge,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Heap, Strategy::Insertion, Strategy::Merge];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Heap => "heap",
            Strategy::Insertion => "insertion",
            Strategy::Merge => "merge",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected heap, insertion or merge)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heap" => Ok(Strategy::Heap),
            "insertion" => Ok(Strategy::Insertion),
            "merge" => Ok(Strategy::Merge),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

/// Construct the engine for `strategy` over `elements`. No comparisons are
/// made until the first `advance()`.
pub fn build_sorter<T>(strategy: Strategy, elements: Vec<T>) -> Box<dyn SuspendableSort<T>>
where
    T: Clone + Eq + Hash + 'static,
{
    match strategy {
        Strategy::Heap => Box::new(HeapSort::new(elements)),
        Strategy::Insertion => Box::new(GenericSort::with_procedure(elements, BinaryInsertionSort)),
        Strategy::Merge => Box::new(GenericSort::with_procedure(elements, MergeSort)),
    }
}
