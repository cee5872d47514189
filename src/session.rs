//! Drives a suspendable sort to completion against an oracle.
//!
//! The engine never blocks: this loop is the only place that waits, by
//! calling the oracle synchronously between `advance()` and `resolve()`.

use serde::Serialize;
use tracing::{debug, info};

use crate::oracle::{Oracle, OracleError, Preference};
use crate::sort::{ProtocolError, SortState, Strategy, SuspendableSort};

/// One answered question, handed to observers after the engine accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEvent<T> {
    /// 1-based position of the question within the session.
    pub comparison_index: usize,
    pub strategy: Strategy,
    /// Pair in the order the engine presented it.
    pub presented: (T, T),
    /// The element placed earlier.
    pub chosen: T,
    pub alternative: T,
}

#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    #[error("{0}")]
    Message(String),
}

/// Per-comparison side effects (tracing, progress reporting, persistence).
pub trait ComparisonObserver<T> {
    fn on_comparison(&self, event: &ComparisonEvent<T>) -> Result<(), ObserverError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
    #[error("observer error: {0}")]
    Observer(#[from] ObserverError),
}

/// Final ranking plus what it took to get there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome<T> {
    pub strategy: Strategy,
    /// Most preferred first.
    pub sorted: Vec<T>,
    /// Questions put to the oracle.
    pub comparisons: usize,
}

/// Advance `sorter` until it is sorted, asking `oracle` every time it stops.
pub fn run_session<T, O>(
    sorter: &mut dyn SuspendableSort<T>,
    oracle: &mut O,
    observer: Option<&dyn ComparisonObserver<T>>,
) -> Result<SessionOutcome<T>, SessionError>
where
    T: Clone,
    O: Oracle<T> + ?Sized,
{
    let strategy = sorter.strategy();
    let mut comparisons = 0usize;

    loop {
        match sorter.advance()? {
            SortState::Sorted { sorted_list } => {
                info!(
                    %strategy,
                    comparisons,
                    items = sorted_list.len(),
                    "ranking session complete"
                );
                return Ok(SessionOutcome {
                    strategy,
                    sorted: sorted_list,
                    comparisons,
                });
            }
            SortState::ComparisonNeeded {
                elements: (first, second),
            } => {
                comparisons += 1;
                debug!(comparison_index = comparisons, "asking oracle");
                let (chosen, alternative) = match oracle.prefer(&first, &second)? {
                    Preference::First => (first.clone(), second.clone()),
                    Preference::Second => (second.clone(), first.clone()),
                };
                sorter.resolve(chosen.clone(), alternative.clone())?;

                if let Some(observer) = observer {
                    observer.on_comparison(&ComparisonEvent {
                        comparison_index: comparisons,
                        strategy,
                        presented: (first, second),
                        chosen,
                        alternative,
                    })?;
                }
            }
        }
    }
}
