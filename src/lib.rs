#![forbid(unsafe_code)]

//! # stepwise-rank
//!
//! Put a handful of items in order by answering "which do you prefer?"
//! questions, as few of them as possible.
//!
//! The engines in [`sort`] are comparison sorts turned inside out: when they
//! reach a pair they have no answer for, they return it to the caller instead
//! of calling a comparator. The caller asks its oracle (usually a person),
//! records the answer with `resolve`, and calls `advance` again. Answers are
//! cached, so no question is ever asked twice.
//!
//! ```ignore
//! let mut sorter = HeapSort::new(vec!["tea", "coffee", "juice"]);
//! loop {
//!     match sorter.advance()? {
//!         SortState::Sorted { sorted_list } => break sorted_list,
//!         SortState::ComparisonNeeded { elements: (a, b) } => {
//!             let (chosen, other) = ask_user(a, b);
//!             sorter.resolve(chosen, other)?;
//!         }
//!     }
//! }
//! ```

pub mod cache;
pub mod input;
pub mod options;
pub mod oracle;
pub mod session;
pub mod sort;
pub mod trace;

pub use cache::ComparisonCache;
pub use options::{rank, RankRunOptions};
pub use oracle::{NaturalOrder, Oracle, OracleError, Preference, PromptOracle};
pub use session::{
    run_session, ComparisonEvent, ComparisonObserver, ObserverError, SessionError, SessionOutcome,
};
pub use sort::{
    build_sorter, GenericSort, HeapSort, ProtocolError, SortState, Strategy, SuspendableSort,
};
pub use trace::{ComparisonTrace, JsonlTraceSink, TraceError, TraceWorker};
