//! Run settings and the one-call ranking entry point.

use std::hash::Hash;

use tracing::warn;

use crate::input::shuffle_items;
use crate::oracle::Oracle;
use crate::session::{run_session, ComparisonObserver, SessionError, SessionOutcome};
use crate::sort::{build_sorter, Strategy};

/// Environment variable holding a default shuffle seed.
pub const SEED_ENV: &str = "STEPWISE_RANK_SEED";
/// Environment variable naming the default engine.
pub const STRATEGY_ENV: &str = "STEPWISE_RANK_STRATEGY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRunOptions {
    /// Engine used to order the items.
    pub strategy: Strategy,
    /// Fixed shuffle seed; `None` draws one from the OS.
    pub rng_seed: Option<u64>,
    /// Shuffle the items before the engine sees them.
    pub shuffle: bool,
}

impl Default for RankRunOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Heap,
            rng_seed: None,
            shuffle: true,
        }
    }
}

impl RankRunOptions {
    /// Defaults, overridden by `STEPWISE_RANK_SEED` and `STEPWISE_RANK_STRATEGY`.
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => options.rng_seed = Some(seed),
                Err(err) => warn!(
                    value = %raw,
                    error = %err,
                    "ignoring {SEED_ENV}; shuffling with a random seed"
                ),
            }
        }
        if let Some(raw) = lookup(STRATEGY_ENV) {
            match raw.parse::<Strategy>() {
                Ok(strategy) => options.strategy = strategy,
                Err(err) => warn!(
                    error = %err,
                    "ignoring {STRATEGY_ENV}; using {}",
                    options.strategy
                ),
            }
        }
        options
    }
}

/// Shuffle (if enabled), build the chosen engine, and run it to completion.
pub fn rank<T, O>(
    mut items: Vec<T>,
    options: &RankRunOptions,
    oracle: &mut O,
    observer: Option<&dyn ComparisonObserver<T>>,
) -> Result<SessionOutcome<T>, SessionError>
where
    T: Clone + Eq + Hash + 'static,
    O: Oracle<T> + ?Sized,
{
    if options.shuffle {
        shuffle_items(&mut items, options.rng_seed);
    }
    let mut sorter = build_sorter(options.strategy, items);
    run_session(sorter.as_mut(), oracle, observer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(
            RankRunOptions::from_lookup(lookup(&[])),
            RankRunOptions::default()
        );
    }

    #[test]
    fn variables_override_seed_and_strategy() {
        let options = RankRunOptions::from_lookup(lookup(&[
            (SEED_ENV, " 99 "),
            (STRATEGY_ENV, " Merge\n"),
        ]));
        assert_eq!(options.rng_seed, Some(99));
        assert_eq!(options.strategy, Strategy::Merge);
        assert!(options.shuffle);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let options = RankRunOptions::from_lookup(lookup(&[
            (SEED_ENV, "12ab"),
            (STRATEGY_ENV, "bogo"),
        ]));
        assert_eq!(options.rng_seed, None);
        assert_eq!(options.strategy, Strategy::Heap);
    }
}
