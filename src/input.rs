//! Turning free text into the item list handed to an engine.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// One item per line. Trailing whitespace is trimmed and blank lines dropped.
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Shuffle in place so input order does not feed straight into the engine's
/// initial layout. A fixed `seed` makes the order reproducible.
pub fn shuffle_items<T>(items: &mut [T], seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    items.shuffle(&mut rng);
}
