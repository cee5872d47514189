use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use stepwise_rank::sort::{BinaryInsertionSort, MergeSort};
use stepwise_rank::{build_sorter, GenericSort, HeapSort, SortState, Strategy, SuspendableSort};

struct Interaction<T> {
    sorted: Vec<T>,
    comparisons: Vec<(T, T)>,
}

/// Answer every question by natural order, then check that advancing again is
/// a no-op.
fn interact<T>(sorter: &mut dyn SuspendableSort<T>) -> Interaction<T>
where
    T: Clone + Ord + Debug,
{
    let mut comparisons = Vec::new();
    loop {
        match sorter.advance().unwrap() {
            SortState::ComparisonNeeded { elements: (a, b) } => {
                comparisons.push((a.clone(), b.clone()));
                if a < b {
                    sorter.resolve(a, b).unwrap();
                } else {
                    sorter.resolve(b, a).unwrap();
                }
            }
            SortState::Sorted { sorted_list } => {
                let resolved = sorter.comparisons_resolved();
                assert_eq!(
                    sorter.advance().unwrap(),
                    SortState::Sorted {
                        sorted_list: sorted_list.clone()
                    }
                );
                assert_eq!(sorter.comparisons_resolved(), resolved);
                return Interaction {
                    sorted: sorted_list,
                    comparisons,
                };
            }
        }
    }
}

fn interact_with<T>(strategy: Strategy, items: Vec<T>) -> Interaction<T>
where
    T: Clone + Ord + Hash + Debug + 'static,
{
    let mut sorter = build_sorter(strategy, items);
    interact(sorter.as_mut())
}

fn pairs(raw: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    raw.to_vec()
}

#[test]
fn empty_and_singleton_inputs_need_no_questions() {
    for strategy in Strategy::ALL {
        let empty = interact_with::<&str>(strategy, vec![]);
        assert!(empty.sorted.is_empty());
        assert!(empty.comparisons.is_empty());

        let single = interact_with(strategy, vec!["a"]);
        assert_eq!(single.sorted, vec!["a"]);
        assert!(single.comparisons.is_empty(), "{strategy}");
    }
}

#[test]
fn pairs_ask_one_question_in_input_order() {
    for strategy in Strategy::ALL {
        let sorted_pair = interact_with(strategy, vec!["a", "b"]);
        assert_eq!(sorted_pair.sorted, vec!["a", "b"]);
        assert_eq!(sorted_pair.comparisons, pairs(&[("a", "b")]), "{strategy}");

        let unsorted_pair = interact_with(strategy, vec!["b", "a"]);
        assert_eq!(unsorted_pair.sorted, vec!["a", "b"]);
        assert_eq!(unsorted_pair.comparisons, pairs(&[("b", "a")]), "{strategy}");
    }
}

#[test]
fn heap_sort_question_sequence_on_sorted_list() {
    let result = interact(&mut HeapSort::new(vec!["a", "b", "c", "d"]));
    assert_eq!(result.sorted, vec!["a", "b", "c", "d"]);
    assert_eq!(
        result.comparisons,
        pairs(&[("b", "d"), ("c", "d"), ("a", "b"), ("c", "b"), ("a", "c")])
    );
}

#[test]
fn heap_sort_question_sequence_on_unsorted_list() {
    let result = interact(&mut HeapSort::new(vec!["c", "d", "b", "a"]));
    assert_eq!(result.sorted, vec!["a", "b", "c", "d"]);
    assert_eq!(
        result.comparisons,
        pairs(&[
            ("d", "a"),
            ("b", "d"),
            ("c", "a"),
            ("c", "d"),
            ("b", "c"),
            ("b", "a"),
        ])
    );
}

#[test]
fn heap_sort_large_list_regression() {
    let result = interact(&mut HeapSort::new(vec![9, 4, 7, 2, 5, 6, 3, 1, 0, 8]));
    assert_eq!(result.sorted, (0..10).collect::<Vec<_>>());
    assert_eq!(result.comparisons.len(), 23);
}

#[test]
fn insertion_sort_question_sequences() {
    let sorted = interact(&mut GenericSort::new(vec!["a", "b", "c", "d"]));
    assert_eq!(sorted.sorted, vec!["a", "b", "c", "d"]);
    assert_eq!(
        sorted.comparisons,
        pairs(&[("a", "b"), ("b", "c"), ("b", "d"), ("c", "d")])
    );

    let unsorted = interact(&mut GenericSort::new(vec!["c", "d", "b", "a"]));
    assert_eq!(unsorted.sorted, vec!["a", "b", "c", "d"]);
    assert_eq!(
        unsorted.comparisons,
        pairs(&[("c", "d"), ("d", "b"), ("c", "b"), ("c", "a"), ("b", "a")])
    );
}

#[test]
fn merge_sort_question_sequences() {
    let mut sorter = GenericSort::with_procedure(vec!["c", "d", "b", "a"], MergeSort);
    let result = interact(&mut sorter);
    assert_eq!(result.sorted, vec!["a", "b", "c", "d"]);
    assert_eq!(
        result.comparisons,
        pairs(&[("c", "d"), ("b", "a"), ("c", "a"), ("c", "b")])
    );
    // One pass per question plus the pass that completed.
    assert_eq!(sorter.passes(), 5);
}

#[test]
fn generic_sort_large_list_costs() {
    let input = vec![9, 4, 7, 2, 5, 6, 3, 1, 0, 8];
    let insertion = interact(&mut GenericSort::with_procedure(
        input.clone(),
        BinaryInsertionSort,
    ));
    assert_eq!(insertion.sorted, (0..10).collect::<Vec<_>>());
    assert_eq!(insertion.comparisons.len(), 23);

    let merge = interact(&mut GenericSort::with_procedure(input, MergeSort));
    assert_eq!(merge.sorted, (0..10).collect::<Vec<_>>());
    assert_eq!(merge.comparisons.len(), 25);
}

#[test]
fn strategies_report_their_names() {
    for strategy in Strategy::ALL {
        let sorter = build_sorter(strategy, vec![1, 2, 3]);
        assert_eq!(sorter.strategy(), strategy);
    }
    assert_eq!(
        GenericSort::new(vec![1]).strategy(),
        Strategy::Insertion
    );
}

fn check_session<T>(strategy: Strategy, items: Vec<T>)
where
    T: Clone + Ord + Hash + Debug + 'static,
{
    let n = items.len();
    let mut expected = items.clone();
    expected.sort();

    let result = interact_with(strategy, items.clone());
    assert_eq!(result.sorted, expected, "{strategy} on {items:?}");

    let mut seen = HashSet::new();
    for (a, b) in &result.comparisons {
        assert_ne!(a, b, "{strategy} compared equal elements");
        assert!(
            seen.insert((a.clone(), b.clone())),
            "{strategy} repeated ({a:?}, {b:?})"
        );
        assert!(
            !seen.contains(&(b.clone(), a.clone())),
            "{strategy} asked ({a:?}, {b:?}) after its mirror"
        );
    }
    assert!(result.comparisons.len() <= n * n.saturating_sub(1) / 2);
}

#[test]
fn shuffled_distinct_inputs_sort_without_repeats() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for strategy in Strategy::ALL {
        for n in 0..=12 {
            for _ in 0..25 {
                let mut items: Vec<u32> = (0..n).collect();
                items.shuffle(&mut rng);
                check_session(strategy, items);
            }
        }
    }
}

#[test]
fn inputs_with_duplicates_sort_without_self_comparison() {
    let mut rng = StdRng::seed_from_u64(42);
    for strategy in Strategy::ALL {
        for n in 0..=10 {
            for _ in 0..25 {
                let items: Vec<u8> = (0..n).map(|_| rng.gen_range(0..4)).collect();
                check_session(strategy, items);
            }
        }
    }
}

#[test]
fn heap_sort_stays_near_n_log_n() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [16usize, 32, 64] {
        let mut items: Vec<usize> = (0..n).collect();
        items.shuffle(&mut rng);
        let result = interact(&mut HeapSort::new(items));
        let bound = 2.0 * (n as f64) * (n as f64).log2();
        assert!(
            (result.comparisons.len() as f64) <= bound,
            "n={n}: {} questions",
            result.comparisons.len()
        );
    }
}
