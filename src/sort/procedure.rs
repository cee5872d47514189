//! Comparison sorts whose comparator may abort the whole pass.
//!
//! The generic engine re-runs one of these from scratch on every `advance()`;
//! the first comparator error unwinds straight out through `?`.

use std::cmp::Ordering;

use super::Strategy;

/// A comparison sort that stops at the first comparator error.
///
/// On `Err` the slice is still a permutation of its input, but its order is
/// unspecified.
pub trait TrySort {
    /// Name the procedure is exposed under.
    const STRATEGY: Strategy;

    fn try_sort_by<T, E, F>(&self, v: &mut [T], compare: F) -> Result<(), E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>;
}

/// Stable binary insertion sort.
///
/// Each insertion binary-searches the sorted prefix, so a pass asks roughly
/// `log2(i)` questions for the `i`-th element.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryInsertionSort;

impl TrySort for BinaryInsertionSort {
    const STRATEGY: Strategy = Strategy::Insertion;

    fn try_sort_by<T, E, F>(&self, v: &mut [T], mut compare: F) -> Result<(), E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        for i in 1..v.len() {
            let pos = insertion_point(&v[..i], &v[i], &mut compare)?;
            v[pos..=i].rotate_right(1);
        }
        Ok(())
    }
}

/// Upper-bound position of `item` within the sorted `prefix`.
fn insertion_point<T, E, F>(prefix: &[T], item: &T, compare: &mut F) -> Result<usize, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let (mut lo, mut hi) = (0, prefix.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if compare(&prefix[mid], item)? == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

/// Stable top-down merge sort.
///
/// Each merge is assembled in a scratch buffer and only copied back once it
/// completes, so an aborted pass never leaves a half-written run behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl TrySort for MergeSort {
    const STRATEGY: Strategy = Strategy::Merge;

    fn try_sort_by<T, E, F>(&self, v: &mut [T], mut compare: F) -> Result<(), E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        merge_sort(v, &mut compare)
    }
}

fn merge_sort<T, E, F>(v: &mut [T], compare: &mut F) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = v.len();
    if len < 2 {
        return Ok(());
    }

    let mid = len / 2;
    merge_sort(&mut v[..mid], compare)?;
    merge_sort(&mut v[mid..], compare)?;

    let mut merged = Vec::with_capacity(len);
    {
        let (left, right) = v.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // Ties take from the left run to stay stable.
            if compare(&left[i], &right[j])? == Ordering::Greater {
                merged.push(right[j].clone());
                j += 1;
            } else {
                merged.push(left[i].clone());
                i += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    v.clone_from_slice(&merged);
    Ok(())
}
