//! Merge-insertion sort (Ford-Johnson), built to spend as few comparisons as
//! possible.
//!
//! [`merge_insert_sort`] and [`merge_insert_sort_by`] cover the common case.
//! [`MergeInsert`] exposes the same sort one stage at a time, over any
//! [`Sequence`] container.

pub mod input;
mod jacobsthal;
mod pairing;
mod sequence;
mod sorter;

use std::cmp::Ordering;

pub use jacobsthal::jacobsthal_order;
pub use pairing::{Pair, assemble, by_high, make_pairs, order_pairs};
pub use sequence::{Sequence, binary_insert, binary_insert_within};
pub use sorter::{Comparisons, MergeInsert, Stage};

/// Sorts `items` in ascending order.
#[must_use]
pub fn merge_insert_sort<T: Ord>(items: Vec<T>) -> Vec<T> {
    merge_insert_sort_by(items, Ord::cmp)
}

/// Sorts `items` with the Ford-Johnson merge-insertion algorithm, which is
/// designed to minimize the number of calls to `compare`.
///
/// # Comparator contract
///
/// `compare` must define a total order over the items. Results are
/// unspecified (but still a permutation of the input) if it does not.
/// Equal items may come out in any relative order.
#[must_use]
pub fn merge_insert_sort_by<T, F>(items: Vec<T>, compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorter: MergeInsert<T> = MergeInsert::new(items);
    sorter.run(compare);
    sorter.into_sorted()
}

/// Sorts `items` into a container of the caller's choice.
#[must_use]
pub fn merge_insert_sort_into<C, T>(items: impl IntoIterator<Item = T>) -> C
where
    C: Sequence<T>,
    T: Ord,
{
    let mut sorter: MergeInsert<T, C> = MergeInsert::new(items);
    sorter.run(Ord::cmp);
    sorter.into_sorted()
}

/// Returns the most pairing and insertion comparisons a sort of `n` items
/// can take (see [`Comparisons::bounded`]).
///
/// Every insertion after the free first one is charged a binary search over
/// the whole chain, so real runs usually stay well below this.
#[must_use]
pub fn max_comparisons(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }

    let num_pairs = n / 2;
    let mut total = num_pairs;
    for chain_len in (num_pairs + 1)..n {
        total += ceil_log2(chain_len + 1);
    }
    total
}

fn ceil_log2(value: usize) -> usize {
    if value <= 1 {
        return 0;
    }
    let mut v = value - 1;
    let mut bits = 0usize;
    while v > 0 {
        bits += 1;
        v >>= 1;
    }
    bits
}
