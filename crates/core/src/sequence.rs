use std::cmp::Ordering;
use std::collections::VecDeque;

/// A container the main chain can live in: ordered insertion plus indexed
/// access. Implemented for `Vec<T>` and `VecDeque<T>`.
pub trait Sequence<T> {
    fn with_capacity(capacity: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn at(&self, index: usize) -> &T;

    /// Inserts `value` at `index`, shifting later elements up by one.
    fn insert(&mut self, index: usize, value: T);

    fn push(&mut self, value: T);
}

impl<T> Sequence<T> for Vec<T> {
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn insert(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value);
    }

    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn insert(&mut self, index: usize, value: T) {
        VecDeque::insert(self, index, value);
    }

    fn push(&mut self, value: T) {
        self.push_back(value);
    }
}

/// Inserts `value` into the sorted `chain` at its leftmost valid position and
/// returns that position.
pub fn binary_insert<T, C, F>(chain: &mut C, value: T, compare: &mut F) -> usize
where
    C: Sequence<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let bound = chain.len();
    binary_insert_within(chain, value, bound, compare)
}

/// Like [`binary_insert`], but only searches `chain[..bound]`.
///
/// The caller guarantees that `value` is not greater than `chain[bound]`
/// (when it exists), so the chain stays sorted. Spends at most
/// `ceil(log2(bound + 1))` comparisons.
///
/// # Panics
///
/// Panics if `bound > chain.len()`.
pub fn binary_insert_within<T, C, F>(chain: &mut C, value: T, bound: usize, compare: &mut F) -> usize
where
    C: Sequence<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(bound <= chain.len(), "search window exceeds the chain");
    let idx = insertion_point(chain, &value, bound, compare);
    chain.insert(idx, value);
    idx
}

fn insertion_point<T, C, F>(chain: &C, value: &T, bound: usize, compare: &mut F) -> usize
where
    C: Sequence<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = 0usize;
    let mut hi = bound;
    while lo < hi {
        let mid = usize::midpoint(lo, hi);
        if compare(value, chain.at(mid)) == Ordering::Greater {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
