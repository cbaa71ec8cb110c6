use std::cmp::Ordering;

use crate::sequence::Sequence;

/// Two input elements after one comparison: `low` never compares greater
/// than `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<T> {
    low: T,
    high: T,
}

impl<T> Pair<T> {
    /// Orders `a` and `b` with a single comparison. Equal elements keep
    /// their input order.
    pub fn new<F>(a: T, b: T, compare: &mut F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if compare(&a, &b) == Ordering::Greater {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    pub fn low(&self) -> &T {
        &self.low
    }

    pub fn high(&self) -> &T {
        &self.high
    }

    /// Returns `(low, high)`.
    pub fn into_parts(self) -> (T, T) {
        (self.low, self.high)
    }
}

/// Pairs adjacent elements of `items`. An odd trailing element is returned
/// as the straggler.
pub fn make_pairs<T, I, F>(items: I, compare: &mut F) -> (Vec<Pair<T>>, Option<T>)
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut items = items.into_iter().fuse();
    let mut pairs = Vec::with_capacity(items.size_hint().0 / 2);
    loop {
        match (items.next(), items.next()) {
            (Some(a), Some(b)) => pairs.push(Pair::new(a, b, compare)),
            (straggler, _) => return (pairs, straggler),
        }
    }
}

/// The pair ordering policy: compares two pairs by their `high` element.
pub fn by_high<T, F>(compare: &mut F) -> impl FnMut(&Pair<T>, &Pair<T>) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    move |a: &Pair<T>, b: &Pair<T>| compare(a.high(), b.high())
}

/// Stable sort of `pairs` by [`by_high`]; pairs with equal `high` elements
/// keep their pairing order.
pub fn order_pairs<T, F>(pairs: &mut [Pair<T>], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    pairs.sort_by(by_high(compare));
}

/// Splits ordered pairs into the main chain (their `high` elements) and the
/// pending list (their `low` elements, index-aligned with the chain).
///
/// `capacity` is reserved for the chain so later insertions don't regrow it.
pub fn assemble<T, C>(pairs: Vec<Pair<T>>, capacity: usize) -> (C, Vec<T>)
where
    C: Sequence<T>,
{
    let mut chain = C::with_capacity(capacity.max(pairs.len()));
    let mut pending = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (low, high) = pair.into_parts();
        chain.push(high);
        pending.push(low);
    }
    (chain, pending)
}
