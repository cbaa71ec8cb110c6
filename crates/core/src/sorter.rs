use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::jacobsthal::jacobsthal_order;
use crate::pairing::{Pair, assemble, make_pairs, order_pairs};
use crate::sequence::{Sequence, binary_insert, binary_insert_within};

/// Where a [`MergeInsert`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Unsorted,
    Paired,
    MainChainSeeded,
    ScheduledInsertion,
    StragglerResolved,
    Sorted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Unsorted => "unsorted",
            Stage::Paired => "paired",
            Stage::MainChainSeeded => "main chain seeded",
            Stage::ScheduledInsertion => "scheduled insertion",
            Stage::StragglerResolved => "straggler resolved",
            Stage::Sorted => "sorted",
        })
    }
}

/// Comparisons spent so far, by stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparisons {
    pub pairing: usize,
    pub ordering: usize,
    pub insertion: usize,
}

impl Comparisons {
    #[must_use]
    pub fn total(&self) -> usize {
        self.pairing + self.ordering + self.insertion
    }

    /// Pairing and insertion comparisons, the part bounded by
    /// [`max_comparisons`](crate::max_comparisons).
    #[must_use]
    pub fn bounded(&self) -> usize {
        self.pairing + self.insertion
    }
}

/// A merge-insertion sort that can be driven one stage at a time.
///
/// ```text
/// Unsorted -> Paired -> MainChainSeeded -> ScheduledInsertion -> StragglerResolved -> Sorted
/// ```
///
/// Inputs of length 0 or 1 go straight from `Unsorted` to `Sorted`.
#[derive(Debug, Clone)]
pub struct MergeInsert<T, C = Vec<T>> {
    stage: Stage,
    len: usize,
    unsorted: Vec<T>,
    pairs: Vec<Pair<T>>,
    straggler: Option<T>,
    chain: C,
    pending: Vec<Option<T>>,
    // Position of each pending value's partner in the chain.
    partner_at: Vec<usize>,
    schedule: Vec<usize>,
    comparisons: Comparisons,
}

impl<T, C> MergeInsert<T, C>
where
    C: Sequence<T>,
{
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let unsorted: Vec<T> = items.into_iter().collect();
        let len = unsorted.len();
        Self {
            stage: Stage::Unsorted,
            len,
            unsorted,
            pairs: Vec::new(),
            straggler: None,
            chain: C::with_capacity(len),
            pending: Vec::new(),
            partner_at: Vec::new(),
            schedule: Vec::new(),
            comparisons: Comparisons::default(),
        }
    }

    /// Performs the next stage transition and returns the new stage.
    /// Does nothing once [`Stage::Sorted`] is reached.
    ///
    /// `compare` must be a total order and must be the same order on every
    /// call.
    ///
    /// # Panics
    ///
    /// Panics if the internal bookkeeping is inconsistent, which indicates a
    /// bug in the sorter.
    pub fn advance<F>(&mut self, compare: &mut F) -> Stage
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let from = self.stage;
        self.stage = match from {
            Stage::Unsorted if self.len <= 1 => {
                for value in self.unsorted.drain(..) {
                    self.chain.push(value);
                }
                Stage::Sorted
            }
            Stage::Unsorted => {
                self.pair(compare);
                Stage::Paired
            }
            Stage::Paired => {
                self.seed(compare);
                Stage::MainChainSeeded
            }
            Stage::MainChainSeeded => {
                self.insert_scheduled(compare);
                Stage::ScheduledInsertion
            }
            Stage::ScheduledInsertion => {
                self.resolve_straggler(compare);
                Stage::StragglerResolved
            }
            Stage::StragglerResolved | Stage::Sorted => Stage::Sorted,
        };

        debug_assert_eq!(self.accounted(), self.len, "element lost in {from} -> {}", self.stage);
        if from != self.stage {
            trace!(
                "merge-insert of {} elements: {from} -> {} (chain {}, {} comparisons)",
                self.len,
                self.stage,
                self.chain.len(),
                self.comparisons.total()
            );
        }
        self.stage
    }

    /// Advances until [`Stage::Sorted`].
    pub fn run<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        while self.advance(&mut compare) != Stage::Sorted {}
    }

    /// Consumes the sorter and returns its main chain, which is the sorted
    /// input once [`Stage::Sorted`] has been reached.
    pub fn into_sorted(self) -> C {
        debug_assert_eq!(self.stage, Stage::Sorted);
        self.chain
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Number of elements being sorted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The input, until it is paired.
    pub fn unsorted(&self) -> &[T] {
        &self.unsorted
    }

    /// Pairs awaiting assembly; empty outside [`Stage::Paired`].
    pub fn pairs(&self) -> &[Pair<T>] {
        &self.pairs
    }

    pub fn main_chain(&self) -> &C {
        &self.chain
    }

    /// Pending values not yet inserted, in pending-list order.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.pending.iter().flatten()
    }

    /// The insertion schedule over pending indices, once computed.
    pub fn schedule(&self) -> &[usize] {
        &self.schedule
    }

    pub fn straggler(&self) -> Option<&T> {
        self.straggler.as_ref()
    }

    pub fn comparisons(&self) -> Comparisons {
        self.comparisons
    }

    fn pair<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let unsorted = std::mem::take(&mut self.unsorted);
        let mut count = 0;
        let (pairs, straggler) = make_pairs(unsorted, &mut counting(compare, &mut count));
        self.comparisons.pairing += count;
        self.pairs = pairs;
        self.straggler = straggler;
    }

    fn seed<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut pairs = std::mem::take(&mut self.pairs);
        let mut count = 0;
        order_pairs(&mut pairs, &mut counting(compare, &mut count));
        self.comparisons.ordering += count;

        let (chain, pending) = assemble(pairs, self.len);
        self.chain = chain;
        self.partner_at = (0..pending.len()).collect();
        self.pending = pending.into_iter().map(Some).collect();

        // Its partner heads the chain, so it lands in front for free.
        self.insert_pending(0, compare);
    }

    fn insert_scheduled<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.schedule = jacobsthal_order(self.pending.len().saturating_sub(1));
        for i in 0..self.schedule.len() {
            self.insert_pending(self.schedule[i], compare);
        }
    }

    fn resolve_straggler<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if let Some(value) = self.straggler.take() {
            let mut count = 0;
            binary_insert(&mut self.chain, value, &mut counting(compare, &mut count));
            self.comparisons.insertion += count;
        }
    }

    fn insert_pending<F>(&mut self, idx: usize, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let value = self.pending[idx]
            .take()
            .expect("each pending value is inserted once");
        let bound = self.partner_at[idx];

        let mut count = 0;
        let at = binary_insert_within(&mut self.chain, value, bound, &mut counting(compare, &mut count));
        self.comparisons.insertion += count;

        for pos in &mut self.partner_at {
            if *pos >= at {
                *pos += 1;
            }
        }
    }

    fn accounted(&self) -> usize {
        self.unsorted.len()
            + 2 * self.pairs.len()
            + usize::from(self.straggler.is_some())
            + self.chain.len()
            + self.pending().count()
    }
}

fn counting<T, F>(compare: &mut F, count: &mut usize) -> impl FnMut(&T, &T) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| {
        *count += 1;
        compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::{Comparisons, MergeInsert, Stage};

    fn snapshot(sorter: &MergeInsert<i32>) -> (Stage, Vec<i32>, Vec<i32>, Option<i32>) {
        (
            sorter.stage(),
            sorter.main_chain().clone(),
            sorter.pending().copied().collect(),
            sorter.straggler().copied(),
        )
    }

    fn trace(input: Vec<i32>) -> Vec<(Stage, Vec<i32>, Vec<i32>, Option<i32>)> {
        let mut sorter = MergeInsert::new(input);
        let mut out = vec![snapshot(&sorter)];
        while sorter.stage() != Stage::Sorted {
            sorter.advance(&mut i32::cmp);
            out.push(snapshot(&sorter));
        }
        out
    }

    #[test]
    fn walks_every_stage_for_even_input() {
        let mut sorter: MergeInsert<i32> = MergeInsert::new(vec![5, 3, 8, 1]);
        assert_eq!(sorter.stage(), Stage::Unsorted);
        assert_eq!(sorter.unsorted(), &[5, 3, 8, 1]);

        assert_eq!(sorter.advance(&mut i32::cmp), Stage::Paired);
        let pairs: Vec<_> = sorter.pairs().iter().map(|p| (*p.low(), *p.high())).collect();
        assert_eq!(pairs, vec![(3, 5), (1, 8)]);
        assert!(sorter.unsorted().is_empty());

        assert_eq!(sorter.advance(&mut i32::cmp), Stage::MainChainSeeded);
        assert_eq!(sorter.main_chain(), &vec![3, 5, 8]);
        assert_eq!(sorter.pending().copied().collect::<Vec<_>>(), vec![1]);

        assert_eq!(sorter.advance(&mut i32::cmp), Stage::ScheduledInsertion);
        assert_eq!(sorter.schedule(), &[1]);
        assert_eq!(sorter.main_chain(), &vec![1, 3, 5, 8]);

        assert_eq!(sorter.advance(&mut i32::cmp), Stage::StragglerResolved);
        assert_eq!(sorter.advance(&mut i32::cmp), Stage::Sorted);
        assert_eq!(sorter.advance(&mut i32::cmp), Stage::Sorted);
        assert_eq!(sorter.into_sorted(), vec![1, 3, 5, 8]);
    }

    #[test]
    fn straggler_is_inserted_last() {
        let steps = trace(vec![7, 2, 9, 4, 6]);
        let stages: Vec<_> = steps.iter().map(|s| s.0).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Unsorted,
                Stage::Paired,
                Stage::MainChainSeeded,
                Stage::ScheduledInsertion,
                Stage::StragglerResolved,
                Stage::Sorted,
            ]
        );
        assert_eq!(steps[1].3, Some(6));
        assert_eq!(steps[2].1, vec![2, 7, 9]);
        assert_eq!(steps[2].2, vec![4]);
        assert_eq!(steps[3].1, vec![2, 4, 7, 9]);
        assert_eq!(steps[3].3, Some(6));
        assert_eq!(steps[4].1, vec![2, 4, 6, 7, 9]);
        assert_eq!(steps[4].3, None);
    }

    #[test]
    fn all_equal_odd_input() {
        let steps = trace(vec![9, 9, 9]);
        assert_eq!(steps.last().unwrap().1, vec![9, 9, 9]);
        assert_eq!(steps[1].3, Some(9));
    }

    #[test]
    fn short_inputs_skip_to_sorted() {
        for input in [vec![], vec![4]] {
            let steps = trace(input.clone());
            assert_eq!(steps.len(), 2);
            assert_eq!(steps[1].0, Stage::Sorted);
            assert_eq!(steps[1].1, input);
        }
    }

    #[test]
    fn element_count_is_conserved() {
        let input = vec![12, 3, 7, 7, 1, 30, 22, 5, 9, 14, 2];
        let mut sorter: MergeInsert<i32> = MergeInsert::new(input.clone());
        loop {
            let held = sorter.unsorted().len()
                + 2 * sorter.pairs().len()
                + sorter.main_chain().len()
                + sorter.pending().count()
                + usize::from(sorter.straggler().is_some());
            assert_eq!(held, input.len(), "at {}", sorter.stage());
            assert!(sorter.main_chain().is_sorted(), "at {}", sorter.stage());
            if sorter.stage() == Stage::Sorted {
                break;
            }
            sorter.advance(&mut i32::cmp);
        }
    }

    #[test]
    fn first_pending_value_is_free() {
        let mut sorter: MergeInsert<i32> = MergeInsert::new(vec![4, 1, 3, 2]);
        sorter.advance(&mut i32::cmp);
        sorter.advance(&mut i32::cmp);
        let spent = sorter.comparisons();
        assert_eq!(spent.pairing, 2);
        assert_eq!(spent.insertion, 0);
        assert_eq!(sorter.main_chain(), &vec![2, 3, 4]);
    }

    #[test]
    fn counts_comparisons_by_stage() {
        let mut calls = 0usize;
        let mut sorter: MergeInsert<i32> = MergeInsert::new(vec![7, 2, 9, 4, 6]);
        sorter.run(|a, b| {
            calls += 1;
            a.cmp(b)
        });
        let spent = sorter.comparisons();
        assert_eq!(spent.total(), calls);
        assert_eq!(spent.pairing, 2);
        assert_eq!(spent.ordering, 1);
        assert!(spent.bounded() <= crate::max_comparisons(5));
        assert_ne!(spent, Comparisons::default());
    }

    #[test]
    fn sorts_into_deque() {
        let mut sorter: MergeInsert<i32, VecDeque<i32>> = MergeInsert::new(vec![3, 1, 2]);
        sorter.run(i32::cmp);
        assert_eq!(sorter.into_sorted(), VecDeque::from(vec![1, 2, 3]));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::MainChainSeeded.to_string(), "main chain seeded");
        assert_eq!(Stage::Sorted.to_string(), "sorted");
    }
}
