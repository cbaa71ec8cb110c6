use mergeinsert::{Comparisons, MergeInsert, Stage};

/// What the sorter looked like after one stage transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) stage: Stage,
    pub(crate) unsorted: Vec<u32>,
    pub(crate) pairs: Vec<(u32, u32)>,
    pub(crate) main_chain: Vec<u32>,
    pub(crate) pending: Vec<u32>,
    pub(crate) schedule: Vec<usize>,
    pub(crate) straggler: Option<u32>,
    pub(crate) comparisons: Comparisons,
}

/// Drives a [`MergeInsert`] one stage per call, yielding a [`Snapshot`] of
/// every stage including the initial one.
pub(crate) struct Stepper {
    sorter: MergeInsert<u32>,
    started: bool,
}

impl Stepper {
    pub(crate) fn new(values: Vec<u32>) -> Self {
        Self {
            sorter: MergeInsert::new(values),
            started: false,
        }
    }

    fn snapshot(&self) -> Snapshot {
        let sorter = &self.sorter;
        Snapshot {
            stage: sorter.stage(),
            unsorted: sorter.unsorted().to_vec(),
            pairs: sorter
                .pairs()
                .iter()
                .map(|pair| (*pair.low(), *pair.high()))
                .collect(),
            main_chain: sorter.main_chain().clone(),
            pending: sorter.pending().copied().collect(),
            schedule: sorter.schedule().to_vec(),
            straggler: sorter.straggler().copied(),
            comparisons: sorter.comparisons(),
        }
    }
}

impl Iterator for Stepper {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if !self.started {
            self.started = true;
            return Some(self.snapshot());
        }
        if self.sorter.stage() == Stage::Sorted {
            return None;
        }
        self.sorter.advance(&mut u32::cmp);
        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use mergeinsert::Stage;

    use super::Stepper;

    #[test]
    fn yields_every_stage_once() {
        let stages: Vec<_> = Stepper::new(vec![5, 3, 8, 1]).map(|s| s.stage).collect();
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
    }

    #[test]
    fn snapshots_follow_the_chain() {
        let snapshots: Vec<_> = Stepper::new(vec![5, 3, 8, 1]).collect();
        assert_eq!(snapshots[0].unsorted, vec![5, 3, 8, 1]);
        assert_eq!(snapshots[1].pairs, vec![(3, 5), (1, 8)]);
        assert_eq!(snapshots[2].main_chain, vec![3, 5, 8]);
        assert_eq!(snapshots[2].pending, vec![1]);
        assert_eq!(snapshots[3].schedule, vec![1]);
        assert_eq!(snapshots.last().unwrap().main_chain, vec![1, 3, 5, 8]);
    }

    #[test]
    fn single_value_has_two_snapshots() {
        let snapshots: Vec<_> = Stepper::new(vec![4]).collect();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].stage, Stage::Sorted);
        assert_eq!(snapshots[1].main_chain, vec![4]);
    }
}
