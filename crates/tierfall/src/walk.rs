// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! The strategy walk shared by both delivery models.
//!
//! [`Walk`] tracks position, whether anything has been emitted, and whether
//! the execution is over. The async stream and the blocking iterator both
//! drive the same machine, so the two delivery models cannot drift apart.

use crate::{DataSource, Strategy, StrategyEntry};

/// What the driver should do next.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Consult the provider for `source`, which sits at `index` in the plan.
    Attempt { index: usize, source: DataSource },

    /// Every entry was tried and none produced a response.
    Exhausted,

    /// The execution is over; no further items will be produced.
    Complete,
}

/// Progress state for one execution of a [`Strategy`].
///
/// The walk owns a clone of its strategy so an execution is unaffected by
/// anything that happens to the caller's copy.
#[derive(Debug)]
pub(crate) struct Walk {
    strategy: Strategy,
    next: usize,
    emitted: bool,
    finished: bool,
}

impl Walk {
    pub(crate) fn new(strategy: &Strategy) -> Self {
        Self {
            strategy: strategy.clone(),
            next: 0,
            emitted: false,
            finished: false,
        }
    }

    /// Advances past ignored entries to the next retrieval attempt.
    ///
    /// Returns [`Step::Exhausted`] exactly once when the plan runs out
    /// without a single emission; after that (or after a terminating hit)
    /// the walk is fused and always returns [`Step::Complete`].
    pub(crate) fn next_attempt(&mut self) -> Step {
        if self.finished {
            return Step::Complete;
        }

        while let Some(entry) = self.strategy.entries().get(self.next) {
            let index = self.next;
            self.next += 1;

            if entry.is_ignored_on_retrieval() {
                continue;
            }

            return Step::Attempt {
                index,
                source: entry.source(),
            };
        }

        self.finished = true;
        if self.emitted {
            Step::Complete
        } else {
            Step::Exhausted
        }
    }

    /// Records a hit at `index` and returns the backfill targets.
    ///
    /// Targets are the cache entries strictly before the hit, nearest
    /// first. Entries skipped on retrieval still qualify. A hit ends the
    /// walk unless the strategy is multi-emission.
    pub(crate) fn record_hit(&mut self, index: usize) -> Vec<DataSource> {
        self.emitted = true;
        if !self.strategy.is_multi_emission() {
            self.finished = true;
        }

        self.strategy.entries()[..index]
            .iter()
            .rev()
            .filter(|entry| entry.source().is_cache())
            .map(StrategyEntry::source)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, Walk};
    use crate::{DataSource, Strategy, StrategyEntry};

    #[test]
    fn walk_skips_ignored_entries() {
        let mut walk = Walk::new(&Strategy::NETWORK_REPLACE_CACHE);
        assert_eq!(
            walk.next_attempt(),
            Step::Attempt {
                index: 1,
                source: DataSource::Network
            }
        );
    }

    #[test]
    fn hit_on_single_emission_strategy_finishes_the_walk() {
        let mut walk = Walk::new(&Strategy::STANDARD);
        assert!(matches!(walk.next_attempt(), Step::Attempt { index: 0, .. }));

        let targets = walk.record_hit(0);
        assert!(targets.is_empty());
        assert_eq!(walk.next_attempt(), Step::Complete);
    }

    #[test]
    fn hit_on_multi_emission_strategy_continues() {
        let mut walk = Walk::new(&Strategy::CACHE_THEN_NETWORK);
        assert!(matches!(walk.next_attempt(), Step::Attempt { index: 0, .. }));

        let targets = walk.record_hit(0);
        assert!(targets.is_empty());
        assert_eq!(
            walk.next_attempt(),
            Step::Attempt {
                index: 1,
                source: DataSource::Network
            }
        );
    }

    #[test]
    fn exhaustion_without_emission_is_reported_once() {
        let mut walk = Walk::new(&Strategy::CACHE_ONLY);
        assert!(matches!(walk.next_attempt(), Step::Attempt { .. }));
        assert_eq!(walk.next_attempt(), Step::Exhausted);
        assert_eq!(walk.next_attempt(), Step::Complete);
    }

    #[test]
    fn exhaustion_after_emission_completes_cleanly() {
        let mut walk = Walk::new(&Strategy::CACHE_THEN_NETWORK);
        assert!(matches!(walk.next_attempt(), Step::Attempt { .. }));
        let _ = walk.record_hit(0);
        assert!(matches!(walk.next_attempt(), Step::Attempt { .. }));
        assert_eq!(walk.next_attempt(), Step::Complete);
    }

    #[test]
    fn backfill_targets_include_ignored_cache_entries() {
        let mut walk = Walk::new(&Strategy::NETWORK_REPLACE_CACHE);
        assert!(matches!(walk.next_attempt(), Step::Attempt { index: 1, .. }));

        let targets = walk.record_hit(1);
        assert_eq!(targets, [DataSource::Cache]);
    }

    #[test]
    fn backfill_targets_are_nearest_first() {
        let strategy = Strategy::new(
            false,
            vec![
                StrategyEntry::new(DataSource::Cache),
                StrategyEntry::ignored(DataSource::Cache),
                StrategyEntry::new(DataSource::Network),
            ],
        );
        let mut walk = Walk::new(&strategy);
        assert!(matches!(walk.next_attempt(), Step::Attempt { index: 0, .. }));
        assert!(matches!(walk.next_attempt(), Step::Attempt { index: 2, .. }));

        let targets = walk.record_hit(2);
        assert_eq!(targets, [DataSource::Cache, DataSource::Cache]);
    }

    #[test]
    fn empty_strategy_is_immediately_exhausted() {
        let strategy = Strategy::new(false, Vec::new());
        let mut walk = Walk::new(&strategy);
        assert_eq!(walk.next_attempt(), Step::Exhausted);
        assert_eq!(walk.next_attempt(), Step::Complete);
    }
}
