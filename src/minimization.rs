use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, OutputSemantics},
    transition_system::{quotient, InvariantError, Shrinkable},
    Color, Pointed, TransitionSystem,
};

pub(crate) mod partition_refinement;
pub use partition_refinement::{moore_partition_refinement, Refinement};

/// Records how the size of a machine evolved while it was minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinimizationStats {
    /// Number of states before anything was removed.
    pub original: usize,
    /// Number of states that are reachable from the initial state.
    pub reachable: usize,
    /// Number of states of the minimized machine.
    pub minimal: usize,
    /// Number of refinement rounds that were necessary to reach the fixpoint.
    pub rounds: usize,
}

impl<Q: Color, C: Color, S: OutputSemantics<Q, C>> Automaton<Q, C, S> {
    /// Returns the unique minimal machine that is equivalent to `self`. This means for every
    /// finite word, the outputs of `self` and the outputs of the returned machine are the same.
    ///
    /// Unreachable states are removed first, afterwards the remaining states are grouped by
    /// [`moore_partition_refinement`] and every class is collapsed into its first member.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mm = MealyMachine::from_table(";p;q;r\na;q/0;r/0;p/0\n").unwrap();
    /// let min = mm.minimize().unwrap();
    /// assert_eq!(min.size(), 1);
    /// assert_eq!(min.to_table(), ";p\na;p/0\n");
    /// ```
    pub fn minimize(self) -> Result<Self, InvariantError> {
        self.minimize_with_stats().map(|(min, _)| min)
    }

    /// Minimizes `self` like [`Self::minimize`] and additionally reports the number of states
    /// after each stage.
    pub fn minimize_with_stats(mut self) -> Result<(Self, MinimizationStats), InvariantError> {
        let original = self.size();
        let removed = self.trim()?;
        let reachable = self.size();
        debug!("pruned {removed} of {original} states, {reachable} remain");
        debug_assert!(self.is_trim());

        let ts = self.ts();
        let refinement = moore_partition_refinement(ts, |q| S::signature(ts, q));
        debug!(
            "refinement stabilized with {} classes after {} rounds",
            refinement.partition().size(),
            refinement.rounds()
        );

        let minimized = Self::from_ts(quotient(ts, refinement.partition())?);
        trace!(
            "minimized transition table\n{}",
            minimized.build_transition_table(
                |q, c| format!("{}|{c:?}", minimized.state_label(q).unwrap_or("?")),
                |e| format!(
                    "{}|{:?}",
                    minimized.state_label(e.target()).unwrap_or("?"),
                    e.color()
                )
            )
        );

        let stats = MinimizationStats {
            original,
            reachable,
            minimal: minimized.size(),
            rounds: refinement.rounds(),
        };
        debug!("minimized {original} states to {}", stats.minimal);
        Ok((minimized, stats))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{
            labels, words_up_to, MEALY_COLLAPSING, MEALY_MERGING, MEALY_MINIMAL, MOORE_FIXPOINT,
            MOORE_MERGING,
        },
    };

    #[test_log::test]
    fn mealy_collapses_to_single_state() {
        let mm = MealyMachine::from_table(MEALY_COLLAPSING).unwrap();
        let (min, stats) = mm.minimize_with_stats().unwrap();
        assert_eq!(min.to_table(), ";A\nx;A/0\ny;A/1\n");
        assert_eq!(
            stats,
            MinimizationStats {
                original: 5,
                reachable: 4,
                minimal: 1,
                rounds: 1
            }
        );
    }

    #[test_log::test]
    fn mealy_merges_states_with_equal_signatures() {
        let mm = MealyMachine::from_table(MEALY_MERGING).unwrap();
        let min = mm.clone().minimize().unwrap();
        assert_eq!(min.to_table(), ";s0;s1\na;s1/x;s1/y\nb;s0/z;s0/z\n");

        for word in words_up_to(2, 4) {
            let word = labels(mm.alphabet(), &word);
            assert_eq!(mm.map(word.clone()), min.map(word));
        }
    }

    #[test]
    fn mealy_minimal_machine_is_untouched() {
        let mm = MealyMachine::from_table(MEALY_MINIMAL).unwrap();
        let (min, stats) = mm.clone().minimize_with_stats().unwrap();
        assert_eq!(min, mm);
        assert_eq!(stats.rounds, 2);
        assert_eq!(stats.minimal, 4);
    }

    #[test_log::test]
    fn moore_merges_and_prunes() {
        let mm = MooreMachine::from_table(MOORE_MERGING).unwrap();
        let (min, stats) = mm.clone().minimize_with_stats().unwrap();
        assert_eq!(min.to_table(), ";o0;o1;o0\n;q0;q1;q3\na;q1;q1;q0\nb;q3;q3;q3\n");
        assert_eq!((stats.original, stats.reachable, stats.minimal), (5, 4, 3));

        for word in words_up_to(2, 5) {
            let word = labels(mm.alphabet(), &word);
            assert_eq!(mm.map(word.clone()), min.map(word));
        }
    }

    #[test]
    fn moore_fixpoint_is_not_single_pass() {
        let mm = MooreMachine::from_table(MOORE_FIXPOINT).unwrap();
        let (min, stats) = mm.clone().minimize_with_stats().unwrap();
        assert_eq!(min.size(), 3);
        assert_eq!(min, mm);
        assert_eq!(stats.rounds, 1);
        assert_ne!(min.map(["x", "x"]), min.map(["y", "x"]));
    }

    #[test]
    fn single_state_needs_no_rounds() {
        let mm = MooreMachine::from_table(";out\n;only\na;only\nb;only\n").unwrap();
        let (min, stats) = mm.clone().minimize_with_stats().unwrap();
        assert_eq!(stats.rounds, 0);
        assert_eq!(min, mm);
    }

    #[test]
    fn minimization_is_idempotent() {
        for table in [MEALY_COLLAPSING, MEALY_MERGING, MEALY_MINIMAL] {
            let once = MealyMachine::from_table(table).unwrap().minimize().unwrap();
            let twice = once.clone().minimize().unwrap();
            assert_eq!(once, twice);
        }
        for table in [MOORE_MERGING, MOORE_FIXPOINT] {
            let once = MooreMachine::from_table(table).unwrap().minimize().unwrap();
            let (twice, stats) = once.clone().minimize_with_stats().unwrap();
            assert_eq!(once, twice);
            assert_eq!(stats.original, stats.minimal);
        }
    }

    #[cfg(feature = "random")]
    mod random {
        use crate::{
            prelude::*,
            random::{random_mealy, random_moore},
            tests::words_up_to,
        };

        #[test]
        fn random_mealy_machines_keep_their_behavior() {
            fastrand::seed(0x6d65_616c);
            for size in 1..=8 {
                let mm = random_mealy(2, size, 2);
                let min = mm.clone().minimize().unwrap();
                assert!(min.size() <= mm.size());
                assert!(min.is_trim());
                for word in words_up_to(2, size) {
                    assert_eq!(mm.map_symbols(word.clone()), min.map_symbols(word));
                }
                assert_eq!(min.clone().minimize().unwrap(), min);
            }
        }

        #[test]
        fn random_moore_machines_keep_their_behavior() {
            fastrand::seed(0x6d6f_6f72);
            for size in 1..=8 {
                let mm = random_moore(3, size, 2);
                let min = mm.clone().minimize().unwrap();
                assert!(min.is_trim());
                for word in words_up_to(3, size) {
                    assert_eq!(mm.map_symbols(word.clone()), min.map_symbols(word));
                }
                assert_eq!(min.clone().minimize().unwrap().size(), min.size());
            }
        }

        #[test]
        fn distinct_moore_classes_are_distinguishable() {
            fastrand::seed(0x6d6f_6f72_6532);
            for size in 1..=6 {
                let mut mm = random_moore(2, size, 2);
                mm.trim().unwrap();
                let ts = mm.ts();
                let refinement =
                    moore_partition_refinement(ts, |q| MooreSemantics::signature(ts, q));
                let partition = refinement.partition();
                let words = words_up_to(2, mm.size());
                for p in mm.state_indices() {
                    for q in mm.state_indices() {
                        let outputs = |origin: StateIndex, w: &Vec<SymbolIndex>| {
                            mm.reached_state_index_from(origin, w.iter().copied())
                                .and_then(|r| mm.state_color(r))
                        };
                        let separated = words.iter().any(|w| outputs(p, w) != outputs(q, w));
                        assert_eq!(separated, !partition.congruent(p, q));
                    }
                }
            }
        }

        #[test]
        fn distinct_mealy_classes_are_distinguishable() {
            fastrand::seed(0x6d65_616c_7932);
            for size in 1..=6 {
                let mut mm = random_mealy(2, size, 2);
                mm.trim().unwrap();
                let ts = mm.ts();
                let refinement =
                    moore_partition_refinement(ts, |q| MealySemantics::signature(ts, q));
                let partition = refinement.partition();
                let words = words_up_to(2, mm.size());
                for p in mm.state_indices() {
                    for q in mm.state_indices() {
                        let last_output = |origin: StateIndex, w: &Vec<SymbolIndex>| {
                            let (&last, prefix) = w.split_last()?;
                            let r = mm.reached_state_index_from(origin, prefix.iter().copied())?;
                            mm.edge_color(r, last)
                        };
                        let separated = words
                            .iter()
                            .any(|w| last_output(p, w) != last_output(q, w));
                        assert_eq!(separated, !partition.congruent(p, q));
                    }
                }
            }
        }
    }
}
