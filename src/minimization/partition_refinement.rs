use std::hash::Hash;

use tracing::trace;

use crate::{
    math::{first_seen_ids, Partition},
    transition_system::{StateIndex, TransitionSystem},
};

/// The result of [`moore_partition_refinement`], which is the coarsest stable partition together
/// with the number of refinement rounds that were run to obtain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    partition: Partition,
    rounds: usize,
}

impl Refinement {
    /// Gives a reference to the stable partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// The number of refinement rounds, zero if the initial partition was already stable.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Consumes `self` and returns the stable partition.
    pub fn into_partition(self) -> Partition {
        self.partition
    }
}

/// Computes the coarsest partition of the states of `ts` that is stable under the transitions and
/// refines the partition induced by `signature`. Two states end up in the same class if and only
/// if for every word, the states reached by it have the same signature.
///
/// We start by grouping the states by their signature. In every round, the signature of a state
/// is replaced by its current class id, followed by the class id of its successor on each symbol
/// in alphabet order. States keep sharing a class iff these extended signatures coincide. Since
/// the current class is part of the extended signature, every round refines the previous one, so
/// we can stop as soon as a round does not produce a new class. If every state already forms its
/// own class, no round is run at all.
///
/// Class ids are handed out in the order in which the states first exhibit a signature, so the
/// result only depends on the order of the states and not on any hashing.
pub fn moore_partition_refinement<T, S, F>(ts: &T, signature: F) -> Refinement
where
    T: TransitionSystem + ?Sized,
    S: Hash + Eq,
    F: Fn(StateIndex) -> S,
{
    let size = ts.size();
    let (mut class_ids, mut classes) = first_seen_ids(ts.state_indices().map(signature));
    trace!("initial partition has {classes} classes for {size} states");

    let mut rounds = 0;
    while classes < size {
        let (refined, refined_classes) = first_seen_ids(ts.state_indices().map(|q| {
            std::iter::once(Some(class_ids[q]))
                .chain(
                    ts.alphabet()
                        .universe()
                        .map(|a| ts.successor_index(q, a).map(|p| class_ids[p])),
                )
                .collect::<Vec<_>>()
        }));
        rounds += 1;
        trace!("round {rounds} produced {refined_classes} classes");

        debug_assert!(refined_classes >= classes);
        if refined_classes == classes {
            break;
        }
        class_ids = refined;
        classes = refined_classes;
    }

    Refinement {
        partition: Partition::from_class_ids(class_ids),
        rounds,
    }
}
