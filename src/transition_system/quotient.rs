use tracing::trace;

use crate::{math::Bijection, math::Partition, Color};

use super::{dts::DtsState, InvariantError, TransitionSystem, DTS};

/// Computes the quotient of `ts` by `partition`, which merges all states of a class into a
/// single state. We assume that the [`Partition`] is a congruence that respects colors, meaning
/// for two states `p`, `q` in the same class, they have the same state color and for every symbol
/// `a`, the edges on `a` have the same color and lead into the same class.
///
/// The quotient has one state per class, in the order of the class ids. Each state takes over the
/// label, the color and the edge colors of the class representative, which is the smallest state
/// of the class. The edge of class `X` on `a` leads to the class of the representative's
/// `a`-successor. In debug builds, the congruence assumption is checked.
///
/// Fails with [`InvariantError::PartitionMismatch`] if the partition does not cover precisely the
/// states of `ts`.
pub fn quotient<Q: Color, C: Color>(
    ts: &DTS<Q, C>,
    partition: &Partition,
) -> Result<DTS<Q, C>, InvariantError> {
    if partition.universe_size() != ts.size() {
        return Err(InvariantError::PartitionMismatch {
            expected: ts.size(),
            found: partition.universe_size(),
        });
    }

    let mut labels = Bijection::new();
    let mut states = Vec::with_capacity(partition.size());
    for (id, class) in partition.classes().enumerate() {
        let rep = class[0];
        debug_assert!(
            class.iter().all(|&q| respects_colors(ts, partition, rep, q)),
            "class {id} is not a congruence class"
        );

        let representative = &ts.states[rep];
        let edges = representative
            .edges
            .iter()
            .map(|(target, color)| {
                let class = partition
                    .class_of(*target)
                    .ok_or(InvariantError::PartitionMismatch {
                        expected: ts.size(),
                        found: partition.universe_size(),
                    })?;
                Ok((class, color.clone()))
            })
            .collect::<Result<Vec<_>, InvariantError>>()?;
        if let Some(label) = ts.state_label(rep) {
            labels.insert(label.to_string(), id);
        }
        states.push(DtsState::new(representative.color.clone(), edges));
        trace!(
            "class {id} is represented by {} and has {} members",
            ts.state_label(rep).unwrap_or("?"),
            class.len()
        );
    }

    Ok(DTS::from_parts(ts.alphabet().clone(), labels, states))
}

fn respects_colors<Q: Color, C: Color>(
    ts: &DTS<Q, C>,
    partition: &Partition,
    p: usize,
    q: usize,
) -> bool {
    ts.state_color(p) == ts.state_color(q)
        && ts.alphabet().universe().all(|a| {
            match (ts.edge(p, a), ts.edge(q, a)) {
                (Some(e), Some(f)) => {
                    e.color() == f.color() && partition.congruent(e.target(), f.target())
                }
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn wiki_ts() -> DTS<bool, Void> {
        TSBuilder::default()
            .with_colored_states([
                ("0", false),
                ("1", false),
                ("2", true),
                ("3", true),
                ("4", true),
                ("5", false),
            ])
            .with_edges([
                ("0", "a", "1"),
                ("0", "b", "2"),
                ("1", "a", "0"),
                ("1", "b", "3"),
                ("2", "a", "4"),
                ("2", "b", "5"),
                ("3", "a", "4"),
                ("3", "b", "5"),
                ("4", "a", "4"),
                ("4", "b", "5"),
                ("5", "a", "5"),
                ("5", "b", "5"),
            ])
            .into_dts()
            .unwrap()
    }

    #[test]
    fn quotient_test() {
        let ts = wiki_ts();
        let p = Partition::new([vec![0, 1], vec![5], vec![2, 3, 4]]);
        let q = quotient(&ts, &p).unwrap();

        assert_eq!(q.size(), 3);
        assert_eq!(q.state_labels().collect::<Vec<_>>(), vec!["0", "2", "5"]);
        for (i, p) in [0, 1, 1, 2, 2, 2].into_iter().enumerate() {
            let q_idx = i / 2;
            let sym = i % 2;
            assert_eq!(q.successor_index(q_idx, sym), Some(p));
        }
        assert_eq!(q.state_color(1), Some(&true));
    }

    #[test]
    fn mismatched_partitions_are_rejected() {
        let ts = wiki_ts();
        assert_eq!(
            quotient(&ts, &Partition::discrete(4)),
            Err(InvariantError::PartitionMismatch {
                expected: 6,
                found: 4
            })
        );
        assert_eq!(quotient(&ts, &Partition::discrete(6)).unwrap(), ts);
    }
}
