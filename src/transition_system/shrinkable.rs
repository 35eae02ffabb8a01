use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{math::Bijection, Color};

use super::{dts::DtsState, InvariantError, Pointed, StateIndex, TransitionSystem, DTS};

/// Encapsulates the ability to remove states from a transition system.
pub trait Shrinkable: Pointed {
    /// Removes every state for which `keep` returns false, together with its outgoing edges.
    /// The remaining states keep their relative order and are renumbered densely. Returns the
    /// number of removed states.
    ///
    /// Fails with [`InvariantError::MissingInitial`] if the initial state would be removed and
    /// with [`InvariantError::IncompleteState`] if a remaining state has an edge into a removed
    /// state, as it would be left without a complete row. In both cases `self` is unchanged.
    fn retain_states<F>(&mut self, keep: F) -> Result<usize, InvariantError>
    where
        F: FnMut(StateIndex) -> bool;

    /// Removes the given states, see [`Shrinkable::retain_states`] for the details.
    fn remove_states<I>(&mut self, states: I) -> Result<usize, InvariantError>
    where
        I: IntoIterator<Item = StateIndex>,
        Self: Sized,
    {
        let remove: BitSet = states.into_iter().collect();
        self.retain_states(|q| !remove.contains(q))
    }

    /// Removes all states that are not reachable from the initial state and returns how many
    /// were removed. Running this twice has the same effect as running it once.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mut ts: DTS = TSBuilder::without_colors()
    ///     .with_states(["p", "q"])
    ///     .with_edges([("p", "a", "p"), ("q", "a", "p")])
    ///     .into_dts()
    ///     .unwrap();
    /// assert_eq!(ts.trim(), Ok(1));
    /// assert_eq!(ts.size(), 1);
    /// assert_eq!(ts.trim(), Ok(0));
    /// ```
    fn trim(&mut self) -> Result<usize, InvariantError>
    where
        Self: Sized,
    {
        let reachable: BitSet = self.reachable_state_indices().collect();
        trace!(
            "{} of {} states are reachable",
            reachable.len(),
            self.size()
        );
        let removed = self.retain_states(|q| reachable.contains(q))?;
        if removed > 0 {
            debug!("removed {removed} unreachable states");
        }
        Ok(removed)
    }
}

impl<Q: Color, C: Color> Shrinkable for DTS<Q, C> {
    fn retain_states<F>(&mut self, mut keep: F) -> Result<usize, InvariantError>
    where
        F: FnMut(StateIndex) -> bool,
    {
        let renumbering: Vec<Option<StateIndex>> = {
            let mut next = 0;
            self.state_indices()
                .map(|q| {
                    keep(q).then(|| {
                        next += 1;
                        next - 1
                    })
                })
                .collect()
        };
        if renumbering.get(self.initial()).copied().flatten().is_none() {
            return Err(InvariantError::MissingInitial);
        }
        let removed = renumbering.iter().filter(|r| r.is_none()).count();
        if removed == 0 {
            return Ok(0);
        }

        for (q, state) in self.states.iter().enumerate() {
            if renumbering[q].is_none() {
                continue;
            }
            if let Some(a) = state
                .edges
                .iter()
                .position(|(target, _)| renumbering[*target].is_none())
            {
                return Err(InvariantError::IncompleteState {
                    state: self.state_label(q).unwrap_or_default().to_string(),
                    symbol: self.alphabet.symbol(a).unwrap_or_default().to_string(),
                });
            }
        }

        let (alphabet, labels, states) = std::mem::take(self).into_parts();
        let mut kept_labels = Bijection::new();
        let mut kept_states = Vec::with_capacity(states.len() - removed);
        for (q, state) in states.into_iter().enumerate() {
            let Some(new_index) = renumbering[q] else {
                continue;
            };
            if let Some(label) = labels.get_by_right(&q) {
                kept_labels.insert(label.clone(), new_index);
            }
            let edges = state
                .edges
                .into_iter()
                .filter_map(|(target, color)| renumbering[target].map(|t| (t, color)))
                .collect();
            kept_states.push(DtsState::new(state.color, edges));
        }
        *self = DTS::from_parts(alphabet, kept_labels, kept_states);
        Ok(removed)
    }
}
