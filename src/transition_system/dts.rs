use std::fmt::Debug;

use crate::{alphabet::SymbolIndex, math::Bijection, Alphabet, Color, Void};

use super::{Edge, Pointed, StateIndex, TransitionSystem};

/// A state of a [`DTS`] stores its color and the targets and colors of its outgoing edges. The
/// edge for symbol `a` sits at position `a`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct DtsState<Q, C> {
    pub(crate) color: Q,
    pub(crate) edges: Vec<(StateIndex, C)>,
}

impl<Q, C> DtsState<Q, C> {
    pub(crate) fn new(color: Q, edges: Vec<(StateIndex, C)>) -> Self {
        Self { color, edges }
    }
}

/// An implementation of a complete deterministic transition system with states colored by `Q`
/// and edges colored by `C`. States are stored in a vector in declaration order, together with
/// a bijection between their labels and their indices. The first state is the initial one.
///
/// Values of this type are obtained from a [`super::TSBuilder`], which ensures that every state
/// has precisely one outgoing edge for every symbol of the alphabet.
#[derive(Clone, PartialEq, Eq)]
pub struct DTS<Q = Void, C = Void> {
    pub(crate) alphabet: Alphabet,
    pub(crate) labels: Bijection<String, StateIndex>,
    pub(crate) states: Vec<DtsState<Q, C>>,
}

impl<Q, C> Default for DTS<Q, C> {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::empty(),
            labels: Bijection::new(),
            states: vec![],
        }
    }
}

impl<Q, C> DTS<Q, C> {
    /// Creates a transition system from its parts. The caller has to make sure that the labels
    /// cover `0..states.len()` and that all edges are complete and point to existing states.
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        labels: Bijection<String, StateIndex>,
        states: Vec<DtsState<Q, C>>,
    ) -> Self {
        debug_assert_eq!(labels.len(), states.len());
        debug_assert!(states.iter().all(|s| s.edges.len() == alphabet.size()
            && s.edges.iter().all(|(t, _)| *t < states.len())));
        Self {
            alphabet,
            labels,
            states,
        }
    }

    /// Decomposes `self` into its constituent parts.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Alphabet,
        Bijection<String, StateIndex>,
        Vec<DtsState<Q, C>>,
    ) {
        (self.alphabet, self.labels, self.states)
    }

    /// Iterates over the labels of all states in index order.
    pub fn state_labels(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.states.len()).filter_map(|q| self.labels.get_by_right(&q).map(String::as_str))
    }
}

impl<Q: Color, C: Color> TransitionSystem for DTS<Q, C> {
    type StateColor = Q;
    type EdgeColor = C;

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn size(&self) -> usize {
        self.states.len()
    }

    fn state_label(&self, state: StateIndex) -> Option<&str> {
        self.labels.get_by_right(&state).map(String::as_str)
    }

    fn index_of(&self, label: &str) -> Option<StateIndex> {
        self.labels.get_by_left(label).copied()
    }

    fn state_color(&self, state: StateIndex) -> Option<&Self::StateColor> {
        self.states.get(state).map(|s| &s.color)
    }

    fn edge(&self, state: StateIndex, symbol: SymbolIndex) -> Option<Edge<'_, Self::EdgeColor>> {
        let (target, color) = self.states.get(state)?.edges.get(symbol)?;
        Some(Edge::new(state, symbol, color, *target))
    }
}

impl<Q: Color, C: Color> Pointed for DTS<Q, C> {
    /// The initial state is always the first declared state.
    fn initial(&self) -> StateIndex {
        0
    }
}

impl<Q: Color, C: Color> Debug for DTS<Q, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Initial state {}", self.state_label(0).unwrap_or("-"))?;
        write!(
            f,
            "{}",
            self.build_transition_table(
                |q, color| format!("{}|{:?}", self.state_label(q).unwrap_or("?"), color),
                |e| format!(
                    "{}|{:?}",
                    self.state_label(e.target()).unwrap_or("?"),
                    e.color()
                ),
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn dts_debug_contains_table() {
        let ts: DTS = TSBuilder::without_colors()
            .with_symbols(["a"])
            .with_states(["only"])
            .with_edges([("only", "a", "only")])
            .into_dts()
            .unwrap();
        let repr = format!("{ts:?}");
        assert!(repr.starts_with("Initial state only"));
        assert!(repr.contains("only|#"));
        assert_eq!(ts.state_labels().collect::<Vec<_>>(), vec!["only"]);
        assert_eq!(ts.initial(), 0);
        assert!(ts.is_trim());
    }
}
