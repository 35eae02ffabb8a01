use itertools::Itertools;

use crate::{alphabet::SymbolIndex, Alphabet, Color};

mod edge;
pub use edge::{Edge, EdgesFrom};

mod dts;
pub(crate) use dts::DtsState;
pub use dts::DTS;

mod builder;
pub use builder::{InvariantError, TSBuilder};

/// Breadth-first exploration of the states that can be reached from some origin.
pub mod reachable;
use reachable::{MinimalRepresentatives, ReachableStateIndices};

mod shrinkable;
pub use shrinkable::Shrinkable;

mod quotient;
pub use quotient::quotient;

/// States of a transition system are addressed by their position in it.
pub type StateIndex = usize;

/// Type alias for extracting the state color in a [`TransitionSystem`].
pub type StateColor<X> = <X as TransitionSystem>::StateColor;
/// Type alias for extracting the edge color in a [`TransitionSystem`].
pub type EdgeColor<X> = <X as TransitionSystem>::EdgeColor;

/// This trait is implemented by deterministic transition systems over an [`Alphabet`]. States
/// are numbered `0..size` and carry a unique textual label as well as a color of type
/// [`TransitionSystem::StateColor`]. Every state has at most one outgoing edge per input symbol,
/// which is labeled with a color of type [`TransitionSystem::EdgeColor`].
pub trait TransitionSystem {
    /// The type of the colors on states.
    type StateColor: Color;
    /// The type of the colors on edges.
    type EdgeColor: Color;

    /// Returns a reference to the alphabet over which the transition system operates.
    fn alphabet(&self) -> &Alphabet;

    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns the label of the given state, if it exists.
    fn state_label(&self, state: StateIndex) -> Option<&str>;

    /// Looks up the index of the state with the given label.
    fn index_of(&self, label: &str) -> Option<StateIndex>;

    /// Returns a reference to the color of the given state, if it exists.
    fn state_color(&self, state: StateIndex) -> Option<&Self::StateColor>;

    /// Returns the edge that leaves `state` on `symbol`. Gives back `None` if the state does not
    /// exist or has no such edge.
    fn edge(&self, state: StateIndex, symbol: SymbolIndex) -> Option<Edge<'_, Self::EdgeColor>>;

    /// Returns an iterator over the indices of all states.
    fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Returns true if the transition system has a state with the given index.
    fn contains_state(&self, state: StateIndex) -> bool {
        state < self.size()
    }

    /// Iterates over the outgoing edges of `state` in the order of the alphabet. Returns `None`
    /// if the state does not exist.
    fn edges_from(&self, state: StateIndex) -> Option<EdgesFrom<'_, Self>>
    where
        Self: Sized,
    {
        if self.contains_state(state) {
            Some(EdgesFrom::new(self, state))
        } else {
            None
        }
    }

    /// Returns the index of the state that is reached from `state` on `symbol`.
    fn successor_index(&self, state: StateIndex, symbol: SymbolIndex) -> Option<StateIndex> {
        self.edge(state, symbol).map(|e| e.target())
    }

    /// Returns the color of the edge leaving `state` on `symbol`.
    fn edge_color(&self, state: StateIndex, symbol: SymbolIndex) -> Option<&Self::EdgeColor> {
        self.edge(state, symbol).map(|e| e.color())
    }

    /// Runs the given word of symbol indices from `origin` and returns the sequence of visited
    /// states, starting with `origin`. If some transition is missing, `None` is returned.
    fn run_from<W>(&self, origin: StateIndex, word: W) -> Option<Vec<StateIndex>>
    where
        W: IntoIterator<Item = SymbolIndex>,
    {
        if !self.contains_state(origin) {
            return None;
        }
        let mut visited = vec![origin];
        let mut current = origin;
        for sym in word {
            current = self.successor_index(current, sym)?;
            visited.push(current);
        }
        Some(visited)
    }

    /// Returns the index of the state that is reached when running `word` from `origin`.
    fn reached_state_index_from<W>(&self, origin: StateIndex, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = SymbolIndex>,
    {
        word.into_iter()
            .try_fold(origin, |q, sym| self.successor_index(q, sym))
            .filter(|&q| self.contains_state(q))
    }

    /// Returns an iterator over the indices of all states that are reachable from `origin`,
    /// in breadth-first order.
    fn reachable_state_indices_from(&self, origin: StateIndex) -> ReachableStateIndices<'_, Self>
    where
        Self: Sized,
    {
        ReachableStateIndices::new(self, origin)
    }

    /// Returns an iterator over pairs of a length-lexicographically minimal access word and
    /// the state that it reaches from `origin`.
    fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_, Self>
    where
        Self: Sized,
    {
        MinimalRepresentatives::new(self, origin)
    }

    /// Returns a string representation of the transition table of the transition system.
    fn build_transition_table<'a, SD, ED>(&'a self, state_decorator: SD, edge_decorator: ED) -> String
    where
        SD: Fn(StateIndex, &'a Self::StateColor) -> String,
        ED: Fn(Edge<'a, Self::EdgeColor>) -> String,
    {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet().symbols().map(|s| s.to_string())),
        );
        for id in self.state_indices() {
            let Some(color) = self.state_color(id) else {
                continue;
            };
            let mut row = vec![state_decorator(id, color)];
            for sym in self.alphabet().universe() {
                if let Some(edge) = self.edge(id, sym) {
                    row.push(edge_decorator(edge));
                } else {
                    row.push("-".to_string());
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Returns the labels of all states joined into a set-like string, mostly useful for logging.
    fn show_states(&self) -> String {
        format!(
            "{{{}}}",
            self.state_indices()
                .filter_map(|q| self.state_label(q))
                .join(", ")
        )
    }
}

/// A pointed transition system has a designated initial state.
pub trait Pointed: TransitionSystem {
    /// Returns the index of the initial state.
    fn initial(&self) -> StateIndex;

    /// Returns an iterator over the indices of all states that are reachable from the initial
    /// state.
    fn reachable_state_indices(&self) -> ReachableStateIndices<'_, Self>
    where
        Self: Sized,
    {
        self.reachable_state_indices_from(self.initial())
    }

    /// Returns the minimal representatives of all states that are reachable from the initial
    /// state.
    fn minimal_representatives(&self) -> MinimalRepresentatives<'_, Self>
    where
        Self: Sized,
    {
        self.minimal_representatives_from(self.initial())
    }

    /// Returns true if every state is reachable from the initial state.
    fn is_trim(&self) -> bool
    where
        Self: Sized,
    {
        self.reachable_state_indices().count() == self.size()
    }
}
