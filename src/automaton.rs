use std::{hash::Hash, marker::PhantomData};

use owo_colors::OwoColorize;

use crate::{
    alphabet::SymbolIndex,
    transition_system::{Edge, InvariantError, Shrinkable, StateIndex, TSBuilder, DTS},
    Alphabet, Color, Pointed, TransitionSystem, Void,
};

mod mealy;
pub use mealy::{MealyMachine, MealySemantics};

mod moore;
pub use moore::{MooreMachine, MooreSemantics};

/// Determines where the output of a machine lives and therefore which immediate output a single
/// state exhibits. Two states with different signatures can never be equivalent, which makes the
/// signature the seed of the partition refinement.
///
/// For a [`MooreMachine`] the signature is the output of the state itself, for a [`MealyMachine`]
/// it is the vector of outputs that the state produces on each symbol of the alphabet.
pub trait OutputSemantics<Q: Color, C: Color> {
    /// The immediate output signature of a state, borrowed from the underlying transition system.
    type Signature<'a>: Hash + Eq
    where
        Q: 'a,
        C: 'a;

    /// Computes the signature of `state` in `ts`.
    fn signature<'a>(ts: &'a DTS<Q, C>, state: StateIndex) -> Self::Signature<'a>;
}

/// An automaton consists of a deterministic transition system and a semantics that determines
/// how runs produce outputs. The semantics `S` is a pure marker type, the machines defined in this
/// crate are obtained by fixing the parameters, see [`MealyMachine`] and [`MooreMachine`].
///
/// The initial state is always the first state of the transition system.
pub struct Automaton<Q = Void, C = Void, S = MooreSemantics> {
    ts: DTS<Q, C>,
    semantics: PhantomData<S>,
}

impl<Q: Clone, C: Clone, S> Clone for Automaton<Q, C, S> {
    fn clone(&self) -> Self {
        Self {
            ts: self.ts.clone(),
            semantics: PhantomData,
        }
    }
}

impl<Q: PartialEq, C: PartialEq, S> PartialEq for Automaton<Q, C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.ts == other.ts
    }
}

impl<Q: Eq, C: Eq, S> Eq for Automaton<Q, C, S> {}

impl<Q: Color, C: Color, S> Automaton<Q, C, S> {
    /// Instantiates a new [`TSBuilder`] for the state and edge color of `self`.
    pub fn builder() -> TSBuilder<Q, C> {
        TSBuilder::default()
    }

    /// Wraps the given transition system, whose first state becomes the initial state.
    pub fn from_ts(ts: DTS<Q, C>) -> Self {
        Self {
            ts,
            semantics: PhantomData,
        }
    }

    /// Returns a reference to the underlying transition system.
    pub fn ts(&self) -> &DTS<Q, C> {
        &self.ts
    }

    /// Consumes `self` and returns the underlying transition system.
    pub fn into_ts(self) -> DTS<Q, C> {
        self.ts
    }

    /// Renders the transition table, where the initial state is highlighted. The decorators
    /// turn a state and an edge into the content of the respective cell.
    pub(crate) fn render<'a, SD, ED>(&'a self, state_decorator: SD, edge_decorator: ED) -> String
    where
        SD: Fn(StateIndex, &'a Q) -> String,
        ED: Fn(Edge<'a, C>) -> String,
    {
        let initial = self.initial();
        self.build_transition_table(
            |q, color| {
                let cell = state_decorator(q, color);
                if q == initial {
                    cell.bold().to_string()
                } else {
                    cell
                }
            },
            edge_decorator,
        )
    }
}

impl<Q: Color, C: Color, S> TransitionSystem for Automaton<Q, C, S> {
    type StateColor = Q;
    type EdgeColor = C;

    fn alphabet(&self) -> &Alphabet {
        self.ts.alphabet()
    }

    fn size(&self) -> usize {
        self.ts.size()
    }

    fn state_label(&self, state: StateIndex) -> Option<&str> {
        self.ts.state_label(state)
    }

    fn index_of(&self, label: &str) -> Option<StateIndex> {
        self.ts.index_of(label)
    }

    fn state_color(&self, state: StateIndex) -> Option<&Q> {
        self.ts.state_color(state)
    }

    fn edge(&self, state: StateIndex, symbol: SymbolIndex) -> Option<Edge<'_, C>> {
        self.ts.edge(state, symbol)
    }
}

impl<Q: Color, C: Color, S> Pointed for Automaton<Q, C, S> {
    fn initial(&self) -> StateIndex {
        self.ts.initial()
    }
}

impl<Q: Color, C: Color, S> Shrinkable for Automaton<Q, C, S> {
    fn retain_states<F>(&mut self, keep: F) -> Result<usize, InvariantError>
    where
        F: FnMut(StateIndex) -> bool,
    {
        self.ts.retain_states(keep)
    }
}

impl<Q: Color, C: Color, S> From<DTS<Q, C>> for Automaton<Q, C, S> {
    fn from(ts: DTS<Q, C>) -> Self {
        Self::from_ts(ts)
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::MEALY_MACHINE};

    #[test]
    fn automaton_delegates_to_ts() {
        let mm = MEALY_MACHINE.clone();
        assert_eq!(mm.size(), 3);
        assert_eq!(mm.initial(), 0);
        assert_eq!(mm.state_label(mm.initial()), Some("s0"));
        assert_eq!(mm.alphabet().symbols().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mm.edge_color(1, 0).map(String::as_str), Some("y"));

        let ts = mm.clone().into_ts();
        assert_eq!(MealyMachine::from(ts), mm);
    }
}
