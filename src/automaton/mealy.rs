use std::fmt::Debug;

use crate::{alphabet::SymbolIndex, prelude::*};

/// Marker for the semantics of a Mealy machine, where every transition emits an output. Running
/// a word of length `n` therefore produces `n` outputs, one for each transition that is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MealySemantics;

/// A Mealy machine is a transition system where each transition has an output. Thus, the output
/// of running a Mealy machine on a word produces a sequence of outputs, one for each transition
/// that is taken. Note that since the empty word does not take any transitions, it does not
/// produce any output.
///
/// States themselves are uncolored, which is expressed by the [`Void`] state color.
pub type MealyMachine = Automaton<Void, String, MealySemantics>;

impl<C: Color> OutputSemantics<Void, C> for MealySemantics {
    /// The outputs that a state emits, one per symbol in the order of the alphabet.
    type Signature<'a> = Vec<Option<&'a C>>
    where
        Void: 'a,
        C: 'a;

    fn signature<'a>(ts: &'a DTS<Void, C>, state: StateIndex) -> Self::Signature<'a> {
        ts.alphabet()
            .universe()
            .map(|a| ts.edge_color(state, a))
            .collect()
    }
}

impl<C: Color> Automaton<Void, C, MealySemantics> {
    /// Runs the given word of symbol indices from the initial state and collects the output of
    /// every transition that is taken. Returns `None` if some symbol is not part of the alphabet.
    pub fn map_symbols<W>(&self, word: W) -> Option<Vec<&C>>
    where
        W: IntoIterator<Item = SymbolIndex>,
    {
        let mut state = self.initial();
        word.into_iter()
            .map(|a| {
                let edge = self.edge(state, a)?;
                state = edge.target();
                Some(edge.color())
            })
            .collect()
    }

    /// Like [`Self::map_symbols`], but the word is given by the labels of its symbols.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mm = MealyMachine::from_table(";p;q\na;q/0;p/1\n").unwrap();
    /// assert_eq!(mm.map(["a", "a", "a"]).unwrap(), vec!["0", "1", "0"]);
    /// assert!(mm.map(["b"]).is_none());
    /// ```
    pub fn map<'w, W>(&self, word: W) -> Option<Vec<&C>>
    where
        W: IntoIterator<Item = &'w str>,
    {
        let symbols = word
            .into_iter()
            .map(|sym| self.alphabet().index_of(sym))
            .collect::<Option<Vec<_>>>()?;
        self.map_symbols(symbols)
    }
}

impl<C: Color + std::fmt::Display> Debug for Automaton<Void, C, MealySemantics> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.render(
                |q, _| self.state_label(q).unwrap_or("?").to_string(),
                |e| format!(
                    "{}/{}",
                    self.state_label(e.target()).unwrap_or("?"),
                    e.color()
                ),
            )
        )
    }
}
