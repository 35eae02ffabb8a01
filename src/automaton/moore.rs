use std::fmt::Debug;

use crate::{alphabet::SymbolIndex, prelude::*};

/// Marker for the semantics of a Moore machine, where every state has an output. Running a word
/// of length `n` visits `n + 1` states and thus produces `n + 1` outputs, the first of which is
/// the output of the initial state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MooreSemantics;

/// Moore machines are transition systems where each state has an output, which only depends on
/// the state and not on the symbol that was read to reach it. Edges are uncolored, which is
/// expressed by the [`Void`] edge color.
pub type MooreMachine = Automaton<String, Void, MooreSemantics>;

impl<Q: Color> OutputSemantics<Q, Void> for MooreSemantics {
    type Signature<'a> = Option<&'a Q>
    where
        Q: 'a,
        Void: 'a;

    fn signature<'a>(ts: &'a DTS<Q, Void>, state: StateIndex) -> Self::Signature<'a> {
        ts.state_color(state)
    }
}

impl<Q: Color> Automaton<Q, Void, MooreSemantics> {
    /// Runs the given word of symbol indices from the initial state and collects the output of
    /// every visited state, including the initial one. Returns `None` if some symbol is not part
    /// of the alphabet.
    pub fn map_symbols<W>(&self, word: W) -> Option<Vec<&Q>>
    where
        W: IntoIterator<Item = SymbolIndex>,
    {
        self.run_from(self.initial(), word)?
            .into_iter()
            .map(|q| self.state_color(q))
            .collect()
    }

    /// Like [`Self::map_symbols`], but the word is given by the labels of its symbols.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mm = MooreMachine::from_table(";0;1\n;p;q\na;q;p\n").unwrap();
    /// assert_eq!(mm.map(["a", "a"]).unwrap(), vec!["0", "1", "0"]);
    /// ```
    pub fn map<'w, W>(&self, word: W) -> Option<Vec<&Q>>
    where
        W: IntoIterator<Item = &'w str>,
    {
        let symbols = word
            .into_iter()
            .map(|sym| self.alphabet().index_of(sym))
            .collect::<Option<Vec<_>>>()?;
        self.map_symbols(symbols)
    }

    /// Returns the output of the state that is reached by `word`.
    pub fn output_of<W>(&self, word: W) -> Option<&Q>
    where
        W: IntoIterator<Item = SymbolIndex>,
    {
        self.reached_state_index_from(self.initial(), word)
            .and_then(|q| self.state_color(q))
    }
}

impl<Q: Color + std::fmt::Display> Debug for Automaton<Q, Void, MooreSemantics> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.render(
                |q, color| format!("{}|{}", self.state_label(q).unwrap_or("?"), color),
                |e| self.state_label(e.target()).unwrap_or("?").to_string(),
            )
        )
    }
}
