use crate::alphabet::SymbolIndex;

use super::{StateIndex, TransitionSystem};

/// A reference to an edge of a deterministic transition system. It consists of the source and
/// target state, the symbol on which the edge is taken and a reference to its color.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Edge<'a, C> {
    source: StateIndex,
    symbol: SymbolIndex,
    color: &'a C,
    target: StateIndex,
}

impl<'a, C> Clone for Edge<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, C> Copy for Edge<'a, C> {}

impl<'a, C> Edge<'a, C> {
    /// Creates a new edge reference from the given parts.
    pub fn new(source: StateIndex, symbol: SymbolIndex, color: &'a C, target: StateIndex) -> Self {
        Self {
            source,
            symbol,
            color,
            target,
        }
    }

    /// Returns the state in which the edge originates.
    pub fn source(&self) -> StateIndex {
        self.source
    }

    /// Returns the symbol on which the edge is taken.
    pub fn symbol(&self) -> SymbolIndex {
        self.symbol
    }

    /// Returns the color of the edge, which lives as long as the transition system.
    pub fn color(&self) -> &'a C {
        self.color
    }

    /// Returns the state that the edge leads to.
    pub fn target(&self) -> StateIndex {
        self.target
    }
}

/// Iterates over the edges leaving a single state, one for each symbol of the alphabet that
/// the state has a transition on.
#[derive(Clone)]
pub struct EdgesFrom<'a, Ts> {
    ts: &'a Ts,
    source: StateIndex,
    symbols: std::ops::Range<SymbolIndex>,
}

impl<'a, Ts: TransitionSystem> EdgesFrom<'a, Ts> {
    /// Creates a new iterator over the edges leaving `source`.
    pub fn new(ts: &'a Ts, source: StateIndex) -> Self {
        Self {
            ts,
            source,
            symbols: ts.alphabet().universe(),
        }
    }
}

impl<'a, Ts: TransitionSystem> Iterator for EdgesFrom<'a, Ts> {
    type Item = Edge<'a, Ts::EdgeColor>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let ts = self.ts;
        self.symbols.find_map(|sym| ts.edge(source, sym))
    }
}
