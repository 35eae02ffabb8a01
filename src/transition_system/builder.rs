use thiserror::Error;

use crate::{alphabet::SymbolIndex, math::Bijection, Alphabet, Color, Void};

use super::{dts::DtsState, StateIndex, DTS};

/// Violations of the structural invariants of a transition system. These are raised when a
/// transition system is constructed or shrunk and signal that the data it was built from is
/// inconsistent, rather than that some text was malformed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum InvariantError {
    /// The alphabet has no symbols.
    #[error("the input alphabet is empty")]
    EmptyAlphabet,
    /// A symbol was declared twice.
    #[error("input symbol `{0}` is declared more than once")]
    DuplicateSymbol(String),
    /// The state set is empty, so there is no initial state.
    #[error("the machine has no states")]
    NoStates,
    /// A state label was declared twice.
    #[error("state `{0}` is declared more than once")]
    DuplicateState(String),
    /// A state was declared without a color and no default color was set.
    #[error("state `{0}` has no output")]
    MissingStateColor(String),
    /// A transition mentions a symbol that is not part of the alphabet.
    #[error("a transition refers to the unknown input symbol `{0}`")]
    UnknownSymbol(String),
    /// A transition mentions a state that was never declared.
    #[error("a transition refers to the undeclared state `{0}`")]
    UnknownState(String),
    /// Two transitions leave the same state on the same symbol.
    #[error("state `{state}` has more than one transition on `{symbol}`")]
    Nondeterministic {
        /// Label of the offending state.
        state: String,
        /// Label of the symbol.
        symbol: String,
    },
    /// A state lacks the transition for some symbol.
    #[error("state `{state}` has no transition on `{symbol}`")]
    IncompleteState {
        /// Label of the offending state.
        state: String,
        /// Label of the symbol.
        symbol: String,
    },
    /// An operation would remove the initial state.
    #[error("the initial state cannot be removed")]
    MissingInitial,
    /// A partition does not match the transition system it is applied to.
    #[error("partition covers {found} states, but the machine has {expected}")]
    PartitionMismatch {
        /// Number of states in the transition system.
        expected: usize,
        /// Number of states covered by the partition.
        found: usize,
    },
}

/// Helper struct for the construction of complete deterministic transition systems. States are
/// given by their labels in declaration order, the first one becomes the initial state. Symbols
/// can be declared up front, any symbol that only appears on a transition is appended to the
/// alphabet in the order of appearance.
///
/// Nothing is checked until [`TSBuilder::into_dts`] is called, which verifies all invariants
/// and reports the first violation as an [`InvariantError`].
///
/// # Example
///
/// We want to create a Mealy-style transition system with two states `p` and `q` over the
/// alphabet `["a", "b"]`, where the edges are colored with outputs.
/// ```
/// use transducers::prelude::*;
///
/// let ts: DTS<Void, &str> = TSBuilder::without_state_colors()
///     .with_states(["p", "q"])
///     .with_transitions([
///         ("p", "a", "0", "q"),
///         ("p", "b", "1", "p"),
///         ("q", "a", "1", "q"),
///         ("q", "b", "0", "p"),
///     ])
///     .into_dts()
///     .unwrap();
/// assert_eq!(ts.size(), 2);
/// assert_eq!(ts.successor_index(0, 0), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct TSBuilder<Q = Void, C = Void> {
    symbols: Vec<String>,
    states: Vec<(String, Option<Q>)>,
    default: Option<Q>,
    edges: Vec<(String, String, C, String)>,
}

impl<Q, C> Default for TSBuilder<Q, C> {
    fn default() -> Self {
        Self {
            symbols: vec![],
            states: vec![],
            default: None,
            edges: vec![],
        }
    }
}

impl<C> TSBuilder<Void, C> {
    /// Creates an empty instance of `Self`, where states are uncolored (have color [`Void`]).
    pub fn without_state_colors() -> Self {
        Self::default().default_color(Void)
    }
}

impl TSBuilder<Void, Void> {
    /// Creates an empty instance of `Self`, where neither states nor edges have a color.
    pub fn without_colors() -> Self {
        Self::without_state_colors()
    }
}

impl<Q> TSBuilder<Q, Void> {
    /// Adds a list of uncolored edges, given as `(source, symbol, target)` triples.
    pub fn with_edges<S, I>(mut self, iter: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, S, S)>,
    {
        self.edges.extend(
            iter.into_iter()
                .map(|(p, a, q)| (p.into(), a.into(), Void, q.into())),
        );
        self
    }
}

impl<Q, C> TSBuilder<Q, C> {
    /// Sets the color for states that are declared without one.
    pub fn default_color(mut self, color: Q) -> Self {
        self.default = Some(color);
        self
    }

    /// Declares the given symbols, in order. Symbols that are already known are skipped.
    pub fn with_symbols<S, I>(mut self, symbols: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        for sym in symbols {
            let sym = sym.into();
            if !self.symbols.contains(&sym) {
                self.symbols.push(sym);
            }
        }
        self
    }

    /// Declares a single state with the given color.
    pub fn with_state<S: Into<String>>(mut self, label: S, color: Q) -> Self {
        self.states.push((label.into(), Some(color)));
        self
    }

    /// Declares states without a color, they receive the default color.
    pub fn with_states<S, I>(mut self, labels: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.states
            .extend(labels.into_iter().map(|label| (label.into(), None)));
        self
    }

    /// Declares states together with their colors, given as `(label, color)` pairs.
    pub fn with_colored_states<S, I>(mut self, states: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Q)>,
    {
        self.states.extend(
            states
                .into_iter()
                .map(|(label, color)| (label.into(), Some(color))),
        );
        self
    }

    /// Adds a list of transitions, given as `(source, symbol, color, target)` tuples. The
    /// transitions are added in the order in which they are given.
    pub fn with_transitions<S, I>(mut self, iter: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, S, C, S)>,
    {
        self.edges.extend(
            iter.into_iter()
                .map(|(p, a, c, q)| (p.into(), a.into(), c, q.into())),
        );
        self
    }
}

impl<Q: Color, C: Color> TSBuilder<Q, C> {
    /// Consumes the builder and produces a [`DTS`], verifying that
    /// - the alphabet is non-empty,
    /// - there is at least one state and no label is used twice,
    /// - every state has a color,
    /// - all transitions connect declared states, and
    /// - every state has precisely one transition per symbol.
    pub fn into_dts(self) -> Result<DTS<Q, C>, InvariantError> {
        let TSBuilder {
            mut symbols,
            states,
            default,
            edges,
        } = self;

        for (_, sym, _, _) in &edges {
            if !symbols.contains(sym) {
                symbols.push(sym.clone());
            }
        }
        let alphabet = Alphabet::try_from_symbols(symbols).map_err(InvariantError::DuplicateSymbol)?;
        if alphabet.is_empty() {
            return Err(InvariantError::EmptyAlphabet);
        }
        if states.is_empty() {
            return Err(InvariantError::NoStates);
        }

        let mut labels: Bijection<String, StateIndex> = Bijection::new();
        let mut colors = Vec::with_capacity(states.len());
        for (idx, (label, color)) in states.into_iter().enumerate() {
            let color = color
                .or_else(|| default.clone())
                .ok_or_else(|| InvariantError::MissingStateColor(label.clone()))?;
            if let Err((label, _)) = labels.insert_no_overwrite(label, idx) {
                return Err(InvariantError::DuplicateState(label));
            }
            colors.push(color);
        }

        let lookup = |label: &str| {
            labels
                .get_by_left(label)
                .copied()
                .ok_or_else(|| InvariantError::UnknownState(label.to_string()))
        };
        let mut table: Vec<Vec<Option<(StateIndex, C)>>> =
            vec![vec![None; alphabet.size()]; colors.len()];
        for (source, sym, color, target) in edges {
            let p = lookup(&source)?;
            let q = lookup(&target)?;
            let a: SymbolIndex = alphabet
                .index_of(&sym)
                .ok_or_else(|| InvariantError::UnknownSymbol(sym.clone()))?;
            let slot = &mut table[p][a];
            if slot.is_some() {
                return Err(InvariantError::Nondeterministic {
                    state: source,
                    symbol: sym,
                });
            }
            *slot = Some((q, color));
        }

        let mut dts_states = Vec::with_capacity(colors.len());
        for (p, (color, row)) in colors.into_iter().zip(table).enumerate() {
            let edges = row
                .into_iter()
                .enumerate()
                .map(|(a, edge)| {
                    edge.ok_or_else(|| InvariantError::IncompleteState {
                        state: labels.get_by_right(&p).cloned().unwrap_or_default(),
                        symbol: alphabet.symbol(a).unwrap_or_default().to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            dts_states.push(DtsState::new(color, edges));
        }

        Ok(DTS::from_parts(alphabet, labels, dts_states))
    }
}
