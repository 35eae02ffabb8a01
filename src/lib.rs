//! Library for minimizing finite-state transducers in Rust.
//!
//! A transducer is a deterministic transition system (TS) whose runs emit outputs. The TS consists of a finite collection of states $Q$, an ordered input alphabet and, for each state and each input symbol, precisely one outgoing edge. Outputs are modelled as colors: a [`MealyMachine`] colors its edges (the output depends on the state and the input that is read), whereas a [`MooreMachine`] colors its states (the output only depends on the state that is reached). Both flavors share one storage type, [`transition_system::DTS`], where the absent color is [`Void`].
//!
//! Minimization proceeds in three steps, each of which lives in its own module:
//! - [`transition_system::Shrinkable::trim`] removes all states that are not reachable from the initial state.
//! - [`minimization::moore_partition_refinement`] groups states into classes of behaviorally indistinguishable states by iterated partition refinement. The flavor-specific part is only the immediate output signature of a state, which is supplied by [`automaton::OutputSemantics`].
//! - [`transition_system::quotient`] collapses every class into a single state, which keeps the label of the first state (in declaration order) of the class.
//!
//! Machines are read from and written to a semicolon-separated tabular text format through the [`table::Tabular`] trait, and [`pipeline`] composes everything into the decode, minimize, encode round trip used by the `tmin` binary.
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use transducers::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, SymbolIndex},
        automaton::{
            Automaton, MealyMachine, MealySemantics, MooreMachine, MooreSemantics,
            OutputSemantics,
        },
        error::{Error, Result},
        math,
        math::Partition,
        minimization::{moore_partition_refinement, MinimizationStats, Refinement},
        pipeline::{Flavor, Outcome},
        table::{FormatError, FormatErrorKind, Tabular},
        transition_system::{
            quotient, Edge, EdgeColor, InvariantError, Pointed, Shrinkable, StateColor,
            StateIndex, TSBuilder, TransitionSystem, DTS,
        },
        Color, Void,
    };

    #[cfg(feature = "graphviz")]
    pub use super::dot::Dottable;
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains the definition of input alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// This module defines transition systems, their construction and the operations that shrink or
/// collapse them.
pub mod transition_system;
pub use transition_system::{Pointed, TransitionSystem};

/// Contains the partition refinement algorithm that computes behavioral equivalence classes.
pub mod minimization;

/// Defines Mealy and Moore machines on top of a deterministic transition system.
pub mod automaton;
pub use automaton::{MealyMachine, MooreMachine};

/// Reading and writing machines in the semicolon-separated tabular format.
pub mod table;

/// Composes decoding, minimization and encoding for both machine flavors.
pub mod pipeline;

/// The error type that is returned at the boundary of the library.
pub mod error;
pub use error::{Error, Result};

/// Export of machines to the graphviz DOT language. This is feature gated behind `graphviz`.
#[cfg(feature = "graphviz")]
pub mod dot;

/// Implements the generation of random Mealy and Moore machines.
#[cfg(feature = "random")]
pub mod random;

use std::{fmt::Debug, hash::Hash};

/// A color is simply a type that can be used to color states or transitions. Outputs of
/// Mealy and Moore machines are colors.
pub trait Color: Clone + Eq + Hash + Debug {}

impl<T: Eq + Clone + Hash + Debug> Color for T {}

/// Represents the absence of a color. A [`MealyMachine`] has [`Void`] state colors as its output
/// lives on the edges, whereas a [`MooreMachine`] has [`Void`] edge colors as its output lives on
/// the states.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Void;

impl Debug for Void {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#")
    }
}
