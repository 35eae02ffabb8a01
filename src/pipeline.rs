use std::{fmt::Debug, path::Path, str::FromStr};

use tracing::{debug, info};

use crate::{
    automaton::{Automaton, MealySemantics, MooreSemantics, OutputSemantics},
    error::{Error, Result},
    minimization::MinimizationStats,
    table::Tabular,
    Color, Void,
};

/// The two flavors of machines, which differ in where the output lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Outputs are emitted on transitions, see [`crate::MealyMachine`].
    Mealy,
    /// Outputs are emitted by states, see [`crate::MooreMachine`].
    Moore,
}

impl FromStr for Flavor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mealy" => Ok(Flavor::Mealy),
            "moore" => Ok(Flavor::Moore),
            other => Err(Error::UnknownFlavor(other.to_string())),
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::Mealy => write!(f, "mealy"),
            Flavor::Moore => write!(f, "moore"),
        }
    }
}

/// What a run of the pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// How the number of states evolved.
    pub stats: MinimizationStats,
    /// The minimized machine in the tabular format.
    pub table: String,
    /// The minimized machine rendered as a table for humans.
    pub pretty: String,
}

impl Outcome {
    fn new<M: Tabular + Debug>(minimized: &M, stats: MinimizationStats) -> Self {
        Self {
            stats,
            table: minimized.to_table(),
            pretty: format!("{minimized:?}"),
        }
    }
}

fn minimize_table<Q, C, S>(text: &str) -> Result<Outcome>
where
    Q: Color,
    C: Color,
    S: OutputSemantics<Q, C>,
    Automaton<Q, C, S>: Tabular + Debug,
{
    let (minimized, stats) = Automaton::<Q, C, S>::from_table(text)?.minimize_with_stats()?;
    Ok(Outcome::new(&minimized, stats))
}

fn minimize_path<Q, C, S>(input: &Path, output: &Path) -> Result<Outcome>
where
    Q: Color,
    C: Color,
    S: OutputSemantics<Q, C>,
    Automaton<Q, C, S>: Tabular + Debug,
{
    let (minimized, stats) = Automaton::<Q, C, S>::read_from(input)?.minimize_with_stats()?;
    minimized.write_to(output)?;
    Ok(Outcome::new(&minimized, stats))
}

/// Decodes a machine of the given flavor from `text`, minimizes it and encodes the result.
///
/// # Example
/// ```
/// use transducers::prelude::*;
/// use transducers::pipeline::minimize_text;
///
/// let outcome = minimize_text(Flavor::Moore, ";0;0\n;p;q\na;q;p\n").unwrap();
/// assert_eq!(outcome.table, ";0\n;p\na;p\n");
/// assert_eq!(outcome.stats.minimal, 1);
/// ```
pub fn minimize_text(flavor: Flavor, text: &str) -> Result<Outcome> {
    debug!("minimizing {flavor} machine");
    match flavor {
        Flavor::Mealy => minimize_table::<Void, String, MealySemantics>(text),
        Flavor::Moore => minimize_table::<String, Void, MooreSemantics>(text),
    }
}

/// Reads a machine of the given flavor from `input`, minimizes it and writes the result to
/// `output`. The output file is only created once the minimized machine has been computed, so
/// no file is written if the input cannot be decoded.
pub fn minimize_file<P, R>(flavor: Flavor, input: P, output: R) -> Result<Outcome>
where
    P: AsRef<Path>,
    R: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    debug!("minimizing {flavor} machine from {}", input.display());
    let outcome = match flavor {
        Flavor::Mealy => minimize_path::<Void, String, MealySemantics>(input, output),
        Flavor::Moore => minimize_path::<String, Void, MooreSemantics>(input, output),
    }?;
    info!(
        "minimized {flavor} machine from {} to {} states ({} reachable, {} rounds), written to {}",
        outcome.stats.original,
        outcome.stats.minimal,
        outcome.stats.reachable,
        outcome.stats.rounds,
        output.display()
    );
    Ok(outcome)
}
