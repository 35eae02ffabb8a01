use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::{
    automaton::{MealyMachine, MooreMachine},
    error::{Error, Result},
    TransitionSystem,
};

mod input;
pub use input::{parse_mealy, parse_moore};

mod output;
pub use output::{write_mealy, write_moore};

/// Separates the fields of a record.
pub const FIELD_SEPARATOR: char = ';';
/// Separates the target state from the output in a cell of a Mealy table.
pub const OUTPUT_SEPARATOR: char = '/';

/// A malformed record in a table, together with the (1-based) line on which it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    /// The line of the offending record.
    pub line: usize,
    /// What is wrong with the record.
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

/// The different ways in which a table can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    /// The text does not contain a single record.
    #[error("the header row is missing")]
    MissingHeader,
    /// A header row lists no entries after the leading empty field.
    #[error("the header row is empty")]
    EmptyHeader,
    /// A header row does not start with an empty field.
    #[error("header rows start with an empty field, found `{0}`")]
    LeadingField(String),
    /// A Moore table lacks the row of state labels that follows the outputs.
    #[error("the row of states is missing")]
    MissingStateRow,
    /// A Moore table lists a different number of outputs than states.
    #[error("{outputs} outputs are given for {states} states")]
    OutputCountMismatch {
        /// Number of outputs.
        outputs: usize,
        /// Number of states.
        states: usize,
    },
    /// A Moore table has an output that is empty.
    #[error("output {0} is empty")]
    EmptyOutput(usize),
    /// A state label occurs more than once in the header.
    #[error("state `{0}` is declared more than once")]
    DuplicateState(String),
    /// A state label in the header is empty.
    #[error("state {0} has an empty label")]
    EmptyStateLabel(usize),
    /// There are no transition rows at all.
    #[error("no input rows follow the header")]
    MissingInputs,
    /// A transition row does not start with an input symbol.
    #[error("the input symbol is empty")]
    EmptyInputSymbol,
    /// Two transition rows are labeled with the same input symbol.
    #[error("input `{0}` has more than one row")]
    DuplicateInput(String),
    /// A transition row does not have one cell per state.
    #[error("expected {expected} transition cells but found {found}")]
    CellCount {
        /// Number of declared states.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },
    /// A cell of a Mealy table lacks the separator between target and output.
    #[error("cell `{0}` is not of the form `state/output`")]
    MissingSeparator(String),
    /// A transition leads to a state that is not declared in the header.
    #[error("transition to undeclared state `{0}`")]
    UnknownState(String),
}

/// Implemented by machines that can be read from and written to the semicolon-separated tabular
/// format. Decoding and encoding are inverse to each other for tables whose states are listed
/// in index order, i.e. `M::from_table(&m.to_table()) == Ok(m)`.
pub trait Tabular: Sized {
    /// Decodes a machine from the given text.
    fn from_table(text: &str) -> Result<Self>;

    /// Encodes `self` as text. Every record, including the last one, is terminated by `\n`.
    fn to_table(&self) -> String;

    /// Reads and decodes the machine stored in the file at `path`.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        debug!("read {} bytes from {}", text.len(), path.display());
        Self::from_table(&text)
    }

    /// Encodes `self` and writes it to the file at `path`. The text is rendered completely before
    /// the file is created, so nothing is written if encoding is not possible.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_table();
        std::fs::write(path, &text).map_err(|source| Error::io(path, source))?;
        debug!("wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }
}

impl Tabular for MealyMachine {
    fn from_table(text: &str) -> Result<Self> {
        let mm = parse_mealy(text)?;
        debug!(
            "decoded Mealy machine with {} states over {} symbols",
            mm.size(),
            mm.alphabet().size()
        );
        Ok(mm)
    }

    fn to_table(&self) -> String {
        write_mealy(self)
    }
}

impl Tabular for MooreMachine {
    fn from_table(text: &str) -> Result<Self> {
        let mm = parse_moore(text)?;
        debug!(
            "decoded Moore machine with {} states over {} symbols",
            mm.size(),
            mm.alphabet().size()
        );
        Ok(mm)
    }

    fn to_table(&self) -> String {
        write_moore(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{MEALY_COLLAPSING, MEALY_MERGING, MEALY_MINIMAL, MOORE_FIXPOINT, MOORE_MERGING},
    };

    #[test]
    fn canonical_tables_round_trip() {
        for table in [MEALY_COLLAPSING, MEALY_MERGING, MEALY_MINIMAL] {
            assert_eq!(MealyMachine::from_table(table).unwrap().to_table(), table);
        }
        for table in [MOORE_MERGING, MOORE_FIXPOINT] {
            assert_eq!(MooreMachine::from_table(table).unwrap().to_table(), table);
        }
    }

    #[test]
    fn files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.csv");
        let mm = MooreMachine::from_table(MOORE_MERGING).unwrap();
        mm.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), MOORE_MERGING);
        assert_eq!(MooreMachine::read_from(&path).unwrap(), mm);
    }

    #[test]
    fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        match MealyMachine::read_from(&path) {
            Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected an io error, got {other:?}"),
        }

        let mm = MealyMachine::from_table(MEALY_MERGING).unwrap();
        let nested = dir.path().join("missing").join("out.csv");
        assert!(matches!(mm.write_to(&nested), Err(Error::Io { .. })));
    }

    #[test]
    fn format_errors_display_their_line() {
        let err = FormatError::new(3, FormatErrorKind::MissingSeparator("q0".into()));
        assert_eq!(
            err.to_string(),
            "line 3: cell `q0` is not of the form `state/output`"
        );
    }
}
