use tracing::trace;

use crate::{
    automaton::{MealyMachine, MooreMachine},
    error::Result,
    math::Set,
    transition_system::TSBuilder,
    Void,
};

use super::{FormatError, FormatErrorKind, FIELD_SEPARATOR, OUTPUT_SEPARATOR};

/// A non-blank line of a table, split into its fields.
#[derive(Debug, Clone)]
struct Record<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(self.line, kind)
    }

    /// The fields after the leading one, which is empty in headers and holds the input symbol
    /// in transition rows.
    fn tail(&self) -> &[&'a str] {
        self.fields.get(1..).unwrap_or_default()
    }

    /// The entries of a header record, which has to start with an empty field.
    fn header_entries(&self) -> std::result::Result<&[&'a str], FormatError> {
        match self.fields.first() {
            Some(lead) if !lead.is_empty() => {
                Err(self.error(FormatErrorKind::LeadingField(lead.to_string())))
            }
            _ => Ok(self.tail()),
        }
    }
}

/// Splits `text` into records. Both `\n` and `\r\n` terminate a line, blank lines are skipped
/// and a single trailing separator at the end of a line is ignored.
fn records(text: &str) -> impl Iterator<Item = Record<'_>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let line = line.trim_end();
            let line = line.strip_suffix(FIELD_SEPARATOR).unwrap_or(line);
            Record {
                line: idx + 1,
                fields: line.split(FIELD_SEPARATOR).map(str::trim).collect(),
            }
        })
}

/// Reads the labels of the states from a header record, making sure that there is at least one,
/// that none is empty and that no label repeats.
fn state_labels<'a>(record: &Record<'a>) -> std::result::Result<Vec<&'a str>, FormatError> {
    let labels = record.header_entries()?;
    if labels.is_empty() {
        return Err(record.error(FormatErrorKind::EmptyHeader));
    }
    let mut seen = Set::default();
    for (pos, label) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(record.error(FormatErrorKind::EmptyStateLabel(pos + 1)));
        }
        if !seen.insert(*label) {
            return Err(record.error(FormatErrorKind::DuplicateState(label.to_string())));
        }
    }
    Ok(labels.to_vec())
}

/// Checks the transition rows that follow the header(s) and hands out the input symbol and the
/// cells of each row. Every row has to start with a fresh, non-empty input symbol followed by
/// precisely one cell per state.
fn transition_rows<'a, I>(
    rows: I,
    states: usize,
    after: usize,
) -> std::result::Result<Vec<(Record<'a>, &'a str)>, FormatError>
where
    I: Iterator<Item = Record<'a>>,
{
    let mut symbols = Set::default();
    let mut out = vec![];
    for row in rows {
        let symbol = row.fields[0];
        if symbol.is_empty() {
            return Err(row.error(FormatErrorKind::EmptyInputSymbol));
        }
        if !symbols.insert(symbol) {
            return Err(row.error(FormatErrorKind::DuplicateInput(symbol.to_string())));
        }
        if row.tail().len() != states {
            return Err(row.error(FormatErrorKind::CellCount {
                expected: states,
                found: row.tail().len(),
            }));
        }
        out.push((row, symbol));
    }
    if out.is_empty() {
        return Err(FormatError::new(after + 1, FormatErrorKind::MissingInputs));
    }
    Ok(out)
}

fn declared<'a>(
    row: &Record<'_>,
    known: &Set<&str>,
    target: &'a str,
) -> std::result::Result<&'a str, FormatError> {
    if known.contains(target) {
        Ok(target)
    } else {
        Err(row.error(FormatErrorKind::UnknownState(target.to_string())))
    }
}

/// Decodes a Mealy machine. The first record lists the states after a leading empty field, the
/// first state is the initial one. Every further record starts with an input symbol, followed by
/// one cell `target/output` per state, in the order of the header.
///
/// # Example
/// ```
/// use transducers::{prelude::*, table::parse_mealy};
///
/// let mm = parse_mealy(";p;q\na;q/0;p/1\nb;p/1;q/0\n").unwrap();
/// assert_eq!(mm.size(), 2);
/// assert_eq!(mm.map(["a", "b"]).unwrap(), vec!["0", "0"]);
/// ```
pub fn parse_mealy(text: &str) -> Result<MealyMachine> {
    let mut records = records(text);
    let header = records
        .next()
        .ok_or(FormatError::new(1, FormatErrorKind::MissingHeader))?;
    let states = state_labels(&header)?;
    let known: Set<&str> = states.iter().copied().collect();
    trace!("Mealy header declares states {states:?}");

    let mut transitions = vec![];
    let rows = transition_rows(records, states.len(), header.line)?;
    let symbols: Vec<&str> = rows.iter().map(|(_, sym)| *sym).collect();
    for (row, symbol) in &rows {
        for (source, cell) in states.iter().zip(row.tail()) {
            let (target, output) = cell
                .split_once(OUTPUT_SEPARATOR)
                .ok_or_else(|| row.error(FormatErrorKind::MissingSeparator(cell.to_string())))?;
            let target = declared(row, &known, target.trim())?;
            transitions.push((
                source.to_string(),
                symbol.to_string(),
                output.trim().to_string(),
                target.to_string(),
            ));
        }
    }

    let ts = TSBuilder::without_state_colors()
        .with_symbols(symbols)
        .with_states(states)
        .with_transitions(transitions)
        .into_dts()?;
    Ok(MealyMachine::from_ts(ts))
}

/// Decodes a Moore machine. The first record lists the output of every state, the second one
/// the states themselves, both after a leading empty field. Every further record starts with an
/// input symbol, followed by the target state for each state in the order of the header.
///
/// # Example
/// ```
/// use transducers::{prelude::*, table::parse_moore};
///
/// let mm = parse_moore(";0;1\n;p;q\na;q;p\n").unwrap();
/// assert_eq!(mm.map(["a"]).unwrap(), vec!["0", "1"]);
/// ```
pub fn parse_moore(text: &str) -> Result<MooreMachine> {
    let mut records = records(text);
    let output_row = records
        .next()
        .ok_or(FormatError::new(1, FormatErrorKind::MissingHeader))?;
    let outputs = output_row.header_entries()?;
    if outputs.is_empty() {
        return Err(output_row.error(FormatErrorKind::EmptyHeader).into());
    }
    if let Some(pos) = outputs.iter().position(|o| o.is_empty()) {
        return Err(output_row.error(FormatErrorKind::EmptyOutput(pos + 1)).into());
    }

    let state_row = records
        .next()
        .ok_or(FormatError::new(output_row.line + 1, FormatErrorKind::MissingStateRow))?;
    let states = state_labels(&state_row)?;
    if states.len() != outputs.len() {
        return Err(state_row
            .error(FormatErrorKind::OutputCountMismatch {
                outputs: outputs.len(),
                states: states.len(),
            })
            .into());
    }
    let known: Set<&str> = states.iter().copied().collect();
    trace!("Moore header declares states {states:?} with outputs {outputs:?}");

    let mut transitions = vec![];
    let rows = transition_rows(records, states.len(), state_row.line)?;
    let symbols: Vec<&str> = rows.iter().map(|(_, sym)| *sym).collect();
    for (row, symbol) in &rows {
        for (source, target) in states.iter().zip(row.tail()) {
            let target = declared(row, &known, target)?;
            transitions.push((
                source.to_string(),
                symbol.to_string(),
                Void,
                target.to_string(),
            ));
        }
    }

    let ts = TSBuilder::default()
        .with_symbols(symbols)
        .with_colored_states(
            states
                .iter()
                .zip(outputs)
                .map(|(state, output)| (state.to_string(), output.to_string())),
        )
        .with_transitions(transitions)
        .into_dts()?;
    Ok(MooreMachine::from_ts(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prelude::*, tests::MEALY_MERGING};

    fn mealy_error(text: &str) -> FormatError {
        match parse_mealy(text) {
            Err(Error::Format(err)) => err,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    fn moore_error(text: &str) -> FormatError {
        match parse_moore(text) {
            Err(Error::Format(err)) => err,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn records_skip_blank_lines_and_trailing_separators() {
        let parsed: Vec<_> = records("\n;a;b;\r\n  \nx;1;2\n")
            .map(|r| (r.line, r.fields))
            .collect();
        assert_eq!(
            parsed,
            vec![(2, vec!["", "a", "b"]), (4, vec!["x", "1", "2"])]
        );
    }

    #[test]
    fn lenient_mealy_input() {
        let mm = parse_mealy(";p;q;\r\n\r\na;q/0;p/1;\r\n").unwrap();
        assert_eq!(mm.to_table(), ";p;q\na;q/0;p/1\n");
        assert_eq!(
            MealyMachine::from_table(&MEALY_MERGING.replace('\n', "\r\n")).unwrap(),
            MealyMachine::from_table(MEALY_MERGING).unwrap()
        );
    }

    #[test]
    fn malformed_mealy_tables() {
        assert_eq!(mealy_error(""), FormatError::new(1, FormatErrorKind::MissingHeader));
        assert_eq!(mealy_error(";\n"), FormatError::new(1, FormatErrorKind::EmptyHeader));
        assert_eq!(
            mealy_error("X;p;q\na;q/0;p/1\n"),
            FormatError::new(1, FormatErrorKind::LeadingField("X".into()))
        );
        assert_eq!(
            mealy_error(";p;;q\na;p/0;p/0;p/0\n"),
            FormatError::new(1, FormatErrorKind::EmptyStateLabel(2))
        );
        assert_eq!(
            mealy_error(";p;p\n"),
            FormatError::new(1, FormatErrorKind::DuplicateState("p".into()))
        );
        assert_eq!(
            mealy_error(";p\n\n"),
            FormatError::new(2, FormatErrorKind::MissingInputs)
        );
        assert_eq!(
            mealy_error(";p;q\na;q/0;p/1\n;q/0;p/1\n"),
            FormatError::new(3, FormatErrorKind::EmptyInputSymbol)
        );
        assert_eq!(
            mealy_error(";p;q\na;q/0;p/1\na;q/0;p/1\n"),
            FormatError::new(3, FormatErrorKind::DuplicateInput("a".into()))
        );
        assert_eq!(
            mealy_error(";p;q\na;q/0\n"),
            FormatError::new(
                2,
                FormatErrorKind::CellCount {
                    expected: 2,
                    found: 1
                }
            )
        );
        assert_eq!(
            mealy_error(";p;q\na;q/0;p/1\nb;q/0;p\n"),
            FormatError::new(3, FormatErrorKind::MissingSeparator("p".into()))
        );
        assert_eq!(
            mealy_error(";p;q\na;q/0;r/1\n"),
            FormatError::new(2, FormatErrorKind::UnknownState("r".into()))
        );
    }

    #[test]
    fn malformed_moore_tables() {
        assert_eq!(moore_error("\n\n"), FormatError::new(1, FormatErrorKind::MissingHeader));
        assert_eq!(moore_error(";\n;p\n"), FormatError::new(1, FormatErrorKind::EmptyHeader));
        assert_eq!(
            moore_error("out;0;1\n;p;q\na;q;p\n"),
            FormatError::new(1, FormatErrorKind::LeadingField("out".into()))
        );
        assert_eq!(
            moore_error(";0;1\nstates;p;q\na;q;p\n"),
            FormatError::new(2, FormatErrorKind::LeadingField("states".into()))
        );
        assert_eq!(
            moore_error(";0;;1\n"),
            FormatError::new(1, FormatErrorKind::EmptyOutput(2))
        );
        assert_eq!(
            moore_error(";0;1\n"),
            FormatError::new(2, FormatErrorKind::MissingStateRow)
        );
        assert_eq!(
            moore_error(";0;1\n;p\na;p\n"),
            FormatError::new(
                2,
                FormatErrorKind::OutputCountMismatch {
                    outputs: 2,
                    states: 1
                }
            )
        );
        assert_eq!(
            moore_error(";0;1\n;p;q\n"),
            FormatError::new(3, FormatErrorKind::MissingInputs)
        );
        assert_eq!(
            moore_error(";0;1\n;p;q\na;q;p\nb;q;s\n"),
            FormatError::new(4, FormatErrorKind::UnknownState("s".into()))
        );
        assert_eq!(
            moore_error(";0;1\n;p;q\na;q;p;p\n"),
            FormatError::new(
                3,
                FormatErrorKind::CellCount {
                    expected: 2,
                    found: 3
                }
            )
        );
    }

    #[test]
    fn moore_tables_keep_input_order() {
        let mm = parse_moore(";0;1\n;p;q\nz;q;p\na;p;p\n").unwrap();
        assert_eq!(mm.alphabet().symbols().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(mm.state_color(1).map(String::as_str), Some("1"));
        assert_eq!(mm.to_table(), ";0;1\n;p;q\nz;q;p\na;p;p\n");
    }
}
