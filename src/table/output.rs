use crate::{
    automaton::{MealyMachine, MooreMachine},
    TransitionSystem,
};

use super::{FIELD_SEPARATOR, OUTPUT_SEPARATOR};

/// Produces a header record, which consists of an empty field followed by the given entries.
fn header<'a, I: IntoIterator<Item = &'a str>>(entries: I) -> String {
    entries
        .into_iter()
        .map(|entry| format!("{FIELD_SEPARATOR}{entry}"))
        .chain(std::iter::once("\n".to_string()))
        .collect()
}

/// Produces one record per input symbol in alphabet order, the cells of which are computed by
/// `cell` for each state in index order.
fn transition_rows<T, F>(ts: &T, cell: F) -> String
where
    T: TransitionSystem,
    F: Fn(usize, usize) -> String,
{
    ts.alphabet()
        .universe()
        .map(|a| {
            let symbol = ts.alphabet().symbol(a).unwrap_or_default();
            let cells: String = ts
                .state_indices()
                .map(|q| format!("{FIELD_SEPARATOR}{}", cell(q, a)))
                .collect();
            format!("{symbol}{cells}\n")
        })
        .collect()
}

fn label<T: TransitionSystem>(ts: &T, state: usize) -> &str {
    ts.state_label(state).unwrap_or_default()
}

/// Encodes a Mealy machine. States are listed in index order, which puts the initial state
/// first, and input rows follow the order of the alphabet.
pub fn write_mealy(mm: &MealyMachine) -> String {
    let mut out = header(mm.state_indices().map(|q| label(mm, q)));
    out.push_str(&transition_rows(mm, |q, a| match mm.edge(q, a) {
        Some(edge) => format!(
            "{}{OUTPUT_SEPARATOR}{}",
            label(mm, edge.target()),
            edge.color()
        ),
        None => String::new(),
    }));
    out
}

/// Encodes a Moore machine, starting with the record of outputs followed by the record of states.
pub fn write_moore(mm: &MooreMachine) -> String {
    let mut out = header(
        mm.state_indices()
            .map(|q| mm.state_color(q).map(String::as_str).unwrap_or_default()),
    );
    out.push_str(&header(mm.state_indices().map(|q| label(mm, q))));
    out.push_str(&transition_rows(mm, |q, a| {
        mm.successor_index(q, a)
            .map(|p| label(mm, p).to_string())
            .unwrap_or_default()
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn headers_start_with_an_empty_field() {
        assert_eq!(header(["a", "b"]), ";a;b\n");
        assert_eq!(header(std::iter::empty()), "\n");
    }

    #[test]
    fn minimized_machines_are_written_in_index_order() {
        let ts = TSBuilder::without_state_colors()
            .with_symbols(["y", "x"])
            .with_states(["n1", "n0"])
            .with_transitions([
                ("n1", "x", "b".to_string(), "n0"),
                ("n1", "y", "a".to_string(), "n1"),
                ("n0", "x", "c".to_string(), "n1"),
                ("n0", "y", "d".to_string(), "n0"),
            ])
            .into_dts()
            .unwrap();
        let mm = MealyMachine::from_ts(ts);
        assert_eq!(write_mealy(&mm), ";n1;n0\ny;n1/a;n0/d\nx;n0/b;n1/c\n");
    }
}
