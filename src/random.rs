use tracing::trace;

use crate::{math::Bijection, prelude::*, transition_system::DtsState};

/// Returns the label of the `idx`-th symbol, which is a lowercase letter for the first 26
/// symbols and `s{idx}` afterwards.
fn symbol_label(idx: usize) -> String {
    match u8::try_from(idx) {
        Ok(i) if i < 26 => char::from(b'a' + i).to_string(),
        _ => format!("s{idx}"),
    }
}

/// Draws a complete transition system with `size` states named `q0, q1, ...` over an alphabet of
/// `symbols` symbols by drawing a target uniformly at random for each state and symbol. State and
/// edge colors are produced by the given closures. Depending on the draw, some states may be
/// unreachable from the initial state `q0`.
fn random_dts<Q, C, SC, EC>(
    symbols: usize,
    size: usize,
    mut state_color: SC,
    mut edge_color: EC,
) -> DTS<Q, C>
where
    Q: Color,
    C: Color,
    SC: FnMut() -> Q,
    EC: FnMut() -> C,
{
    assert!(symbols > 0, "the alphabet needs at least one symbol");
    assert!(size > 0, "a machine needs at least one state");

    let mut alphabet = Alphabet::empty();
    for a in 0..symbols {
        alphabet.push(symbol_label(a));
    }
    let labels: Bijection<String, StateIndex> = (0..size).map(|q| (format!("q{q}"), q)).collect();
    let states = (0..size)
        .map(|_| {
            let color = state_color();
            let edges = (0..symbols)
                .map(|_| (fastrand::usize(..size), edge_color()))
                .collect();
            DtsState::new(color, edges)
        })
        .collect();

    let ts = DTS::from_parts(alphabet, labels, states);
    trace!("drew random transition system\n{ts:?}");
    ts
}

/// Generates a random [`MealyMachine`] with `size` states over `symbols` input symbols, where
/// every transition emits one of the outputs `o0, ..., o{outputs - 1}` drawn uniformly at random.
/// The result may contain unreachable states. Panics if any of the arguments is zero.
pub fn random_mealy(symbols: usize, size: usize, outputs: usize) -> MealyMachine {
    assert!(outputs > 0, "at least one output is needed");
    MealyMachine::from_ts(random_dts(
        symbols,
        size,
        || Void,
        || format!("o{}", fastrand::usize(..outputs)),
    ))
}

/// Generates a random [`MooreMachine`] with `size` states over `symbols` input symbols, where
/// every state has one of the outputs `o0, ..., o{outputs - 1}` drawn uniformly at random.
/// The result may contain unreachable states. Panics if any of the arguments is zero.
pub fn random_moore(symbols: usize, size: usize, outputs: usize) -> MooreMachine {
    assert!(outputs > 0, "at least one output is needed");
    MooreMachine::from_ts(random_dts(
        symbols,
        size,
        || format!("o{}", fastrand::usize(..outputs)),
        || Void,
    ))
}
