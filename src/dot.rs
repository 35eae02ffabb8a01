use std::fmt::{Display, Write};

use itertools::Itertools;

use crate::{
    automaton::{Automaton, MealySemantics, MooreSemantics},
    prelude::*,
};

/// Implemented by transition systems that can be exported to the graphviz DOT language. States
/// are identified by their index, labels are attached as attributes and the initial state is
/// marked by an incoming edge from an invisible node.
pub trait Dottable: Pointed + Sized {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = [
            format!("digraph {} {{", self.dot_name()),
            "init [shape=point, style=invis]".to_string(),
            format!("init -> {}", self.dot_state_ident(self.initial())),
        ];

        let states = self.state_indices().map(|q| {
            format!(
                "{} [{}]",
                self.dot_state_ident(q),
                self.dot_state_attributes(q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self.state_indices().flat_map(|q| {
            self.edges_from(q).into_iter().flatten().map(move |t| {
                format!(
                    "{} -> {} [{}]",
                    self.dot_state_ident(q),
                    self.dot_state_ident(t.target()),
                    self.dot_transition_attributes(t)
                        .into_iter()
                        .map(|attr| attr.to_string())
                        .join(", ")
                )
            })
        });

        header
            .into_iter()
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// The name of the digraph.
    fn dot_name(&self) -> String;

    /// The identifier of a node, which has to be a valid DOT identifier.
    fn dot_state_ident(&self, idx: StateIndex) -> String {
        format!("q{idx}")
    }

    /// The attributes of the node for state `idx`.
    fn dot_state_attributes(&self, idx: StateIndex) -> impl IntoIterator<Item = DotStateAttribute>;

    /// The attributes of the given edge.
    fn dot_transition_attributes<'a>(
        &'a self,
        t: Edge<'a, Self::EdgeColor>,
    ) -> impl IntoIterator<Item = DotTransitionAttribute>;
}

impl<C: Color + Display> Dottable for Automaton<Void, C, MealySemantics> {
    fn dot_name(&self) -> String {
        "Mealy".into()
    }

    fn dot_state_attributes(&self, idx: StateIndex) -> impl IntoIterator<Item = DotStateAttribute> {
        [
            DotStateAttribute::Shape("circle".into()),
            DotStateAttribute::Label(self.state_label(idx).unwrap_or_default().to_string()),
        ]
    }

    fn dot_transition_attributes<'a>(
        &'a self,
        t: Edge<'a, C>,
    ) -> impl IntoIterator<Item = DotTransitionAttribute> {
        [DotTransitionAttribute::Label(format!(
            "{}/{}",
            self.alphabet().symbol(t.symbol()).unwrap_or_default(),
            t.color()
        ))]
    }
}

impl<Q: Color + Display> Dottable for Automaton<Q, Void, MooreSemantics> {
    fn dot_name(&self) -> String {
        "Moore".into()
    }

    fn dot_state_attributes(&self, idx: StateIndex) -> impl IntoIterator<Item = DotStateAttribute> {
        let mut label = self.state_label(idx).unwrap_or_default().to_string();
        if let Some(output) = self.state_color(idx) {
            let _ = write!(label, "|{output}");
        }
        [
            DotStateAttribute::Shape("box".into()),
            DotStateAttribute::Label(label),
        ]
    }

    fn dot_transition_attributes<'a>(
        &'a self,
        t: Edge<'a, Void>,
    ) -> impl IntoIterator<Item = DotTransitionAttribute> {
        [DotTransitionAttribute::Label(
            self.alphabet()
                .symbol(t.symbol())
                .unwrap_or_default()
                .to_string(),
        )]
    }
}

/// Enum that abstracts attributes of nodes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", escape(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{}\"", escape(s)),
        }
    }
}

/// Enum that abstracts attributes of edges in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{}\"", escape(lbl)),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::DotStateAttribute;
    use crate::{
        prelude::*,
        tests::{MEALY_MACHINE, MOORE_MACHINE},
    };

    #[test]
    fn mealy_dot() {
        let dot = MEALY_MACHINE.dot_representation();
        assert!(dot.starts_with("digraph Mealy {"));
        assert!(dot.contains("init -> q0"));
        assert!(dot.contains("q0 [shape=\"circle\", label=\"s0\"]"));
        assert!(dot.contains("q0 -> q1 [label=\"a/x\"]"));
        assert!(dot.contains("q2 -> q0 [label=\"b/z\"]"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn moore_dot() {
        let dot = MOORE_MACHINE.dot_representation();
        assert!(dot.starts_with("digraph Moore {"));
        assert!(dot.contains("q1 [shape=\"box\", label=\"q1|o1\"]"));
        assert!(dot.contains("q4 -> q0 [label=\"b\"]"));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(
            DotStateAttribute::Label("say \"hi\"".into()).to_string(),
            "label=\"say \\\"hi\\\"\""
        );
    }
}
