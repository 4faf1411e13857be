//! DFA to DOT (Graphviz) conversion.
//!
//! This module renders a synthesized automaton in DOT format, which can be
//! visualized with Graphviz tools like `dot`, `neato`, or online viewers.
//!
//! # DOT Format
//!
//! The generated output follows these conventions:
//! - **States** are circles; **accepting states** are double circles
//! - The **initial state** is marked by an arrow from an unlabeled point
//! - **Edges** carry the transition symbol as their label
//! - Output is sorted, so the same automaton always renders identically

use std::fmt::Write;

use crate::apta::Symbol;
use crate::dfa::Dfa;
use crate::types::Color;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary states (default: "circle")
    pub state_shape: &'static str,
    /// Shape for accepting states (default: "doublecircle")
    pub accepting_shape: &'static str,
    /// Graph direction (default: "LR")
    pub rankdir: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            state_shape: "circle",
            accepting_shape: "doublecircle",
            rankdir: "LR",
        }
    }
}

impl<S: Symbol> Dfa<S> {
    /// Converts the DFA to DOT (Graphviz) format with default settings.
    ///
    /// Write the result to a file and render with:
    /// `dot -Tpng dfa.dot -o dfa.png`.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the DFA to DOT (Graphviz) format with custom settings.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "digraph dfa {{")?;
        writeln!(out, "  rankdir={};", config.rankdir)?;

        // Phantom entry point marking the initial state.
        writeln!(out, "  init [shape=point];")?;
        writeln!(out, "  init -> s{};", self.initial_state())?;

        for &state in self.states() {
            let shape = if self.is_accepting(state) {
                config.accepting_shape
            } else {
                config.state_shape
            };
            writeln!(out, "  s{} [shape={}, label=\"{}\"];", state, shape, state)?;
        }

        let mut edges: Vec<(Color, &S, Color)> = self
            .transitions()
            .iter()
            .map(|((from, symbol), to)| (*from, symbol, *to))
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        for (from, symbol, to) in edges {
            let label = format!("{symbol:?}").replace('"', "\\\"");
            writeln!(out, "  s{} -> s{} [label=\"{}\"];", from, to, label)?;
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{BTreeSet, HashMap};

    fn two_state_dfa() -> Dfa<char> {
        let c1 = Color::new(1);
        let c2 = Color::new(2);
        Dfa::new(
            BTreeSet::from([c1, c2]),
            BTreeSet::from(['a']),
            c1,
            HashMap::from([((c1, 'a'), c2), ((c2, 'a'), c1)]),
            BTreeSet::from([c2]),
        )
    }

    #[test]
    fn test_dot_structure() {
        let dot = two_state_dfa().to_dot().unwrap();
        assert!(dot.starts_with("digraph dfa {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("init -> s1;"));
        assert!(dot.contains("s1 [shape=circle, label=\"1\"];"));
        assert!(dot.contains("s2 [shape=doublecircle, label=\"2\"];"));
        assert!(dot.contains("s1 -> s2 [label=\"'a'\"];"));
    }

    #[test]
    fn test_dot_custom_config() {
        let config = DotConfig {
            state_shape: "ellipse",
            accepting_shape: "octagon",
            rankdir: "TB",
        };
        let dot = two_state_dfa().to_dot_with_config(&config).unwrap();
        assert!(dot.contains("rankdir=TB;"));
        assert!(dot.contains("s1 [shape=ellipse, label=\"1\"];"));
        assert!(dot.contains("s2 [shape=octagon, label=\"2\"];"));
    }

    #[test]
    fn test_dot_is_deterministic() {
        let dfa = two_state_dfa();
        assert_eq!(dfa.to_dot().unwrap(), dfa.to_dot().unwrap());
    }
}
