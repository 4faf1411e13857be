//! Decoding satisfying assignments back into explicit automata.
//!
//! The reverse direction of [`encoding`][crate::encoding]: every true
//! literal of a model is resolved through the variable table and dispatched
//! on its kind. True `x` variables yield the state set (and the initial
//! state, via the root node), true `y` variables the transition map and the
//! alphabet, true `z` variables the accepting set.

use std::collections::{BTreeSet, HashMap};

use crate::apta::{Symbol, ROOT};
use crate::dfa::Dfa;
use crate::encoding::{Encoding, VarKey};
use crate::error::{Error, Result};
use crate::types::{Color, Lit};

impl<S: Symbol> Encoding<S> {
    /// Reconstructs the DFA described by a satisfying assignment.
    ///
    /// A well-formed model assigns the root node exactly one color; zero or
    /// several signal a solver/encoding mismatch and fail with
    /// [`Error::InvalidModel`]. Literals over ids outside the variable table
    /// (auxiliaries some solvers append) are ignored.
    pub fn decode(&self, model: &[Lit]) -> Result<Dfa<S>> {
        let mut states = BTreeSet::new();
        let mut alphabet = BTreeSet::new();
        let mut transitions = HashMap::new();
        let mut accepting_states = BTreeSet::new();
        let mut root_colors: Vec<Color> = Vec::new();

        for &lit in model {
            if !lit.is_positive() {
                continue;
            }
            let Some(key) = self.vars().key(lit.var()) else {
                continue;
            };
            match key {
                VarKey::Coloring { node, color } => {
                    states.insert(color);
                    if node == ROOT {
                        root_colors.push(color);
                    }
                }
                VarKey::Transition { symbol, from, to } => {
                    let symbol = self.alphabet()[symbol].clone();
                    alphabet.insert(symbol.clone());
                    transitions.insert((from, symbol), to);
                }
                VarKey::Accepting { color } => {
                    accepting_states.insert(color);
                }
            }
        }

        let initial_state = match root_colors.as_slice() {
            [color] => *color,
            [] => {
                return Err(Error::InvalidModel(
                    "the root node has no color".to_string(),
                ))
            }
            _ => {
                return Err(Error::InvalidModel(format!(
                    "the root node has {} colors",
                    root_colors.len()
                )))
            }
        };

        Ok(Dfa::new(
            states,
            alphabet,
            initial_state,
            transitions,
            accepting_states,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::apta::{Apta, Sample};

    fn tiny_encoding() -> Encoding<char> {
        // Nodes: 0 -a-> 1 (accepting), 0 -b-> 2 (rejecting).
        let sample = Sample::new(vec![vec!['a']], vec![vec!['b']]);
        let apta = Apta::build(&sample).unwrap();
        Encoding::new(&apta, 2).unwrap()
    }

    /// A total assignment that sets exactly the given keys true.
    fn model_from_keys(enc: &Encoding<char>, true_keys: &[VarKey]) -> Vec<Lit> {
        let true_vars: Vec<_> = true_keys.iter().map(|&key| enc.vars().var(key)).collect();
        (1..=enc.num_vars())
            .map(crate::types::Var::new)
            .map(|var| {
                if true_vars.contains(&var) {
                    var.pos()
                } else {
                    var.neg()
                }
            })
            .collect()
    }

    #[test]
    fn test_decode_reconstructs_automaton() {
        let enc = tiny_encoding();
        let c1 = Color::new(1);
        let c2 = Color::new(2);
        let model = model_from_keys(
            &enc,
            &[
                VarKey::Coloring { node: 0, color: c1 },
                VarKey::Coloring { node: 1, color: c2 },
                VarKey::Coloring { node: 2, color: c1 },
                VarKey::Transition { symbol: 0, from: c1, to: c2 },
                VarKey::Transition { symbol: 1, from: c1, to: c1 },
                VarKey::Accepting { color: c2 },
            ],
        );

        let dfa = enc.decode(&model).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.initial_state(), c1);
        assert_eq!(dfa.alphabet(), &BTreeSet::from(['a', 'b']));
        assert_eq!(dfa.transition(c1, &'a'), Some(c2));
        assert_eq!(dfa.transition(c1, &'b'), Some(c1));
        assert_eq!(dfa.accepting_states(), &BTreeSet::from([c2]));
        assert!(dfa.label(&['a']));
        assert!(!dfa.label(&['b']));
    }

    #[test]
    fn test_uncolored_root_is_invalid() {
        let enc = tiny_encoding();
        let model = model_from_keys(
            &enc,
            &[VarKey::Coloring { node: 1, color: Color::new(1) }],
        );
        let err = enc.decode(&model).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_doubly_colored_root_is_invalid() {
        let enc = tiny_encoding();
        let model = model_from_keys(
            &enc,
            &[
                VarKey::Coloring { node: 0, color: Color::new(1) },
                VarKey::Coloring { node: 0, color: Color::new(2) },
            ],
        );
        let err = enc.decode(&model).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_out_of_table_literals_are_ignored() {
        let enc = tiny_encoding();
        let mut model = model_from_keys(
            &enc,
            &[VarKey::Coloring { node: 0, color: Color::new(1) }],
        );
        // An auxiliary variable a solver might have introduced.
        model.push(crate::types::Var::new(enc.num_vars() + 1).pos());
        let dfa = enc.decode(&model).unwrap();
        assert_eq!(dfa.initial_state(), Color::new(1));
    }
}
