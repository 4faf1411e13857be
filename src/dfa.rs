//! Deterministic finite automata over generic symbol alphabets.

use std::collections::{BTreeSet, HashMap};

use crate::apta::Symbol;
use crate::types::Color;

/// A deterministic finite automaton produced by the synthesis pipeline.
///
/// States are the colors of the satisfying assignment. The transition
/// function is partial: pairs the solver never constrained are simply
/// absent, and [`Dfa::label`] treats them as self-loops, which makes the
/// automaton total and robust against symbols never seen during training.
///
/// The value is immutable for its caller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Dfa<S: Eq + std::hash::Hash> {
    states: BTreeSet<Color>,
    alphabet: BTreeSet<S>,
    initial_state: Color,
    transitions: HashMap<(Color, S), Color>,
    accepting_states: BTreeSet<Color>,
}

impl<S: Symbol> Dfa<S> {
    pub fn new(
        states: BTreeSet<Color>,
        alphabet: BTreeSet<S>,
        initial_state: Color,
        transitions: HashMap<(Color, S), Color>,
        accepting_states: BTreeSet<Color>,
    ) -> Self {
        Self {
            states,
            alphabet,
            initial_state,
            transitions,
            accepting_states,
        }
    }

    /// Labels a trace: `true` if it ends in an accepting state.
    ///
    /// Each symbol moves the automaton along the defined transition if there
    /// is one; an undefined (state, symbol) pair leaves the automaton in its
    /// current state.
    pub fn label(&self, trace: &[S]) -> bool {
        let mut state = self.initial_state;
        for symbol in trace {
            state = self
                .transitions
                .get(&(state, symbol.clone()))
                .copied()
                .unwrap_or(state);
        }
        self.accepting_states.contains(&state)
    }

    /// The defined transition out of `state` over `symbol`, if any.
    pub fn transition(&self, state: Color, symbol: &S) -> Option<Color> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &BTreeSet<Color> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<S> {
        &self.alphabet
    }

    pub fn initial_state(&self) -> Color {
        self.initial_state
    }

    pub fn transitions(&self) -> &HashMap<(Color, S), Color> {
        &self.transitions
    }

    pub fn accepting_states(&self) -> &BTreeSet<Color> {
        &self.accepting_states
    }

    pub fn is_accepting(&self, state: Color) -> bool {
        self.accepting_states.contains(&state)
    }
}
