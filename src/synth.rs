//! Incremental search for the smallest consistent DFA.
//!
//! The driver scans candidate state counts in ascending order, encoding and
//! solving each one independently, and decodes the first satisfiable size.
//! Satisfiability is monotone in the state count, so the first success is
//! the true minimum within the scanned range. There is no cap and no
//! timeout beyond the caller-supplied bounds.

use std::ops::RangeInclusive;

use log::{debug, info};

use crate::apta::{Apta, Sample, Symbol};
use crate::dfa::Dfa;
use crate::encoding::{Encoding, EncodingOptions};
use crate::error::Result;
use crate::solver::{SatResult, Solver};

/// Candidate state counts tried by [`synthesize`].
pub const DEFAULT_BOUNDS: RangeInclusive<u32> = 1..=5;

/// Outcome of a synthesis run.
///
/// An exhausted search range is a normal outcome, not an error: the caller
/// reacts by widening the bounds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Synthesis<S: Eq + std::hash::Hash> {
    /// The smallest consistent automaton within the scanned bounds.
    Dfa(Dfa<S>),
    /// No candidate size in the scanned bounds was satisfiable.
    NoModelFound,
}

impl<S: Eq + std::hash::Hash> Synthesis<S> {
    /// The synthesized automaton, if one was found.
    pub fn into_dfa(self) -> Option<Dfa<S>> {
        match self {
            Synthesis::Dfa(dfa) => Some(dfa),
            Synthesis::NoModelFound => None,
        }
    }
}

/// Synthesizes a minimal DFA consistent with the sample, scanning the
/// default bounds of 1 to 5 states.
pub fn synthesize<S: Symbol>(
    sample: &Sample<S>,
    solver: &mut impl Solver,
) -> Result<Synthesis<S>> {
    synthesize_within(sample, DEFAULT_BOUNDS, solver)
}

/// Synthesizes a minimal DFA consistent with the sample, scanning the given
/// inclusive range of state counts.
pub fn synthesize_within<S: Symbol>(
    sample: &Sample<S>,
    bounds: RangeInclusive<u32>,
    solver: &mut impl Solver,
) -> Result<Synthesis<S>> {
    synthesize_with_options(sample, bounds, EncodingOptions::default(), solver)
}

/// Synthesizes a minimal DFA with explicit control over the redundant
/// clause families.
///
/// The prefix tree is built once and shared across every candidate size;
/// each size gets a fresh [`Encoding`] that is dropped after its solve
/// attempt.
pub fn synthesize_with_options<S: Symbol>(
    sample: &Sample<S>,
    bounds: RangeInclusive<u32>,
    options: EncodingOptions,
    solver: &mut impl Solver,
) -> Result<Synthesis<S>> {
    let apta = Apta::build(sample)?;
    debug!(
        "synthesizing from {} traces ({} tree nodes, alphabet of {})",
        sample.len(),
        apta.num_nodes(),
        apta.alphabet().len()
    );

    for num_colors in bounds {
        let encoding = Encoding::with_options(&apta, num_colors, options)?;
        match solver.solve(encoding.cnf())? {
            SatResult::Sat(model) => {
                let dfa = encoding.decode(&model)?;
                info!("found a consistent DFA with {} states", dfa.num_states());
                return Ok(Synthesis::Dfa(dfa));
            }
            SatResult::Unsat => {
                debug!("{} colors: unsatisfiable", num_colors);
            }
        }
    }

    info!("no model found within the given bounds");
    Ok(Synthesis::NoModelFound)
}
