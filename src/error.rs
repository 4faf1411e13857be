//! Error types for the DFA identification pipeline.
//!
//! Per-size unsatisfiability is not an error (it advances the search), and an
//! exhausted search range is reported through
//! [`Synthesis::NoModelFound`][crate::synth::Synthesis] rather than here.

use thiserror::Error;

use crate::types::NodeId;

/// Errors that can occur while building, encoding, or decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// A single prefix-tree node was reached by both a positive and a
    /// negative trace, so no automaton can be consistent with the sample.
    #[error("inconsistent sample: node {node} is reached by both a positive and a negative trace")]
    InconsistentSample {
        /// The doubly-labeled node.
        node: NodeId,
    },

    /// An encoding was requested with zero colors.
    #[error("encoding requires at least one color")]
    ZeroColors,

    /// An encoding was requested against a tree with no nodes.
    #[error("encoding requires a tree with at least one node")]
    EmptyTree,

    /// The solver backend failed. Distinct from unsatisfiability, which is a
    /// normal outcome.
    #[error("solver error: {0}")]
    Solver(String),

    /// A satisfying assignment did not describe a well-formed automaton.
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
