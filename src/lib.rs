//! # dfasat-rs: Exact DFA Identification in Rust
//!
//! **`dfasat-rs`** synthesizes a minimal deterministic finite automaton (DFA) consistent with
//! a sample of positively and negatively labeled traces, by reduction to boolean satisfiability.
//! It implements the exact, non-greedy variant of the encoding from
//! *"Software model synthesis with satisfiability solvers"* (Heule & Verwer, 2013).
//!
//! ## How it works
//!
//! 1. The labeled traces are folded into an **augmented prefix tree acceptor** (APTA):
//!    a trie with accepting/rejecting marks on terminal nodes.
//! 2. For a candidate state count `N`, the question *"does a consistent DFA with at most
//!    `N` states exist?"* is encoded as a **CNF formula** over a structured variable scheme
//!    (`x[v,i]`, `y[a,i,j]`, `z[i]`).
//! 3. An external **SAT solver** answers; a satisfying assignment is decoded back into an
//!    explicit DFA.
//! 4. A driver scans `N` in ascending order, so the first success is the smallest
//!    automaton within the search window.
//!
//! ## Key Features
//!
//! - **Exact minimization**: no greedy merge heuristic; the ascending scan guarantees the
//!   smallest satisfiable state count in range.
//! - **Pluggable solving**: the core only needs `solve(CNF) -> model | unsat`; any backend
//!   implementing the [`Solver`][crate::solver::Solver] trait plugs in. The pure-Rust
//!   [`splr`](https://crates.io/crates/splr) solver ships as the default.
//! - **Opaque symbols**: traces range over any `Clone + Eq + Hash + Ord` token type.
//! - **Robust labeling**: symbols never seen during training self-loop instead of failing.
//!
//! ## Quick Start
//!
//! Add `dfasat-rs` to your `Cargo.toml` and synthesize an automaton from a handful of
//! labeled traces:
//!
//! ```toml
//! [dependencies]
//! dfasat-rs = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use dfasat_rs::apta::Sample;
//! use dfasat_rs::solver::Splr;
//! use dfasat_rs::synth::{synthesize, Synthesis};
//!
//! // Accept traces of 'a's, reject the empty trace and 'b'.
//! let sample = Sample::new(
//!     vec![vec!['a'], vec!['a', 'a']],
//!     vec![vec![], vec!['b']],
//! );
//!
//! let mut solver = Splr;
//! let dfa = match synthesize(&sample, &mut solver).unwrap() {
//!     Synthesis::Dfa(dfa) => dfa,
//!     Synthesis::NoModelFound => unreachable!("the default bounds are wide enough"),
//! };
//!
//! assert!(dfa.label(&['a']));
//! assert!(!dfa.label(&['b']));
//! // Unknown symbols self-loop instead of failing:
//! assert!(dfa.label(&['a', 'z']));
//! ```
//!
//! ## Core Components
//!
//! - **[`apta`]**: the labeled sample and its prefix tree.
//! - **[`encoding`]**: the variable scheme and clause families (the heart of the crate).
//! - **[`decode`]**: satisfying assignment back to an explicit automaton.
//! - **[`synth`]**: the incremental search driver.
//! - **[`solver`]**: the solver contract and the default `splr` backend.
//! - **[`dot`]**: Graphviz rendering of synthesized automata.

pub mod apta;
pub mod cnf;
pub mod decode;
pub mod dfa;
pub mod dot;
pub mod encoding;
pub mod error;
pub mod solver;
pub mod synth;
pub mod types;
