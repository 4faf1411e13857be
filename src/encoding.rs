//! SAT encoding of "a consistent DFA with at most N states exists".
//!
//! The encoding follows Heule & Verwer (2013). Every prefix-tree node gets a
//! *color* in `[1, N]`; nodes sharing a color collapse into one state of the
//! final automaton. Three variable families describe a candidate automaton:
//!
//! - `x[v,i]`: node `v` has color `i`
//! - `y[a,i,j]`: on symbol `a`, color `i` transitions to color `j`
//! - `z[i]`: color `i` is accepting
//!
//! The core clause families (always emitted) are:
//!
//! - **C1**: every node has at least one color
//! - **C2**: a color used by an accepting node is accepting, a color used by
//!   a rejecting node is not
//! - **C3**: a colored parent/child pair sets the transition variable for
//!   the child's incoming symbol
//! - **C4**: a (symbol, source color) pair targets at most one color
//!
//! Four redundant families (C5..C8 in the paper) never change
//! satisfiability and are toggled independently through
//! [`EncodingOptions`]; see its field docs.
//!
//! An [`Encoding`] is scoped to a single candidate size `N` and discarded
//! after one solve attempt; the tree it encodes is shared across sizes.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::apta::{Apta, Symbol};
use crate::cnf::{Clause, Cnf};
use crate::error::{Error, Result};
use crate::types::{Color, NodeId, Var};

/// A symbolic CNF variable.
///
/// Symbols are referred to by their index into the sorted alphabet, so keys
/// stay small, `Copy`, and free of string formatting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VarKey {
    /// `x[v,i]`: node `v` has color `i`.
    Coloring { node: NodeId, color: Color },
    /// `y[a,i,j]`: on symbol `a`, color `i` transitions to color `j`.
    Transition { symbol: usize, from: Color, to: Color },
    /// `z[i]`: color `i` is accepting.
    Accepting { color: Color },
}

/// Bidirectional mapping between symbolic variables and dense 1-based ids.
///
/// Ids are handed out in insertion order, so the numbering is reproducible:
/// all `x` variables first (node-major, color-minor), then all `y`
/// (symbol-major, then source color, then target color), then all `z`.
#[derive(Debug, Default)]
pub struct VarTable {
    keys: Vec<VarKey>,
    index: HashMap<VarKey, Var>,
}

impl VarTable {
    fn insert(&mut self, key: VarKey) -> Var {
        debug_assert!(!self.index.contains_key(&key), "duplicate variable key");
        self.keys.push(key);
        let var = Var::new(self.keys.len() as u32);
        self.index.insert(key, var);
        var
    }

    /// The dense id of a registered key.
    ///
    /// # Panics
    ///
    /// Panics if `key` was never registered; every key an encoding queries
    /// is created during its construction.
    pub fn var(&self, key: VarKey) -> Var {
        self.index[&key]
    }

    /// The symbolic meaning of a dense id, or `None` if the id lies outside
    /// the table (e.g. an auxiliary variable introduced by a solver).
    pub fn key(&self, var: Var) -> Option<VarKey> {
        self.keys.get((var.id() - 1) as usize).copied()
    }

    pub fn num_vars(&self) -> u32 {
        self.keys.len() as u32
    }
}

/// Toggles for the redundant clause families (C5..C8 in the paper).
///
/// None of them change satisfiability; they only steer solver performance.
/// The exception worth knowing about: C5 also guarantees that a model
/// assigns every node exactly one color, which keeps decoding total, so the
/// default configuration turns it on. C1..C4 alone already force a unique
/// color for every *non-root* node (a doubly-colored child would set two
/// `y` targets for the same source color, violating C4), but the root has
/// no incoming edge to constrain it.
#[derive(Debug, Copy, Clone)]
pub struct EncodingOptions {
    /// C5: every node has at most one color.
    pub at_most_one_color: bool,
    /// C6: every (symbol, color) pair targets at least one color.
    pub target_at_least_one_color: bool,
    /// C7: a colored parent together with a set transition forces the
    /// child's color (the converse of C3).
    pub parent_forces_child_color: bool,
    /// C8: explicit conflict clauses from the consistency graph over tree
    /// nodes.
    pub explicit_conflicts: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            at_most_one_color: true,
            target_at_least_one_color: false,
            parent_forces_child_color: false,
            explicit_conflicts: false,
        }
    }
}

impl EncodingOptions {
    /// The bare C1..C4 core, exactly the clause set of the paper's basic
    /// encoding.
    pub fn minimal() -> Self {
        Self {
            at_most_one_color: false,
            target_at_least_one_color: false,
            parent_forces_child_color: false,
            explicit_conflicts: false,
        }
    }

    /// All redundant families enabled.
    pub fn all() -> Self {
        Self {
            at_most_one_color: true,
            target_at_least_one_color: true,
            parent_forces_child_color: true,
            explicit_conflicts: true,
        }
    }
}

/// The CNF encoding of one candidate state count.
#[derive(Debug)]
pub struct Encoding<S> {
    num_colors: u32,
    num_nodes: usize,
    alphabet: Vec<S>,
    vars: VarTable,
    cnf: Cnf,
}

impl<S: Symbol> Encoding<S> {
    /// Encodes `apta` with the default options.
    pub fn new(apta: &Apta<S>, num_colors: u32) -> Result<Self> {
        Self::with_options(apta, num_colors, EncodingOptions::default())
    }

    /// Encodes `apta` for a DFA with at most `num_colors` states.
    ///
    /// Fails fast with [`Error::ZeroColors`] or [`Error::EmptyTree`] before
    /// any solver is involved.
    pub fn with_options(apta: &Apta<S>, num_colors: u32, options: EncodingOptions) -> Result<Self> {
        if num_colors == 0 {
            return Err(Error::ZeroColors);
        }
        if apta.num_nodes() == 0 {
            return Err(Error::EmptyTree);
        }

        let num_nodes = apta.num_nodes();
        let alphabet = apta.alphabet().to_vec();

        let mut vars = VarTable::default();
        for node in 0..num_nodes as NodeId {
            for i in 1..=num_colors {
                vars.insert(VarKey::Coloring {
                    node,
                    color: Color::new(i),
                });
            }
        }
        for symbol in 0..alphabet.len() {
            for i in 1..=num_colors {
                for j in 1..=num_colors {
                    vars.insert(VarKey::Transition {
                        symbol,
                        from: Color::new(i),
                        to: Color::new(j),
                    });
                }
            }
        }
        for i in 1..=num_colors {
            vars.insert(VarKey::Accepting {
                color: Color::new(i),
            });
        }

        let cnf = Cnf::new(vars.num_vars());
        let mut encoding = Self {
            num_colors,
            num_nodes,
            alphabet,
            vars,
            cnf,
        };

        encoding.at_least_one_color();
        encoding.separate_labels(apta);
        encoding.link_parent_relation(apta);
        encoding.functional_transitions();
        if options.at_most_one_color {
            encoding.at_most_one_color();
        }
        if options.target_at_least_one_color {
            encoding.target_at_least_one_color();
        }
        if options.parent_forces_child_color {
            encoding.parent_forces_child_color(apta);
        }
        if options.explicit_conflicts {
            encoding.explicit_conflicts(apta);
        }

        debug!(
            "encoding with {} colors: {} variables, {} clauses",
            num_colors,
            encoding.num_vars(),
            encoding.num_clauses()
        );
        Ok(encoding)
    }

    pub fn num_colors(&self) -> u32 {
        self.num_colors
    }

    pub fn num_vars(&self) -> u32 {
        self.vars.num_vars()
    }

    pub fn num_clauses(&self) -> usize {
        self.cnf.num_clauses()
    }

    /// The variable table, for mapping model literals back to their meaning.
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    /// The sorted alphabet the `symbol` indices of [`VarKey::Transition`]
    /// point into.
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    /// The formula to hand to a solver.
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    fn x(&self, node: NodeId, color: Color) -> Var {
        self.vars.var(VarKey::Coloring { node, color })
    }

    fn y(&self, symbol: usize, from: Color, to: Color) -> Var {
        self.vars.var(VarKey::Transition { symbol, from, to })
    }

    fn z(&self, color: Color) -> Var {
        self.vars.var(VarKey::Accepting { color })
    }

    fn symbol_index(&self, symbol: &S) -> usize {
        self.alphabet
            .binary_search(symbol)
            .expect("every tree symbol is in the alphabet")
    }

    /// C1: every node has at least one color.
    fn at_least_one_color(&mut self) {
        for v in 0..self.num_nodes as NodeId {
            let clause: Clause = (1..=self.num_colors)
                .map(|i| self.x(v, Color::new(i)).pos())
                .collect();
            self.cnf.add_clause(clause);
        }
    }

    /// C2: accepting nodes cannot share a color with rejecting nodes.
    fn separate_labels(&mut self, apta: &Apta<S>) {
        for i in 1..=self.num_colors {
            let i = Color::new(i);
            for &v in apta.accepting() {
                let clause = Clause::new(vec![self.x(v, i).neg(), self.z(i).pos()]);
                self.cnf.add_clause(clause);
            }
            for &v in apta.rejecting() {
                let clause = Clause::new(vec![self.x(v, i).neg(), self.z(i).neg()]);
                self.cnf.add_clause(clause);
            }
        }
    }

    /// C3: a parent relation is set when a node and its parent are colored.
    fn link_parent_relation(&mut self, apta: &Apta<S>) {
        for v in 1..self.num_nodes as NodeId {
            let Some((p, symbol)) = apta.parent_label(v) else {
                continue;
            };
            let a = self.symbol_index(symbol);
            for i in 1..=self.num_colors {
                let i = Color::new(i);
                for j in 1..=self.num_colors {
                    let j = Color::new(j);
                    let clause = Clause::new(vec![
                        self.y(a, i, j).pos(),
                        self.x(p, i).neg(),
                        self.x(v, j).neg(),
                    ]);
                    self.cnf.add_clause(clause);
                }
            }
        }
    }

    /// C4: each (symbol, source color) pair targets at most one color.
    fn functional_transitions(&mut self) {
        for a in 0..self.alphabet.len() {
            for i in 1..=self.num_colors {
                let i = Color::new(i);
                for h in 1..=self.num_colors {
                    for j in (h + 1)..=self.num_colors {
                        let clause = Clause::new(vec![
                            self.y(a, i, Color::new(h)).neg(),
                            self.y(a, i, Color::new(j)).neg(),
                        ]);
                        self.cnf.add_clause(clause);
                    }
                }
            }
        }
    }

    /// C5: every node has at most one color.
    fn at_most_one_color(&mut self) {
        for v in 0..self.num_nodes as NodeId {
            for i in 1..=self.num_colors {
                for j in (i + 1)..=self.num_colors {
                    let clause = Clause::new(vec![
                        self.x(v, Color::new(i)).neg(),
                        self.x(v, Color::new(j)).neg(),
                    ]);
                    self.cnf.add_clause(clause);
                }
            }
        }
    }

    /// C6: each (symbol, source color) pair targets at least one color.
    fn target_at_least_one_color(&mut self) {
        for a in 0..self.alphabet.len() {
            for i in 1..=self.num_colors {
                let i = Color::new(i);
                let clause: Clause = (1..=self.num_colors)
                    .map(|j| self.y(a, i, Color::new(j)).pos())
                    .collect();
                self.cnf.add_clause(clause);
            }
        }
    }

    /// C7: a parent's color together with a set transition forces the
    /// child's color.
    fn parent_forces_child_color(&mut self, apta: &Apta<S>) {
        for v in 1..self.num_nodes as NodeId {
            let Some((p, symbol)) = apta.parent_label(v) else {
                continue;
            };
            let a = self.symbol_index(symbol);
            for i in 1..=self.num_colors {
                let i = Color::new(i);
                for j in 1..=self.num_colors {
                    let j = Color::new(j);
                    let clause = Clause::new(vec![
                        self.y(a, i, j).neg(),
                        self.x(p, i).neg(),
                        self.x(v, j).pos(),
                    ]);
                    self.cnf.add_clause(clause);
                }
            }
        }
    }

    /// C8: nodes connected in the consistency graph never share a color.
    fn explicit_conflicts(&mut self, apta: &Apta<S>) {
        let conflicts = conflict_pairs(apta);
        debug!("consistency graph has {} conflicting pairs", conflicts.len());
        for &(u, w) in &conflicts {
            for i in 1..=self.num_colors {
                let i = Color::new(i);
                let clause = Clause::new(vec![self.x(u, i).neg(), self.x(w, i).neg()]);
                self.cnf.add_clause(clause);
            }
        }
    }
}

/// Pairs of tree nodes that can never be merged into one state.
///
/// Seeded with every (accepting, rejecting) pair, then propagated upward to
/// a fixpoint: if two conflicting nodes are reached over the same symbol,
/// their parents conflict as well. Pairs are stored with the smaller id
/// first.
fn conflict_pairs<S: Symbol>(apta: &Apta<S>) -> BTreeSet<(NodeId, NodeId)> {
    let ordered = |a: NodeId, b: NodeId| if a < b { (a, b) } else { (b, a) };

    let mut conflicts = BTreeSet::new();
    let mut queue = Vec::new();
    for &a in apta.accepting() {
        for &r in apta.rejecting() {
            let pair = ordered(a, r);
            if conflicts.insert(pair) {
                queue.push(pair);
            }
        }
    }

    while let Some((u, w)) = queue.pop() {
        if let (Some((pu, su)), Some((pw, sw))) = (apta.parent_label(u), apta.parent_label(w)) {
            if su == sw && pu != pw {
                let pair = ordered(pu, pw);
                if conflicts.insert(pair) {
                    queue.push(pair);
                }
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::apta::reference_sample;
    use crate::apta::Sample;
    use crate::solver::{SatResult, Solver, Splr};

    fn tiny_apta() -> Apta<char> {
        let sample = Sample::new(vec![vec!['a']], vec![vec!['b']]);
        Apta::build(&sample).unwrap()
    }

    #[test]
    fn test_variable_layout() {
        // 3 nodes, alphabet {a, b}, 2 colors: x ids 1..=6, y ids 7..=14,
        // z ids 15..=16.
        let apta = tiny_apta();
        let enc = Encoding::new(&apta, 2).unwrap();
        assert_eq!(enc.num_vars(), 16);

        let c1 = Color::new(1);
        let c2 = Color::new(2);
        assert_eq!(enc.vars().var(VarKey::Coloring { node: 0, color: c1 }), Var::new(1));
        assert_eq!(enc.vars().var(VarKey::Coloring { node: 1, color: c2 }), Var::new(4));
        assert_eq!(
            enc.vars().var(VarKey::Transition { symbol: 0, from: c1, to: c1 }),
            Var::new(7)
        );
        assert_eq!(
            enc.vars().var(VarKey::Transition { symbol: 1, from: c1, to: c1 }),
            Var::new(11)
        );
        assert_eq!(enc.vars().var(VarKey::Accepting { color: c1 }), Var::new(15));
        assert_eq!(enc.vars().var(VarKey::Accepting { color: c2 }), Var::new(16));
    }

    #[test]
    fn test_variable_table_bijection() {
        let apta = Apta::build(&reference_sample()).unwrap();
        let enc = Encoding::new(&apta, 3).unwrap();
        for id in 1..=enc.num_vars() {
            let var = Var::new(id);
            let key = enc.vars().key(var).unwrap();
            assert_eq!(enc.vars().var(key), var);
        }
        assert_eq!(enc.vars().key(Var::new(enc.num_vars() + 1)), None);
    }

    #[test]
    fn test_clause_counts() {
        // Reference tree: 8 nodes, 7 non-root, alphabet of 2, 3 accepting,
        // 2 rejecting. With N = 3:
        //   C1 = 8, C2 = 3 * 5 = 15, C3 = 7 * 9 = 63, C4 = 2 * 3 * 3 = 18.
        let apta = Apta::build(&reference_sample()).unwrap();

        let minimal = Encoding::with_options(&apta, 3, EncodingOptions::minimal()).unwrap();
        assert_eq!(minimal.num_clauses(), 8 + 15 + 63 + 18);

        // Default adds C5 = 8 * 3 = 24.
        let default = Encoding::new(&apta, 3).unwrap();
        assert_eq!(default.num_clauses(), 104 + 24);

        // All redundant families: C6 = 2 * 3 = 6, C7 = 63, C8 = 9 pairs * 3.
        let all = Encoding::with_options(&apta, 3, EncodingOptions::all()).unwrap();
        assert_eq!(all.num_clauses(), 104 + 24 + 6 + 63 + 27);
    }

    #[test]
    fn test_conflict_pairs() {
        let apta = Apta::build(&reference_sample()).unwrap();
        let expected = BTreeSet::from([
            // Seed: accepting {1, 4, 6} x rejecting {5, 7}.
            (1, 5),
            (1, 7),
            (4, 5),
            (4, 7),
            (5, 6),
            (6, 7),
            // Propagated over equal incoming symbols.
            (0, 5),
            (2, 5),
            (0, 1),
        ]);
        assert_eq!(conflict_pairs(&apta), expected);
    }

    #[test]
    fn test_zero_colors_fails_fast() {
        let apta = tiny_apta();
        let err = Encoding::new(&apta, 0).unwrap_err();
        assert!(matches!(err, Error::ZeroColors));
    }

    #[test]
    fn test_redundant_families_preserve_satisfiability() {
        let apta = Apta::build(&reference_sample()).unwrap();
        let mut solver = Splr;

        for options in [EncodingOptions::minimal(), EncodingOptions::default(), EncodingOptions::all()] {
            let two = Encoding::with_options(&apta, 2, options).unwrap();
            assert_eq!(solver.solve(two.cnf()).unwrap(), SatResult::Unsat);

            let three = Encoding::with_options(&apta, 3, options).unwrap();
            assert!(matches!(solver.solve(three.cnf()).unwrap(), SatResult::Sat(_)));
        }
    }

    #[test]
    fn test_satisfiability_is_monotone_in_colors() {
        // If N colors suffice, padding with unused colors keeps the formula
        // satisfiable.
        let apta = Apta::build(&reference_sample()).unwrap();
        let mut solver = Splr;
        for n in 3..=6 {
            let enc = Encoding::new(&apta, n).unwrap();
            assert!(matches!(solver.solve(enc.cnf()).unwrap(), SatResult::Sat(_)));
        }
    }
}
