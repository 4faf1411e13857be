//! The boolean-satisfiability collaborator contract and the default backend.
//!
//! The pipeline never looks inside a solver: it hands over a [`Cnf`] and
//! expects back either a total satisfying assignment or an explicit
//! unsatisfiable signal. Anything implementing [`Solver`] plugs in.

use splr::{Certificate, SolverError};

use crate::cnf::Cnf;
use crate::error::{Error, Result};
use crate::types::Lit;

/// Outcome of one solver invocation.
///
/// Unsatisfiability is a normal outcome, not an error: the search driver
/// reads it as "advance to the next candidate size". Backend failures
/// surface as [`Error::Solver`] instead and are never conflated with it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SatResult {
    /// A total satisfying assignment, one literal per variable.
    Sat(Vec<Lit>),
    /// The formula has no model.
    Unsat,
}

/// External SAT solver contract.
///
/// Implementors receive a CNF formula over dense positive variable ids
/// (variable 0 unused) and report [`SatResult`]. The `&mut self` receiver
/// leaves room for stateful backends (statistics, incremental interfaces).
pub trait Solver {
    fn solve(&mut self, cnf: &Cnf) -> Result<SatResult>;
}

/// The default backend: the pure-Rust `splr` CDCL solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splr;

impl Solver for Splr {
    fn solve(&mut self, cnf: &Cnf) -> Result<SatResult> {
        match Certificate::try_from(cnf.to_dimacs()) {
            Ok(Certificate::SAT(model)) => {
                Ok(SatResult::Sat(model.into_iter().map(Lit::from_dimacs).collect()))
            }
            Ok(Certificate::UNSAT) => Ok(SatResult::Unsat),
            // splr reports formulas it refutes while loading the clauses as
            // errors rather than UNSAT certificates.
            Err(SolverError::Inconsistent) | Err(SolverError::EmptyClause) => Ok(SatResult::Unsat),
            Err(e) => Err(Error::Solver(format!("{e:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cnf::Clause;
    use crate::types::Var;

    fn cnf_from_dimacs(num_vars: u32, clauses: &[&[i32]]) -> Cnf {
        let mut cnf = Cnf::new(num_vars);
        for lits in clauses {
            cnf.add_clause(Clause::new(
                lits.iter().map(|&lit| Lit::from_dimacs(lit)).collect(),
            ));
        }
        cnf
    }

    #[test]
    fn test_sat_model_is_total() {
        let cnf = cnf_from_dimacs(2, &[&[1, 2], &[-1]]);
        let mut solver = Splr;
        match solver.solve(&cnf).unwrap() {
            SatResult::Sat(model) => {
                assert_eq!(model.len(), 2);
                // The model must set x2 and refute x1.
                assert!(model.contains(&Var::new(2).pos()));
                assert!(model.contains(&Var::new(1).neg()));
            }
            SatResult::Unsat => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn test_unsat_is_explicit() {
        let cnf = cnf_from_dimacs(2, &[&[1, 2], &[-1], &[-2]]);
        let mut solver = Splr;
        assert_eq!(solver.solve(&cnf).unwrap(), SatResult::Unsat);
    }

    #[test]
    fn test_contradictory_units_are_unsat() {
        // Refuted during clause loading; must still read as unsat, not as a
        // backend failure.
        let cnf = cnf_from_dimacs(1, &[&[1], &[-1]]);
        let mut solver = Splr;
        assert_eq!(solver.solve(&cnf).unwrap(), SatResult::Unsat);
    }
}
