//! Varisat-backed block-cover solving.
//!
//! Encodes the model, then enumerates satisfying assignments with blocking
//! clauses until the requested bound or UNSAT. Blocking is restricted to
//! the decoded solution variables, so every returned instance differs in
//! something the caller can see.

use std::collections::HashSet;

use varisat::{solver::Solver, ExtendFormula, Lit};

use fcgen_model::{ModelSolution, PredicateTuple};

use crate::model::encode;
use crate::{BlockCoverSolver, SolverError};

/// The registered in-process SAT backend.
pub struct VarisatBlockCover;

impl BlockCoverSolver for VarisatBlockCover {
    fn solve(
        &self,
        tuple: &PredicateTuple,
        anchor_epoch: u64,
        max_solutions: usize,
    ) -> Result<Vec<ModelSolution>, SolverError> {
        let model = encode(tuple, anchor_epoch)?;

        let mut solver = Solver::new();
        for clause in model.clauses() {
            solver.add_clause(clause);
        }

        let solution_var_set: HashSet<usize> = model
            .solution_vars()
            .iter()
            .map(|v| v.index())
            .collect();

        let mut solutions = Vec::new();
        while solutions.len() < max_solutions {
            match solver.solve() {
                Ok(true) => {
                    let assignment = solver.model().ok_or_else(|| {
                        SolverError::Communication("SAT but no model returned".to_string())
                    })?;
                    let raw = model.decode(&assignment);
                    solutions.push(ModelSolution::from_raw(raw, *tuple)?);

                    let blocking: Vec<Lit> = assignment
                        .iter()
                        .filter(|l| solution_var_set.contains(&l.var().index()))
                        .map(|l| !*l)
                        .collect();
                    if blocking.is_empty() {
                        break;
                    }
                    solver.add_clause(&blocking);
                }
                Ok(false) => break, // no (more) solutions for this tuple
                Err(e) => return Err(SolverError::Communication(e.to_string())),
            }
        }

        tracing::debug!(
            ?tuple,
            anchor_epoch,
            found = solutions.len(),
            "block cover solve finished"
        );
        Ok(solutions)
    }
}
