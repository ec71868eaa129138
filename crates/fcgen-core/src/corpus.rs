//! Solution corpus aggregation.
//!
//! Drives the predicate enumeration, solves each surviving tuple, and
//! concatenates the results. A solution's zero-based position in the
//! concatenation is its permanent identity for the run. Tuple order comes
//! from the enumerator, intra-tuple order from the solver, and neither is
//! ever reshuffled.

use fcgen_model::{enumerate_predicates, ModelSolution};
use fcgen_solver::{BlockCoverSolver, SolverError, MAX_SOLUTIONS_PER_TUPLE};
use tracing::debug;

/// The ordered, indexed collection of model solutions for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionCorpus {
    solutions: Vec<ModelSolution>,
}

impl SolutionCorpus {
    /// Wrap an already-ordered solution list. Positions are identities;
    /// callers must hand solutions over in enumeration order.
    pub fn from_solutions(solutions: Vec<ModelSolution>) -> Self {
        Self { solutions }
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ModelSolution> {
        self.solutions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelSolution> {
        self.solutions.iter()
    }
}

impl IntoIterator for SolutionCorpus {
    type Item = ModelSolution;
    type IntoIter = std::vec::IntoIter<ModelSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

/// Solve every feasible predicate tuple and concatenate the results.
///
/// Infeasible-under-the-model tuples contribute nothing and enumeration
/// continues; solver errors abort immediately with no partial corpus. An
/// entirely empty corpus is a valid, if degenerate, outcome.
pub fn collect_solutions(
    solver: &dyn BlockCoverSolver,
    anchor_epoch: u64,
) -> Result<SolutionCorpus, SolverError> {
    let mut solutions = Vec::new();

    for tuple in enumerate_predicates() {
        let resolved = tuple.resolved_anchor_epoch(anchor_epoch);
        let found = solver.solve(&tuple, resolved, MAX_SOLUTIONS_PER_TUPLE)?;
        debug!(
            ?tuple,
            anchor_epoch = resolved,
            found = found.len(),
            corpus_len = solutions.len(),
            "aggregated tuple solutions"
        );
        solutions.extend(found);
    }

    Ok(SolutionCorpus { solutions })
}
