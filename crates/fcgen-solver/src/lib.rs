//! Constraint-solver boundary for the block-cover model.
//!
//! The generator asks a solver for small block-tree instances satisfying a
//! predicate tuple. The concrete solving technology hides behind the narrow
//! [`BlockCoverSolver`] trait; the shipped backend encodes the fixed model
//! as CNF and runs it through varisat. Backends are looked up by name, like
//! the model artifact names its solver.

pub mod backend;
pub mod encode;
pub mod model;

use fcgen_model::{ModelSolution, PredicateTuple};

pub use backend::VarisatBlockCover;
pub use model::{MAX_ANCHOR_EPOCH, MAX_BLOCKS, MAX_EPOCH};

/// Solutions requested per predicate tuple: a bounded sample, not an
/// exhaustive search.
pub const MAX_SOLUTIONS_PER_TUPLE: usize = 5;

/// Errors at the solver boundary. All of them abort the whole generation
/// run; there is no retry and no partial corpus.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("solver backend '{0}' cannot be located")]
    Unavailable(String),

    #[error("solver call could not complete: {0}")]
    Communication(String),

    #[error("malformed solver solution: {0}")]
    MalformedSolution(#[from] fcgen_model::ShapeError),
}

/// Narrow solving interface: one predicate tuple in, up to `max_solutions`
/// validated block-tree instances out.
///
/// A tuple the model cannot satisfy yields `Ok` with an empty vector; the
/// solver legitimately finds nothing, and that is not an error.
pub trait BlockCoverSolver: Send + Sync {
    fn solve(
        &self,
        tuple: &PredicateTuple,
        anchor_epoch: u64,
        max_solutions: usize,
    ) -> Result<Vec<ModelSolution>, SolverError>;
}

/// Look up a solver backend by name. Only `"varisat"` is registered.
pub fn lookup(name: &str) -> Result<Box<dyn BlockCoverSolver>, SolverError> {
    match name {
        "varisat" => Ok(Box::new(VarisatBlockCover)),
        other => Err(SolverError::Unavailable(other.to_string())),
    }
}
