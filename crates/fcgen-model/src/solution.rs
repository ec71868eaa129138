//! Block-tree instances returned by the constraint solver.
//!
//! `RawSolution` mirrors the solver's named output fields verbatim; the
//! solver is allowed to hand back arrays longer than it meant (fixed-width
//! decode buffers). `ModelSolution` is the truncated, validated form every
//! downstream consumer sees: all four per-block arrays are exactly
//! `max_block + 1` long, never reinterpreted.

use serde::{Deserialize, Serialize};

use crate::predicate::PredicateTuple;

/// Solver output before truncation, field names matching the model artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSolution {
    /// Highest populated block id; everything past it is decode padding.
    pub max_block: usize,
    /// Epoch per block slot.
    pub es: Vec<u64>,
    /// Parent id per block slot. Block 0 has no parent; slot 0 is ignored.
    pub parents: Vec<usize>,
    /// Previous-epoch justification marker per block slot.
    pub prevs: Vec<bool>,
    /// Current-epoch justification marker per block slot.
    pub currs: Vec<bool>,
    /// Current epoch of the store.
    pub curr_e: u64,
    /// Justified epoch of the store.
    pub store_je: u64,
    /// Block whose filtering outcome the predicates exercise.
    pub target_block: usize,
}

/// Shape violations in a raw solution. The solver is not trusted to be
/// well-formed; short arrays are an error, never silently padded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("solution array '{field}' has {len} entries, need at least {expected}")]
    ArrayTooShort {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("target block {target_block} exceeds max block {max_block}")]
    TargetOutOfRange { target_block: usize, max_block: usize },

    #[error("max block {0} admits no block count")]
    BlockCountOverflow(usize),
}

/// One validated block-tree instance for a predicate tuple.
///
/// Immutable once built; its position in the solution corpus is its
/// identity for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSolution {
    pub block_epochs: Vec<u64>,
    pub parents: Vec<usize>,
    pub previous_justifications: Vec<bool>,
    pub current_justifications: Vec<bool>,
    pub current_epoch: u64,
    pub store_justified_epoch: u64,
    pub target_block: usize,
    /// The tuple this instance was solved for.
    pub predicates: PredicateTuple,
}

impl ModelSolution {
    /// Truncate and validate a raw solver solution.
    ///
    /// Each array is cut down to `max_block + 1` entries. Arrays shorter
    /// than that, or a target block outside the tree, are shape errors.
    pub fn from_raw(raw: RawSolution, predicates: PredicateTuple) -> Result<Self, ShapeError> {
        let expected = raw
            .max_block
            .checked_add(1)
            .ok_or(ShapeError::BlockCountOverflow(raw.max_block))?;

        check_len("es", raw.es.len(), expected)?;
        check_len("parents", raw.parents.len(), expected)?;
        check_len("prevs", raw.prevs.len(), expected)?;
        check_len("currs", raw.currs.len(), expected)?;

        if raw.target_block > raw.max_block {
            return Err(ShapeError::TargetOutOfRange {
                target_block: raw.target_block,
                max_block: raw.max_block,
            });
        }

        let mut es = raw.es;
        let mut parents = raw.parents;
        let mut prevs = raw.prevs;
        let mut currs = raw.currs;
        es.truncate(expected);
        parents.truncate(expected);
        prevs.truncate(expected);
        currs.truncate(expected);

        Ok(Self {
            block_epochs: es,
            parents,
            previous_justifications: prevs,
            current_justifications: currs,
            current_epoch: raw.curr_e,
            store_justified_epoch: raw.store_je,
            target_block: raw.target_block,
            predicates,
        })
    }

    /// Number of blocks in the tree (`max_block + 1`).
    pub fn block_count(&self) -> usize {
        self.block_epochs.len()
    }

    /// Whether the target block has no children.
    pub fn target_is_leaf(&self) -> bool {
        !self.parents[1..].contains(&self.target_block)
    }
}

fn check_len(field: &'static str, len: usize, expected: usize) -> Result<(), ShapeError> {
    if len < expected {
        Err(ShapeError::ArrayTooShort {
            field,
            len,
            expected,
        })
    } else {
        Ok(())
    }
}
