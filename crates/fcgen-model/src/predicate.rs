//! Predicate tuples over the four justification-related conditions.
//!
//! The tuple partitions the fork-choice block-filtering test space. Of the
//! 16 raw boolean combinations, 4 are logically impossible: a store
//! justified epoch of zero trivially equals a voting-source baseline of
//! zero, so `store_je_eq_zero` forces `block_vse_eq_store_je`.

use serde::{Deserialize, Serialize};

/// Boundary conditions on the block under test, one generator run per tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateTuple {
    /// The store's justified epoch is zero.
    pub store_je_eq_zero: bool,
    /// The block's voting-source epoch equals the store's justified epoch.
    pub block_vse_eq_store_je: bool,
    /// The block's voting-source epoch plus two reaches the current epoch.
    pub block_vse_plus_two_ge_curr_e: bool,
    /// The block has no descendants in the tree.
    pub block_is_leaf: bool,
}

impl PredicateTuple {
    /// Whether this combination can hold at all.
    ///
    /// `store_je_eq_zero && !block_vse_eq_store_je` is contradictory and
    /// must never reach a solver.
    pub fn is_feasible(&self) -> bool {
        !(self.store_je_eq_zero && !self.block_vse_eq_store_je)
    }

    /// Anchor epoch actually handed to the solver for this tuple.
    ///
    /// A zero store-justified epoch pins the anchor to epoch 0 regardless
    /// of what the caller asked for.
    pub fn resolved_anchor_epoch(&self, caller_anchor: u64) -> u64 {
        if self.store_je_eq_zero {
            0
        } else {
            caller_anchor
        }
    }
}

/// All feasible predicate tuples in the generator's canonical order.
///
/// Nested lexicographic: `store_je_eq_zero` outermost, each field iterating
/// `true` then `false`. Infeasible combinations are dropped, leaving exactly
/// 12 of 16. Downstream solution indices depend on this order staying fixed.
pub fn enumerate_predicates() -> Vec<PredicateTuple> {
    let mut tuples = Vec::with_capacity(12);
    for store_je_eq_zero in [true, false] {
        for block_vse_eq_store_je in [true, false] {
            for block_vse_plus_two_ge_curr_e in [true, false] {
                for block_is_leaf in [true, false] {
                    let tuple = PredicateTuple {
                        store_je_eq_zero,
                        block_vse_eq_store_je,
                        block_vse_plus_two_ge_curr_e,
                        block_is_leaf,
                    };
                    if tuple.is_feasible() {
                        tuples.push(tuple);
                    }
                }
            }
        }
    }
    tuples
}
