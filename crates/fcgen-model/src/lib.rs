//! Data model for the filter-block-tree test-vector generator.
//!
//! Leaf crate: predicate tuples over justification conditions, their
//! enumeration, and the block-tree solutions a constraint solver returns
//! for them. No solving happens here.

pub mod predicate;
pub mod solution;

pub use predicate::{enumerate_predicates, PredicateTuple};
pub use solution::{ModelSolution, RawSolution, ShapeError};
