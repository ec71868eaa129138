//! Deterministic test-vector pipeline for the fork-choice block-filtering
//! predicate.
//!
//! One run: enumerate the feasible predicate tuples, solve each for up to
//! five block-tree instances, concatenate everything into an indexed
//! corpus, derive a reproducible seed set, and cross-product-expand
//! (solution x seed x fork x preset) into uniquely named test cases whose
//! bodies run only when the harness invokes them.

pub mod bls;
pub mod cases;
pub mod config;
pub mod corpus;
pub mod provider;
pub mod seeds;

pub use cases::{CaseError, CaseFn, CaseProducer, GenerationRequest, TestArtifact, TestCase};
pub use config::{ConfigError, GeneratorConfig};
pub use corpus::{collect_solutions, SolutionCorpus};
pub use provider::TestProvider;
pub use seeds::build_seed_set;
