//! Cross-product case expansion.
//!
//! Each (solution index, seed, fork, preset) combination becomes one test
//! case. The case body is a deferred producer holding its four varying
//! values by value, never a closure over loop variables, so every case
//! sees exactly the combination it was built for no matter when or in what
//! order the harness runs it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use fcgen_model::ModelSolution;

use crate::corpus::SolutionCorpus;

/// Runner directory name in the produced vector tree.
pub const RUNNER_NAME: &str = "filter_block_tree";
/// Handler name, also the case-name prefix.
pub const HANDLER_NAME: &str = "filter_block_tree_model";
/// Suite the cases belong to.
pub const SUITE_NAME: &str = "fork_choice";
/// Generated vectors never exercise real BLS signatures.
pub const BLS_ACTIVE: bool = false;

/// Everything the domain test function needs to build one vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub generator_mode: bool,
    pub phase: String,
    pub preset: String,
    pub bls_active: bool,
    pub debug: bool,
    pub seed: u64,
    pub model_params: ModelSolution,
}

/// Opaque failure from the domain test function. The pipeline never
/// inspects it; it surfaces unchanged from [`CaseProducer::produce`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("case execution failed: {0}")]
pub struct CaseError(pub String);

/// Harness-consumable output of one case body: named serialized parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TestArtifact {
    pub parts: BTreeMap<String, serde_json::Value>,
}

/// The domain test function, supplied explicitly by the caller instead of
/// resolved by symbolic name at startup.
pub trait CaseFn: Send + Sync {
    fn run(&self, request: &GenerationRequest) -> Result<TestArtifact, CaseError>;
}

/// Deferred case body. Holds the captured combination by value; invoking
/// it is the only point where domain computation happens or domain errors
/// can surface.
#[derive(Clone)]
pub struct CaseProducer {
    fork_name: String,
    preset_name: String,
    seed: u64,
    debug: bool,
    solution: Arc<ModelSolution>,
    case_fn: Arc<dyn CaseFn>,
}

impl CaseProducer {
    /// Build the generation request and invoke the domain test function.
    pub fn produce(&self) -> Result<TestArtifact, CaseError> {
        let request = GenerationRequest {
            generator_mode: true,
            phase: self.fork_name.clone(),
            preset: self.preset_name.clone(),
            bls_active: BLS_ACTIVE,
            debug: self.debug,
            seed: self.seed,
            model_params: (*self.solution).clone(),
        };
        self.case_fn.run(&request)
    }
}

impl fmt::Debug for CaseProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseProducer")
            .field("fork_name", &self.fork_name)
            .field("preset_name", &self.preset_name)
            .field("seed", &self.seed)
            .field("debug", &self.debug)
            .field("target_block", &self.solution.target_block)
            .finish_non_exhaustive()
    }
}

/// One generated test case: identity plus deferred body.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub fork_name: String,
    pub preset_name: String,
    pub runner_name: &'static str,
    pub handler_name: &'static str,
    pub suite_name: &'static str,
    pub case_name: String,
    pub producer: CaseProducer,
}

/// Expand the corpus into one case per (solution, seed, fork, preset).
///
/// Nested order: solution index outermost, then seed, fork, preset. The
/// case name is `<handler>_<index>_<seed>`; fork and preset do not enter
/// the name, so a harness mixing forks or presets must keep the
/// (name, fork, preset) triple unique on its side. Descriptor
/// construction is cheap and runs no domain code.
pub fn expand_cases(
    corpus: SolutionCorpus,
    seeds: &[u64],
    forks: &[String],
    presets: &[String],
    debug: bool,
    case_fn: Arc<dyn CaseFn>,
) -> Vec<TestCase> {
    let mut cases = Vec::with_capacity(corpus.len() * seeds.len() * forks.len() * presets.len());

    for (index, solution) in corpus.into_iter().enumerate() {
        let solution = Arc::new(solution);
        for &seed in seeds {
            let case_name = format!("{HANDLER_NAME}_{index}_{seed}");
            for fork_name in forks {
                for preset_name in presets {
                    cases.push(TestCase {
                        fork_name: fork_name.clone(),
                        preset_name: preset_name.clone(),
                        runner_name: RUNNER_NAME,
                        handler_name: HANDLER_NAME,
                        suite_name: SUITE_NAME,
                        case_name: case_name.clone(),
                        producer: CaseProducer {
                            fork_name: fork_name.clone(),
                            preset_name: preset_name.clone(),
                            seed,
                            debug,
                            solution: Arc::clone(&solution),
                            case_fn: Arc::clone(&case_fn),
                        },
                    });
                }
            }
        }
    }

    cases
}
