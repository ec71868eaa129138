//! Harness-facing provider.
//!
//! The external harness consumes exactly two operations: `prepare`, which
//! must complete before any case body is invoked, and `make_cases`, which
//! runs the whole enumeration/solve/expand pipeline and hands back the
//! ordered case list. Identical inputs and identical solver responses
//! yield an identical ordered sequence of case names.

use std::sync::Arc;

use tracing::debug;

use fcgen_solver::{BlockCoverSolver, SolverError};

use crate::bls;
use crate::cases::{expand_cases, CaseFn, TestCase};
use crate::config::{ConfigError, GeneratorConfig};
use crate::corpus::collect_solutions;
use crate::seeds::build_seed_set;

/// One configured generation run.
pub struct TestProvider {
    config: GeneratorConfig,
    solver: Box<dyn BlockCoverSolver>,
    case_fn: Arc<dyn CaseFn>,
}

impl TestProvider {
    /// Validate the configuration and bind the run's collaborators.
    pub fn new(
        config: GeneratorConfig,
        solver: Box<dyn BlockCoverSolver>,
        case_fn: Arc<dyn CaseFn>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            solver,
            case_fn,
        })
    }

    /// One-time setup the harness must run before invoking any producer.
    pub fn prepare(&self) {
        bls::use_default_backend();
    }

    /// Run the pipeline and produce the ordered case list.
    ///
    /// Solver failures abort the run with no cases at all; case bodies
    /// stay deferred inside the returned producers.
    pub fn make_cases(&self) -> Result<Vec<TestCase>, SolverError> {
        let corpus = collect_solutions(&*self.solver, self.config.anchor_epoch)?;
        let seeds = build_seed_set(self.config.initial_seed, self.config.variations);
        debug!(
            solutions = corpus.len(),
            seeds = seeds.len(),
            forks = self.config.forks.len(),
            presets = self.config.presets.len(),
            "expanding corpus"
        );
        Ok(expand_cases(
            corpus,
            &seeds,
            &self.config.forks,
            &self.config.presets,
            self.config.debug,
            Arc::clone(&self.case_fn),
        ))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
