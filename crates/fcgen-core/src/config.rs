//! Generator run configuration.

use serde::{Deserialize, Serialize};

use fcgen_solver::MAX_ANCHOR_EPOCH;

/// Scalar inputs for one generation run, threaded unchanged into the
/// pipeline components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fork identifiers to expand each solution across.
    pub forks: Vec<String>,
    /// Preset identifiers to expand each solution across.
    pub presets: Vec<String>,
    /// Extra checks and output inside the domain test function.
    pub debug: bool,
    /// Seed at position 0 of the seed set and source of the variation
    /// stream.
    pub initial_seed: u64,
    /// Number of seeds per solution (clamped to at least 1).
    pub variations: usize,
    /// Caller anchor epoch; tuples pinning the store justified epoch to
    /// zero override it with 0.
    pub anchor_epoch: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            forks: vec!["altair".to_string()],
            presets: vec!["minimal".to_string()],
            debug: false,
            initial_seed: 1,
            variations: 1,
            anchor_epoch: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no forks configured")]
    NoForks,

    #[error("no presets configured")]
    NoPresets,

    #[error("anchor epoch {0} exceeds the model bound {MAX_ANCHOR_EPOCH}")]
    AnchorEpochTooHigh(u64),
}

impl GeneratorConfig {
    /// Reject configurations that can only produce empty or partial runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forks.is_empty() {
            return Err(ConfigError::NoForks);
        }
        if self.presets.is_empty() {
            return Err(ConfigError::NoPresets);
        }
        if self.anchor_epoch > MAX_ANCHOR_EPOCH {
            return Err(ConfigError::AnchorEpochTooHigh(self.anchor_epoch));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_forks_rejected() {
        let config = GeneratorConfig {
            forks: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoForks));
    }

    #[test]
    fn test_empty_presets_rejected() {
        let config = GeneratorConfig {
            presets: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoPresets));
    }

    #[test]
    fn test_anchor_epoch_bound_enforced() {
        let config = GeneratorConfig {
            anchor_epoch: MAX_ANCHOR_EPOCH + 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AnchorEpochTooHigh(MAX_ANCHOR_EPOCH + 1))
        );

        let config = GeneratorConfig {
            anchor_epoch: MAX_ANCHOR_EPOCH,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = GeneratorConfig {
            forks: vec!["altair".to_string(), "bellatrix".to_string()],
            variations: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.forks, config.forks);
        assert_eq!(back.variations, 4);
    }
}
