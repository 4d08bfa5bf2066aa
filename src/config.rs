//! Configuration types for policies, stores and experiments.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    store::{OutcomeAdjustments, StateStore},
    types::DEFAULT_WEIGHT,
};

/// Standard deviation of the multiplicative score noise
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.1;

/// Configuration for creating a policy.
///
/// # Examples
///
/// ```
/// use ttt_weights::config::PolicyConfig;
///
/// let config = PolicyConfig::new()
///     .with_seed(42)
///     .with_learning(false)
///     .with_dedupe(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Whether finished games update the store
    pub learn: bool,
    /// Skip successors symmetric to one already considered
    pub dedupe_successors: bool,
    /// Standard deviation of the Normal(1.0, σ) score multiplier
    pub noise_std_dev: f64,
}

impl PolicyConfig {
    /// Learning, no dedupe, σ = 0.1, unseeded
    pub fn new() -> Self {
        Self {
            seed: None,
            learn: true,
            dedupe_successors: false,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_learning(mut self, learn: bool) -> Self {
        self.learn = learn;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_successors = dedupe;
        self
    }

    pub fn with_noise_std_dev(mut self, std_dev: f64) -> Self {
        self.noise_std_dev = std_dev;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the noise standard
    /// deviation is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.noise_std_dev.is_finite() || self.noise_std_dev < 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "noise standard deviation must be finite and non-negative, got {}",
                    self.noise_std_dev
                ),
            });
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial weight and outcome table for a new store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub default_weight: f64,
    pub adjustments: OutcomeAdjustments,
}

impl StoreConfig {
    /// An empty store with this configuration
    pub fn build(&self) -> StateStore {
        StateStore::with_config(self.default_weight, self.adjustments)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            adjustments: OutcomeAdjustments::default(),
        }
    }
}

/// A full training-and-evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Tournament rounds while the weighted players learn
    pub training_rounds: usize,
    /// Tournament rounds with learning switched off
    pub evaluation_rounds: usize,
    /// Master seed; each player derives its own from it
    pub seed: Option<u64>,
    pub policy: PolicyConfig,
    pub store: StoreConfig,
}

impl ExperimentConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or holds an
    /// invalid policy configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        let config: ExperimentConfig = serde_json::from_str(&text)?;
        config.policy.validate()?;
        Ok(config)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            training_rounds: 50,
            evaluation_rounds: 10,
            seed: None,
            policy: PolicyConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
