//! Engine configuration.

use crate::error::ConfigError;
use crate::policy::{DEFAULT_BLEND_PROBABILITY, DifficultyTier, MovePolicy};
use crate::Marker;
use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for one engine opponent.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Difficulty tier.
    #[serde(default)]
    tier: DifficultyTier,

    /// Probability that the blended tier plays optimally.
    #[serde(default = "default_blend_probability")]
    blend_probability: f64,

    /// Marker the engine plays.
    #[serde(default = "default_engine_marker")]
    engine_marker: Marker,

    /// Fixed seed for reproducible games; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_blend_probability() -> f64 {
    DEFAULT_BLEND_PROBABILITY
}

fn default_engine_marker() -> Marker {
    Marker::O
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::default(),
            blend_probability: default_blend_probability(),
            engine_marker: default_engine_marker(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration for `tier` with every other field defaulted.
    pub fn new(tier: DifficultyTier) -> Self {
        Self {
            tier,
            ..Self::default()
        }
    }

    /// Sets a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text does not parse or the blend
    /// probability is outside `[0, 1]`.
    #[instrument(skip(content), fields(len = content.len()))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        debug!("Parsing engine config");
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.policy()?;
        info!(tier = %config.tier, engine = %config.engine_marker, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the move policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlendProbability`] for an out-of-range probability.
    pub fn policy(&self) -> Result<MovePolicy, ConfigError> {
        MovePolicy::with_blend_probability(self.blend_probability)
    }

    /// Builds the random source for the random and blended tiers.
    #[instrument(skip(self), fields(seeded = self.seed.is_some()))]
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// The human's marker: whichever one the engine does not play.
    pub fn human_marker(&self) -> Marker {
        self.engine_marker.opponent()
    }
}
