//! Engine configuration: tuning parameters and the rarity weight table.
//!
//! Both types are serde-derived so callers can ship balancing data as JSON;
//! [`EngineConfig::load`] reads and validates a config file in one step.

use crate::core::constants::{
    BASE_WEIGHT_COMMON, BASE_WEIGHT_EPIC, BASE_WEIGHT_LEGENDARY, BASE_WEIGHT_RARE,
    DIVERSITY_BONUS, FALLBACK_BASE_WEIGHT, PITY_FACTOR, PITY_INTERVAL, TAG_BIAS_FACTOR,
    TOP_TAG_COUNT,
};
use crate::error::ConfigError;
use crate::perks::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tuning parameters for the dynamic weighting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightParams {
    /// Per-selection multiplier growth for tags the player keeps picking.
    pub tag_bias_factor: f64,
    /// Bonus added per completed pity interval.
    pub pity_factor: f64,
    /// Consecutive misses required per pity escalation step.
    pub pity_interval: u32,
    /// Penalty per overlapping tag in the diversity pass.
    pub diversity_bonus: f64,
    /// How many of the most-selected tags the diversity pass considers.
    pub top_tag_count: usize,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            tag_bias_factor: TAG_BIAS_FACTOR,
            pity_factor: PITY_FACTOR,
            pity_interval: PITY_INTERVAL,
            diversity_bonus: DIVERSITY_BONUS,
            top_tag_count: TOP_TAG_COUNT,
        }
    }
}

impl WeightParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pity_interval == 0 {
            return Err(ConfigError::InvalidPityInterval);
        }
        for (name, value) in [
            ("tag_bias_factor", self.tag_bias_factor),
            ("pity_factor", self.pity_factor),
            ("diversity_bonus", self.diversity_bonus),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }
}

/// Base selection weight per rarity tier.
///
/// Tiers missing from the table fall back to [`FALLBACK_BASE_WEIGHT`] rather
/// than failing, so a partially configured table still produces offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityWeightTable {
    weights: HashMap<Rarity, f64>,
}

impl Default for RarityWeightTable {
    fn default() -> Self {
        let mut weights = HashMap::new();
        weights.insert(Rarity::Common, BASE_WEIGHT_COMMON);
        weights.insert(Rarity::Rare, BASE_WEIGHT_RARE);
        weights.insert(Rarity::Epic, BASE_WEIGHT_EPIC);
        weights.insert(Rarity::Legendary, BASE_WEIGHT_LEGENDARY);
        Self { weights }
    }
}

impl RarityWeightTable {
    /// Base weight for a tier, falling back for untabled tiers.
    pub fn base_weight(&self, rarity: Rarity) -> f64 {
        self.weights
            .get(&rarity)
            .copied()
            .unwrap_or(FALLBACK_BASE_WEIGHT)
    }

    /// Overrides the base weight for a tier. Weights must stay strictly
    /// positive.
    pub fn set(&mut self, rarity: Rarity, weight: f64) -> Result<(), ConfigError> {
        if !(weight > 0.0) {
            return Err(ConfigError::NonPositiveWeight {
                rarity: rarity.name(),
                weight,
            });
        }
        self.weights.insert(rarity, weight);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&rarity, &weight) in &self.weights {
            if !(weight > 0.0) {
                return Err(ConfigError::NonPositiveWeight {
                    rarity: rarity.name(),
                    weight,
                });
            }
        }
        Ok(())
    }
}

/// Complete configuration for a [`DynamicWeightEngine`](crate::DynamicWeightEngine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub params: WeightParams,
    pub rarity_weights: RarityWeightTable,
}

impl EngineConfig {
    /// Loads and validates a JSON config file. Missing fields take their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        self.rarity_weights.validate()?;
        Ok(())
    }
}
