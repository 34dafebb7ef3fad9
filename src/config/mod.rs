//! Runtime tuning for awakening generation.
//!
//! Loaded from JSON with serde defaults so a partial file only overrides
//! the fields it names. [`AwakenConfig::sanitize`] clamps out-of-band
//! values instead of rejecting the file, the hot reload path relies on
//! that.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::constants::{DEFAULT_TIER_CAP, DEFAULT_TIER_CHANCE_BONUS, FALLBACK_AWAKENING_CHANCE};
use crate::rarity::Rarity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct AwakenConfig {
    /// Master switch; when off no item rolls an awakening
    pub enabled: bool,
    /// Base generation chance per rarity, before tier and luck scaling
    pub chance_by_rarity: HashMap<Rarity, f64>,
    /// Additive chance per cleared tier
    pub tier_chance_bonus: f64,
    /// Tiers past this stop raising the chance
    pub tier_cap: u32,
}

impl Default for AwakenConfig {
    fn default() -> Self {
        let chance_by_rarity = Rarity::ALL
            .iter()
            .map(|&rarity| (rarity, rarity.base_awakening_chance()))
            .collect();
        Self {
            enabled: true,
            chance_by_rarity,
            tier_chance_bonus: DEFAULT_TIER_CHANCE_BONUS,
            tier_cap: DEFAULT_TIER_CAP,
        }
    }
}

impl AwakenConfig {
    /// Base chance for one rarity; falls back when a file drops an entry
    pub fn chance_for(&self, rarity: Rarity) -> f64 {
        self.chance_by_rarity
            .get(&rarity)
            .copied()
            .unwrap_or(FALLBACK_AWAKENING_CHANCE)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp out-of-band values in place; returns how many fields were
    /// corrected
    pub fn sanitize(&mut self) -> usize {
        let mut corrected = 0;

        for (rarity, chance) in self.chance_by_rarity.iter_mut() {
            if !chance.is_finite() {
                warn!(?rarity, "non-finite awakening chance, resetting to fallback");
                *chance = FALLBACK_AWAKENING_CHANCE;
                corrected += 1;
            } else if *chance < 0.0 || *chance > 1.0 {
                let clamped = chance.clamp(0.0, 1.0);
                warn!(?rarity, from = *chance, to = clamped, "awakening chance out of [0, 1]");
                *chance = clamped;
                corrected += 1;
            }
        }

        if !self.tier_chance_bonus.is_finite() || self.tier_chance_bonus < 0.0 {
            warn!(from = self.tier_chance_bonus, "tier chance bonus must be non-negative");
            self.tier_chance_bonus = DEFAULT_TIER_CHANCE_BONUS;
            corrected += 1;
        }

        corrected
    }

    /// Load-and-sanitize; on any failure logs and returns the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_path(path.as_ref()) {
            Ok(mut config) => {
                config.sanitize();
                config
            }
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %err,
                    "could not load awakening config, using defaults"
                );
                Self::default()
            }
        }
    }
}
