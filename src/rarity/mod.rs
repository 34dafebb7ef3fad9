//! Item rarity tiers and their awakening parameters.
//!
//! Rarity drives two things here: the base chance that a dropped item rolls
//! an awakening at all, and the quality-bonus cap that scales the rolled
//! modifier value.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Item rarity tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Exalted,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Exalted,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
            Self::Exalted => "Exalted",
        }
    }

    /// Stable identifier used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
            Self::Exalted => "exalted",
        }
    }

    /// Default base chance that an item of this rarity rolls an awakening
    pub fn base_awakening_chance(&self) -> f64 {
        match self {
            Self::Common => 0.005,
            Self::Uncommon => 0.01,
            Self::Rare => 0.02,
            Self::Epic => 0.035,
            Self::Legendary => 0.05,
            Self::Mythic => 0.075,
            Self::Exalted => 0.10,
        }
    }

    /// Upper bound of the quality bonus this rarity can roll
    pub fn quality_cap(&self) -> f64 {
        match self {
            Self::Common => 0.0,
            Self::Uncommon => 0.05,
            Self::Rare => 0.10,
            Self::Epic => 0.15,
            Self::Legendary => 0.20,
            Self::Mythic => 0.25,
            Self::Exalted => 0.30,
        }
    }

    /// Roll a quality bonus uniformly in [0, quality_cap]
    pub fn roll_quality(&self, rng: &mut impl Rng) -> f64 {
        rng.gen::<f64>() * self.quality_cap()
    }
}
