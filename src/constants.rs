//! Centralized tuning constants for the awakening engine.
//!
//! Eliminates magic numbers duplicated across generation, activation and
//! config handling. Per-kind constants (value ranges, budget weights)
//! remain in the modifier catalog as the single source of truth.

// =====================================================
// Quality
// =====================================================

/// Highest quality bonus any rarity can roll (Exalted cap)
pub const QUALITY_BONUS_MAX: f64 = 0.30;

/// Quality-to-value scaling: final = base * (1.0 + quality * QUALITY_VALUE_SCALE)
pub const QUALITY_VALUE_SCALE: f64 = 0.2;

/// Upper bound on rolled values relative to the catalog max:
/// max * (1.0 + QUALITY_BONUS_MAX * QUALITY_VALUE_SCALE)
pub const QUALITY_MAX_OVERSHOOT: f64 = 1.06;

// =====================================================
// Generation chance
// =====================================================

/// Chance used for a rarity missing from the config table
pub const FALLBACK_AWAKENING_CHANCE: f64 = 0.01;

/// Extra awakening chance per zone tier of the dropping area
pub const DEFAULT_TIER_CHANCE_BONUS: f64 = 0.001;

/// Zone tier past which the tier bonus stops growing
pub const DEFAULT_TIER_CAP: u32 = 50;

// =====================================================
// Persistence keys
// =====================================================

/// Item metadata key holding the awakening id (presence marker)
pub const KEY_AWAKEN_ID: &str = "awaken_id";

/// Item metadata key holding the required class id ("" when unrestricted)
pub const KEY_AWAKEN_CLASS: &str = "awaken_class";

/// Item metadata key holding the boosted ability id ("" for armor)
pub const KEY_AWAKEN_ABILITY: &str = "awaken_ability";

/// Item metadata key holding the modifier kind identifier
pub const KEY_AWAKEN_KIND: &str = "awaken_kind";

/// Item metadata key holding the rolled modifier value
pub const KEY_AWAKEN_VALUE: &str = "awaken_value";

/// Item metadata key holding the rendered effect description
pub const KEY_AWAKEN_DESC: &str = "awaken_desc";

// =====================================================
// Display
// =====================================================

/// Display name used when the boosted ability no longer exists in the catalog
pub const FALLBACK_DISPLAY_NAME: &str = "Awakening";

/// Path of the engine config file watched for hot reload
pub const CONFIG_PATH: &str = "config/awakening.json";
