//! Modifier kind catalog.
//!
//! Every awakening carries exactly one modifier kind. A kind defines its
//! display text, its balance budget weight, its default value range and the
//! numeric axis it acts on during ability execution. Templates may override
//! ranges and descriptions but the catalog is the single source of truth
//! for defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{QUALITY_BONUS_MAX, QUALITY_VALUE_SCALE};

/// The modifier kinds an awakening can roll.
///
/// The first group targets ability execution (weapon-bound awakenings),
/// the defensive group feeds the armor bonus aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    // Ability execution
    ExtraSummon,
    DamageBonus,
    CritDamageBonus,
    CritChanceBonus,
    CooldownReduction,
    DurationExtension,
    RadiusBonus,
    ExtraProjectile,
    ExtraBounce,
    ProcChanceBonus,
    ExtraStacks,
    ReducedThreshold,
    ThresholdBonus,
    ApplySlow,
    ApplyVulnerability,
    SpeedBuff,
    HealOnProc,
    ShieldOnProc,
    XpBonus,
    LootBonus,
    UniqueEffect,
    // Defensive (armor-bound)
    DamageReduction,
    ArmorBonus,
    ThornsDamage,
    HealthBonus,
    BlockChance,
    HealthRegen,
    CcResistance,
}

/// Numeric axis a modifier kind acts on during execution.
///
/// One kind maps to exactly one axis; the execution context dispatches on
/// this instead of matching kinds in every accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Damage,
    CritDamage,
    CritChance,
    Cooldown,
    Duration,
    Radius,
    ExtraCount,
    ThresholdReduction,
    ThresholdBonus,
    ProcChance,
    Slow,
    Vulnerability,
    Speed,
    Heal,
    Shield,
    Xp,
    Loot,
    Unique,
    /// Defensive kinds aggregate through armor bonuses, never per cast
    Passive,
}

impl Axis {
    /// Apply a rolled value to a base amount along this axis.
    ///
    /// Gated axes (Slow, Vulnerability, ...) carry no scaling rule; their
    /// value is consumed through the context's fraction accessors and the
    /// base passes through untouched here.
    pub fn apply(self, base: f64, value: f64) -> f64 {
        match self {
            Axis::Damage | Axis::Duration | Axis::Radius => base * (1.0 + value / 100.0),
            Axis::Cooldown => base * (1.0 - value / 100.0),
            Axis::CritDamage => base + value / 100.0,
            Axis::CritChance | Axis::ProcChance => (base + value / 100.0).min(1.0),
            Axis::ThresholdBonus => base + value,
            Axis::ExtraCount | Axis::ThresholdReduction => base + value.round(),
            _ => base,
        }
    }
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 28] = [
        Self::ExtraSummon,
        Self::DamageBonus,
        Self::CritDamageBonus,
        Self::CritChanceBonus,
        Self::CooldownReduction,
        Self::DurationExtension,
        Self::RadiusBonus,
        Self::ExtraProjectile,
        Self::ExtraBounce,
        Self::ProcChanceBonus,
        Self::ExtraStacks,
        Self::ReducedThreshold,
        Self::ThresholdBonus,
        Self::ApplySlow,
        Self::ApplyVulnerability,
        Self::SpeedBuff,
        Self::HealOnProc,
        Self::ShieldOnProc,
        Self::XpBonus,
        Self::LootBonus,
        Self::UniqueEffect,
        Self::DamageReduction,
        Self::ArmorBonus,
        Self::ThornsDamage,
        Self::HealthBonus,
        Self::BlockChance,
        Self::HealthRegen,
        Self::CcResistance,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ExtraSummon => "Reinforced Summoning",
            Self::DamageBonus => "Amplified Damage",
            Self::CritDamageBonus => "Devastating Blows",
            Self::CritChanceBonus => "Fatal Precision",
            Self::CooldownReduction => "Accelerated Recovery",
            Self::DurationExtension => "Prolonged Effect",
            Self::RadiusBonus => "Extended Reach",
            Self::ExtraProjectile => "Split Volley",
            Self::ExtraBounce => "Endless Ricochet",
            Self::ProcChanceBonus => "Frequent Trigger",
            Self::ExtraStacks => "Heightened Momentum",
            Self::ReducedThreshold => "Lowered Threshold",
            Self::ThresholdBonus => "Tuned Threshold",
            Self::ApplySlow => "Hindering Grasp",
            Self::ApplyVulnerability => "Exposed Weakness",
            Self::SpeedBuff => "Celerity",
            Self::HealOnProc => "Vitality",
            Self::ShieldOnProc => "Protection",
            Self::XpBonus => "Wisdom",
            Self::LootBonus => "Fortune",
            Self::UniqueEffect => "Unique Awakening",
            Self::DamageReduction => "Bulwark",
            Self::ArmorBonus => "Ironhide",
            Self::ThornsDamage => "Thorns",
            Self::HealthBonus => "Fortitude",
            Self::BlockChance => "Guardian's Eye",
            Self::HealthRegen => "Regeneration",
            Self::CcResistance => "Unshakable Will",
        }
    }

    /// Description template; `{}` is replaced with the rendered value
    pub fn description_format(&self) -> &'static str {
        match self {
            Self::ExtraSummon => "Summons {} additional creature(s)",
            Self::DamageBonus => "+{}% damage",
            Self::CritDamageBonus => "+{}% critical damage",
            Self::CritChanceBonus => "+{}% critical chance",
            Self::CooldownReduction => "-{}% cooldown",
            Self::DurationExtension => "+{}% duration",
            Self::RadiusBonus => "+{}% radius",
            Self::ExtraProjectile => "+{} projectile(s)",
            Self::ExtraBounce => "+{} bounce(s)",
            Self::ProcChanceBonus => "+{}% trigger chance",
            Self::ExtraStacks => "+{} stack(s) generated",
            Self::ReducedThreshold => "-{} stack(s) required",
            Self::ThresholdBonus => "+{}% to the activation threshold",
            Self::ApplySlow => "Slows targets for {}s",
            Self::ApplyVulnerability => "Targets take +{}% damage",
            Self::SpeedBuff => "+{}% movement speed for 3s",
            Self::HealOnProc => "Heals {}% max HP on trigger",
            Self::ShieldOnProc => "Shields {}% max HP for 5s",
            Self::XpBonus => "+{}% XP from kills",
            Self::LootBonus => "+{}% loot from kills",
            Self::UniqueEffect => "{}",
            Self::DamageReduction => "-{}% damage taken",
            Self::ArmorBonus => "+{}% armor",
            Self::ThornsDamage => "Reflects {}% of damage taken",
            Self::HealthBonus => "+{}% max health",
            Self::BlockChance => "+{}% block chance",
            Self::HealthRegen => "+{}% health regeneration",
            Self::CcResistance => "+{}% crowd-control resistance",
        }
    }

    /// Balance budget weight (1.0 = full power budget, lower = side grade)
    pub fn budget_weight(&self) -> f64 {
        match self {
            Self::ApplySlow => 0.8,
            Self::ApplyVulnerability => 0.9,
            Self::SpeedBuff => 0.7,
            Self::HealOnProc => 0.8,
            Self::ShieldOnProc => 0.9,
            Self::XpBonus => 0.6,
            Self::LootBonus => 0.6,
            Self::ThornsDamage => 0.8,
            Self::BlockChance => 0.9,
            Self::HealthRegen => 0.8,
            Self::CcResistance => 0.7,
            _ => 1.0,
        }
    }

    /// Default [min, max] roll range before quality scaling
    pub fn value_range(&self) -> (f64, f64) {
        match self {
            Self::ExtraSummon => (1.0, 2.0),
            Self::DamageBonus => (15.0, 35.0),
            Self::CritDamageBonus => (25.0, 50.0),
            Self::CritChanceBonus => (10.0, 20.0),
            Self::CooldownReduction => (15.0, 25.0),
            Self::DurationExtension => (20.0, 40.0),
            Self::RadiusBonus => (15.0, 35.0),
            Self::ExtraProjectile => (1.0, 2.0),
            Self::ExtraBounce => (1.0, 2.0),
            Self::ProcChanceBonus => (15.0, 25.0),
            Self::ExtraStacks => (1.0, 3.0),
            Self::ReducedThreshold => (1.0, 2.0),
            Self::ThresholdBonus => (3.0, 8.0),
            Self::ApplySlow => (1.5, 2.5),
            Self::ApplyVulnerability => (8.0, 15.0),
            Self::SpeedBuff => (15.0, 25.0),
            Self::HealOnProc => (3.0, 7.0),
            Self::ShieldOnProc => (8.0, 15.0),
            Self::XpBonus => (10.0, 20.0),
            Self::LootBonus => (8.0, 15.0),
            Self::UniqueEffect => (1.0, 1.0),
            Self::DamageReduction => (4.0, 8.0),
            Self::ArmorBonus => (10.0, 20.0),
            Self::ThornsDamage => (10.0, 20.0),
            Self::HealthBonus => (5.0, 10.0),
            Self::BlockChance => (5.0, 12.0),
            Self::HealthRegen => (10.0, 25.0),
            Self::CcResistance => (15.0, 30.0),
        }
    }

    /// Suffix appended to the ability or slot name when composing the
    /// awakening display name
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::ExtraSummon => "Reinforced",
            Self::DamageBonus => "Devastating",
            Self::CritDamageBonus => "Lethal",
            Self::CritChanceBonus => "Precise",
            Self::CooldownReduction => "Swift",
            Self::DurationExtension => "Persistent",
            Self::RadiusBonus => "Expansive",
            Self::ExtraProjectile => "Splitting",
            Self::ExtraBounce => "Ricocheting",
            Self::ProcChanceBonus => "Frequent",
            Self::ExtraStacks => "Stacking",
            Self::ReducedThreshold => "Optimal",
            Self::ThresholdBonus => "Tuned",
            Self::ApplySlow => "Binding",
            Self::ApplyVulnerability => "Piercing",
            Self::SpeedBuff => "Fleet",
            Self::HealOnProc => "Vital",
            Self::ShieldOnProc => "Warding",
            Self::XpBonus => "Sage",
            Self::LootBonus => "Fortunate",
            Self::UniqueEffect => "Unique",
            Self::DamageReduction => "Plated",
            Self::ArmorBonus => "Armored",
            Self::ThornsDamage => "Thorned",
            Self::HealthBonus => "Stalwart",
            Self::BlockChance => "Guarding",
            Self::HealthRegen => "Mending",
            Self::CcResistance => "Unyielding",
        }
    }

    /// Kinds whose rolled value is a whole count rather than a percentage
    pub fn is_integer_value(&self) -> bool {
        matches!(
            self,
            Self::ExtraSummon
                | Self::ExtraProjectile
                | Self::ExtraBounce
                | Self::ExtraStacks
                | Self::ReducedThreshold
                | Self::UniqueEffect
        )
    }

    /// Defensive kinds only appear on armor-bound awakenings
    pub fn is_defensive(&self) -> bool {
        matches!(
            self,
            Self::DamageReduction
                | Self::ArmorBonus
                | Self::ThornsDamage
                | Self::HealthBonus
                | Self::BlockChance
                | Self::HealthRegen
                | Self::CcResistance
        )
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::DamageBonus => Axis::Damage,
            Self::CritDamageBonus => Axis::CritDamage,
            Self::CritChanceBonus => Axis::CritChance,
            Self::CooldownReduction => Axis::Cooldown,
            Self::DurationExtension => Axis::Duration,
            Self::RadiusBonus => Axis::Radius,
            Self::ExtraSummon | Self::ExtraProjectile | Self::ExtraBounce | Self::ExtraStacks => {
                Axis::ExtraCount
            }
            Self::ReducedThreshold => Axis::ThresholdReduction,
            Self::ThresholdBonus => Axis::ThresholdBonus,
            Self::ProcChanceBonus => Axis::ProcChance,
            Self::ApplySlow => Axis::Slow,
            Self::ApplyVulnerability => Axis::Vulnerability,
            Self::SpeedBuff => Axis::Speed,
            Self::HealOnProc => Axis::Heal,
            Self::ShieldOnProc => Axis::Shield,
            Self::XpBonus => Axis::Xp,
            Self::LootBonus => Axis::Loot,
            Self::UniqueEffect => Axis::Unique,
            Self::DamageReduction
            | Self::ArmorBonus
            | Self::ThornsDamage
            | Self::HealthBonus
            | Self::BlockChance
            | Self::HealthRegen
            | Self::CcResistance => Axis::Passive,
        }
    }

    /// Stable identifier for item metadata and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtraSummon => "extra_summon",
            Self::DamageBonus => "damage_bonus",
            Self::CritDamageBonus => "crit_damage_bonus",
            Self::CritChanceBonus => "crit_chance_bonus",
            Self::CooldownReduction => "cooldown_reduction",
            Self::DurationExtension => "duration_extension",
            Self::RadiusBonus => "radius_bonus",
            Self::ExtraProjectile => "extra_projectile",
            Self::ExtraBounce => "extra_bounce",
            Self::ProcChanceBonus => "proc_chance_bonus",
            Self::ExtraStacks => "extra_stacks",
            Self::ReducedThreshold => "reduced_threshold",
            Self::ThresholdBonus => "threshold_bonus",
            Self::ApplySlow => "apply_slow",
            Self::ApplyVulnerability => "apply_vulnerability",
            Self::SpeedBuff => "speed_buff",
            Self::HealOnProc => "heal_on_proc",
            Self::ShieldOnProc => "shield_on_proc",
            Self::XpBonus => "xp_bonus",
            Self::LootBonus => "loot_bonus",
            Self::UniqueEffect => "unique_effect",
            Self::DamageReduction => "damage_reduction",
            Self::ArmorBonus => "armor_bonus",
            Self::ThornsDamage => "thorns_damage",
            Self::HealthBonus => "health_bonus",
            Self::BlockChance => "block_chance",
            Self::HealthRegen => "health_regen",
            Self::CcResistance => "cc_resistance",
        }
    }

    /// Parse a stable identifier back into a kind
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == id)
    }

    /// Uniform roll within the default range
    pub fn roll_value(&self, rng: &mut impl Rng) -> f64 {
        let (min, max) = self.value_range();
        min + rng.gen::<f64>() * (max - min)
    }

    /// Quality-scaled roll; quality is clamped to [0, 0.3] and may push the
    /// result slightly past the catalog max
    pub fn roll_value_with_quality(&self, quality: f64, rng: &mut impl Rng) -> f64 {
        let quality = quality.clamp(0.0, QUALITY_BONUS_MAX);
        self.roll_value(rng) * (1.0 + quality * QUALITY_VALUE_SCALE)
    }

    /// Render the description for a rolled value
    pub fn format_description(&self, value: f64) -> String {
        render_format(self.description_format(), *self, value)
    }
}

/// Substitute a rolled value into a description template.
///
/// Integer kinds render the rounded count, everything else renders with no
/// decimal places.
pub(crate) fn render_format(template: &str, kind: ModifierKind, value: f64) -> String {
    let rendered = if kind.is_integer_value() {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.0}", value)
    };
    template.replacen("{}", &rendered, 1)
}
