//! Generation templates.
//!
//! A template is a weighted pool of modifier kinds plus optional per-kind
//! range and description overrides. Ability categories and armor slots each
//! get a factory-built template; hosts can register their own on top.

use rand::Rng;
use thiserror::Error;

use crate::awaken::Awakening;
use crate::catalog::AbilityDef;
use crate::constants::{QUALITY_BONUS_MAX, QUALITY_VALUE_SCALE};
use crate::modifier::{render_format, ModifierKind};
use crate::player::ArmorSlot;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template has an empty modifier pool")]
    EmptyPool,
    #[error("weight {weight} for {kind:?} must be positive and finite")]
    BadWeight { kind: ModifierKind, weight: f64 },
    #[error("override range [{min}, {max}] for {kind:?} is invalid")]
    BadRange { kind: ModifierKind, min: f64, max: f64 },
}

/// Weighted modifier pool with optional overrides.
#[derive(Debug, Clone)]
pub struct AwakenTemplate {
    /// Category the template serves; None for ability-specific overrides
    pub category: Option<String>,
    weights: Vec<(ModifierKind, f64)>,
    value_overrides: Vec<(ModifierKind, (f64, f64))>,
    description_overrides: Vec<(ModifierKind, String)>,
    display_name: Option<String>,
}

impl AwakenTemplate {
    /// Build a template from a weighted kind pool.
    ///
    /// Weights are relative, not normalized. Every weight must be positive
    /// and finite and the pool must not be empty.
    pub fn new(
        category: Option<String>,
        weights: Vec<(ModifierKind, f64)>,
    ) -> Result<Self, TemplateError> {
        if weights.is_empty() {
            return Err(TemplateError::EmptyPool);
        }
        for &(kind, weight) in &weights {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(TemplateError::BadWeight { kind, weight });
            }
        }
        Ok(Self {
            category,
            weights,
            value_overrides: Vec::new(),
            description_overrides: Vec::new(),
            display_name: None,
        })
    }

    /// Replace the roll range for one kind in this template
    pub fn with_value_override(
        mut self,
        kind: ModifierKind,
        min: f64,
        max: f64,
    ) -> Result<Self, TemplateError> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(TemplateError::BadRange { kind, min, max });
        }
        self.value_overrides.retain(|(k, _)| *k != kind);
        self.value_overrides.push((kind, (min, max)));
        Ok(self)
    }

    /// Replace the description template for one kind
    pub fn with_description(mut self, kind: ModifierKind, template: impl Into<String>) -> Self {
        self.description_overrides.retain(|(k, _)| *k != kind);
        self.description_overrides.push((kind, template.into()));
        self
    }

    /// Force a fixed display name instead of the composed one
    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = ModifierKind> + '_ {
        self.weights.iter().map(|&(kind, _)| kind)
    }

    pub fn pool_size(&self) -> usize {
        self.weights.len()
    }

    /// Weighted pick over the pool.
    ///
    /// Cumulative walk over the relative weights; if float drift keeps the
    /// roll above every threshold the last entry wins.
    pub fn select_kind(&self, rng: &mut impl Rng) -> ModifierKind {
        let total: f64 = self.weights.iter().map(|&(_, w)| w).sum();
        let roll = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        for &(kind, weight) in &self.weights {
            cumulative += weight;
            if roll < cumulative {
                return kind;
            }
        }
        self.weights[self.weights.len() - 1].0
    }

    fn range_for(&self, kind: ModifierKind) -> (f64, f64) {
        self.value_overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, range)| range)
            .unwrap_or_else(|| kind.value_range())
    }

    fn describe(&self, kind: ModifierKind, value: f64) -> String {
        match self.description_overrides.iter().find(|(k, _)| *k == kind) {
            Some((_, template)) => render_format(template, kind, value),
            None => kind.format_description(value),
        }
    }

    fn roll_value(&self, kind: ModifierKind, quality: f64, rng: &mut impl Rng) -> f64 {
        let (min, max) = self.range_for(kind);
        let quality = quality.clamp(0.0, QUALITY_BONUS_MAX);
        (min + rng.gen::<f64>() * (max - min)) * (1.0 + quality * QUALITY_VALUE_SCALE)
    }

    /// Roll a weapon-bound awakening for one ability.
    pub fn generate(&self, ability: &AbilityDef, quality: f64, rng: &mut impl Rng) -> Awakening {
        let kind = self.select_kind(rng);
        let value = self.roll_value(kind, quality, rng);
        let display_name = match &self.display_name {
            Some(name) => name.clone(),
            None => format!("{} {}", ability.name, kind.name_suffix()),
        };
        Awakening {
            id: format!("awaken_{}_{}", ability.class_id, ability.id),
            display_name,
            required_class: Some(ability.class_id.clone()),
            required_branch: ability.branch_id.clone(),
            target_ability: Some(ability.id.clone()),
            category: self.category.clone().or_else(|| Some(ability.category.clone())),
            kind,
            value,
            description: self.describe(kind, value),
            unique: kind == ModifierKind::UniqueEffect,
            payload: None,
        }
    }

    /// Roll an armor-bound awakening for one slot.
    ///
    /// Armor awakenings carry no class, branch, ability or category so they
    /// stay active on any build.
    pub fn generate_for_armor(
        &self,
        slot: ArmorSlot,
        quality: f64,
        rng: &mut impl Rng,
    ) -> Awakening {
        let kind = self.select_kind(rng);
        let value = self.roll_value(kind, quality, rng);
        let display_name = match &self.display_name {
            Some(name) => name.clone(),
            None => format!("{} {}", slot.display_name(), kind.name_suffix()),
        };
        Awakening {
            id: format!("awaken_armor_{}", slot.as_str()),
            display_name,
            required_class: None,
            required_branch: None,
            target_ability: None,
            category: None,
            kind,
            value,
            description: self.describe(kind, value),
            unique: kind == ModifierKind::UniqueEffect,
            payload: None,
        }
    }
}

// Factory templates. Struct literals keep these infallible; the weights
// mirror the tuning baseline for each ability category.

fn template(category: &str, weights: Vec<(ModifierKind, f64)>) -> AwakenTemplate {
    AwakenTemplate {
        category: Some(category.to_string()),
        weights,
        value_overrides: Vec::new(),
        description_overrides: Vec::new(),
        display_name: None,
    }
}

pub fn for_summon() -> AwakenTemplate {
    template(
        "summon",
        vec![
            (ModifierKind::ExtraSummon, 1.5),
            (ModifierKind::DamageBonus, 1.0),
            (ModifierKind::DurationExtension, 0.8),
            (ModifierKind::CooldownReduction, 0.7),
        ],
    )
}

pub fn for_damage() -> AwakenTemplate {
    template(
        "damage",
        vec![
            (ModifierKind::DamageBonus, 1.2),
            (ModifierKind::CritDamageBonus, 1.0),
            (ModifierKind::CritChanceBonus, 0.8),
            (ModifierKind::ApplyVulnerability, 0.6),
        ],
    )
}

pub fn for_projectile() -> AwakenTemplate {
    template(
        "projectile",
        vec![
            (ModifierKind::ExtraProjectile, 1.2),
            (ModifierKind::ExtraBounce, 1.0),
            (ModifierKind::DamageBonus, 0.8),
            (ModifierKind::ProcChanceBonus, 0.6),
        ],
    )
}

pub fn for_aoe() -> AwakenTemplate {
    template(
        "aoe",
        vec![
            (ModifierKind::RadiusBonus, 1.2),
            (ModifierKind::DamageBonus, 1.0),
            (ModifierKind::DurationExtension, 0.8),
            (ModifierKind::CooldownReduction, 0.7),
        ],
    )
}

pub fn for_dot() -> AwakenTemplate {
    template(
        "dot",
        vec![
            (ModifierKind::DurationExtension, 1.2),
            (ModifierKind::DamageBonus, 1.0),
            (ModifierKind::ExtraStacks, 0.9),
            (ModifierKind::ProcChanceBonus, 0.7),
        ],
    )
}

pub fn for_stack() -> AwakenTemplate {
    template(
        "stack",
        vec![
            (ModifierKind::ExtraStacks, 1.3),
            (ModifierKind::ReducedThreshold, 1.0),
            (ModifierKind::DurationExtension, 0.8),
            (ModifierKind::DamageBonus, 0.6),
        ],
    )
}

pub fn for_control() -> AwakenTemplate {
    template(
        "control",
        vec![
            (ModifierKind::DurationExtension, 1.2),
            (ModifierKind::RadiusBonus, 1.0),
            (ModifierKind::CooldownReduction, 0.8),
            (ModifierKind::ApplySlow, 0.6),
        ],
    )
}

pub fn for_defensive() -> AwakenTemplate {
    template(
        "defensive",
        vec![
            (ModifierKind::ShieldOnProc, 1.2),
            (ModifierKind::HealOnProc, 1.0),
            (ModifierKind::DurationExtension, 0.8),
            (ModifierKind::CooldownReduction, 0.7),
        ],
    )
}

/// Ultimates keep the standard offensive pool but roll wider cooldown and
/// damage ranges.
pub fn for_ultimate() -> AwakenTemplate {
    let mut t = template(
        "ultimate",
        vec![
            (ModifierKind::CooldownReduction, 1.3),
            (ModifierKind::DurationExtension, 1.1),
            (ModifierKind::DamageBonus, 1.0),
            (ModifierKind::RadiusBonus, 0.8),
        ],
    );
    t.value_overrides.push((ModifierKind::CooldownReduction, (20.0, 30.0)));
    t.value_overrides.push((ModifierKind::DamageBonus, (20.0, 40.0)));
    t
}

pub fn for_generic() -> AwakenTemplate {
    template(
        "generic",
        vec![
            (ModifierKind::DamageBonus, 1.0),
            (ModifierKind::CooldownReduction, 0.9),
            (ModifierKind::DurationExtension, 0.8),
            (ModifierKind::ProcChanceBonus, 0.7),
        ],
    )
}

pub fn for_helmet() -> AwakenTemplate {
    template(
        "helmet",
        vec![
            (ModifierKind::CcResistance, 1.1),
            (ModifierKind::HealthBonus, 1.0),
            (ModifierKind::HealthRegen, 0.9),
            (ModifierKind::BlockChance, 0.7),
        ],
    )
}

pub fn for_chestplate() -> AwakenTemplate {
    template(
        "chestplate",
        vec![
            (ModifierKind::DamageReduction, 1.2),
            (ModifierKind::ArmorBonus, 1.0),
            (ModifierKind::HealthBonus, 0.9),
            (ModifierKind::ThornsDamage, 0.7),
        ],
    )
}

pub fn for_leggings() -> AwakenTemplate {
    template(
        "leggings",
        vec![
            (ModifierKind::HealthRegen, 1.1),
            (ModifierKind::DamageReduction, 1.0),
            (ModifierKind::HealthBonus, 0.9),
            (ModifierKind::ShieldOnProc, 0.7),
        ],
    )
}

pub fn for_boots() -> AwakenTemplate {
    template(
        "boots",
        vec![
            (ModifierKind::SpeedBuff, 1.2),
            (ModifierKind::BlockChance, 1.0),
            (ModifierKind::CcResistance, 0.8),
            (ModifierKind::HealOnProc, 0.7),
        ],
    )
}

pub fn for_generic_armor() -> AwakenTemplate {
    template(
        "armor",
        vec![
            (ModifierKind::DamageReduction, 1.0),
            (ModifierKind::HealthBonus, 0.9),
            (ModifierKind::ArmorBonus, 0.8),
            (ModifierKind::HealthRegen, 0.7),
        ],
    )
}
