//! Per-cast execution context.
//!
//! Ability systems snapshot the active awakening once at cast time and pull
//! adjusted numbers through typed accessors. Every accessor is a
//! pass-through when no awakening is active, when it targets another
//! ability, or when its kind acts on a different axis, so call sites never
//! branch.

use bevy::prelude::*;

use crate::awaken::Awakening;
use crate::catalog::AbilityCatalog;
use crate::manager::AwakenManager;
use crate::modifier::Axis;
use crate::player::CharacterView;

#[derive(Debug, Clone)]
pub struct AwakenContext {
    pub ability_id: String,
    pub awakening: Option<Awakening>,
    pub target: Option<Entity>,
}

impl AwakenContext {
    /// Snapshot the active awakening for one cast.
    pub fn capture(
        manager: &AwakenManager,
        catalog: &dyn AbilityCatalog,
        character: &dyn CharacterView,
        ability_id: &str,
        target: Option<Entity>,
    ) -> Self {
        let awakening =
            manager.get_active_awakening_for_ability(catalog, character, ability_id);
        Self {
            ability_id: ability_id.to_string(),
            awakening,
            target,
        }
    }

    /// Context with no awakening; every accessor passes through
    pub fn empty(ability_id: &str) -> Self {
        Self {
            ability_id: ability_id.to_string(),
            awakening: None,
            target: None,
        }
    }

    /// The awakening, gated on actually targeting this cast's ability
    pub fn active_modifier(&self) -> Option<&Awakening> {
        self.awakening
            .as_ref()
            .filter(|a| a.target_ability.as_deref() == Some(self.ability_id.as_str()))
    }

    fn value_on(&self, axis: Axis) -> Option<f64> {
        self.active_modifier()
            .filter(|a| a.kind.axis() == axis)
            .map(|a| a.value)
    }

    fn apply(&self, axis: Axis, base: f64) -> f64 {
        match self.value_on(axis) {
            Some(value) => axis.apply(base, value),
            None => base,
        }
    }

    pub fn apply_damage(&self, base: f64) -> f64 {
        self.apply(Axis::Damage, base)
    }

    /// Crit multiplier, e.g. 1.5 becomes 1.9 under a +40 roll
    pub fn apply_crit_damage(&self, base: f64) -> f64 {
        self.apply(Axis::CritDamage, base)
    }

    /// Crit probability in [0, 1], capped at certainty
    pub fn apply_crit_chance(&self, base: f64) -> f64 {
        self.apply(Axis::CritChance, base)
    }

    pub fn apply_cooldown_ms(&self, base: u64) -> u64 {
        self.apply(Axis::Cooldown, base as f64).round() as u64
    }

    pub fn apply_duration_ms(&self, base: u64) -> u64 {
        self.apply(Axis::Duration, base as f64).round() as u64
    }

    pub fn apply_radius(&self, base: f64) -> f64 {
        self.apply(Axis::Radius, base)
    }

    /// Extra summons, projectiles, bounces or stacks
    pub fn extra_count(&self) -> u32 {
        self.value_on(Axis::ExtraCount)
            .map(|v| v.round().max(0.0) as u32)
            .unwrap_or(0)
    }

    /// Stacks shaved off an activation threshold
    pub fn threshold_reduction(&self) -> u32 {
        self.value_on(Axis::ThresholdReduction)
            .map(|v| v.round().max(0.0) as u32)
            .unwrap_or(0)
    }

    pub fn apply_threshold_bonus(&self, base: f64) -> f64 {
        self.apply(Axis::ThresholdBonus, base)
    }

    pub fn apply_proc_chance(&self, base: f64) -> f64 {
        self.apply(Axis::ProcChance, base)
    }

    /// Seconds of slow to inflict, when the awakening carries one
    pub fn slow_duration_secs(&self) -> Option<f64> {
        self.value_on(Axis::Slow)
    }

    pub fn vulnerability_fraction(&self) -> Option<f64> {
        self.value_on(Axis::Vulnerability).map(|v| v / 100.0)
    }

    pub fn speed_fraction(&self) -> Option<f64> {
        self.value_on(Axis::Speed).map(|v| v / 100.0)
    }

    pub fn heal_fraction(&self) -> Option<f64> {
        self.value_on(Axis::Heal).map(|v| v / 100.0)
    }

    pub fn shield_fraction(&self) -> Option<f64> {
        self.value_on(Axis::Shield).map(|v| v / 100.0)
    }

    pub fn xp_bonus_fraction(&self) -> f64 {
        self.value_on(Axis::Xp).map(|v| v / 100.0).unwrap_or(0.0)
    }

    pub fn loot_bonus_fraction(&self) -> f64 {
        self.value_on(Axis::Loot).map(|v| v / 100.0).unwrap_or(0.0)
    }
}
