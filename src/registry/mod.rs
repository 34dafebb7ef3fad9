//! Template registry.
//!
//! Resolution order for weapon rolls is ability override, then category
//! template, then the generic fallback; armor rolls resolve per slot with
//! their own fallback. [`AwakenRegistry::with_defaults`] wires the factory
//! templates for every built-in category and slot.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use crate::awaken::Awakening;
use crate::catalog::AbilityDef;
use crate::player::ArmorSlot;
use crate::template::{self, AwakenTemplate};

#[derive(Debug, Resource)]
pub struct AwakenRegistry {
    by_category: HashMap<String, AwakenTemplate>,
    by_ability: HashMap<String, AwakenTemplate>,
    armor: HashMap<ArmorSlot, AwakenTemplate>,
    weapon_fallback: AwakenTemplate,
    armor_fallback: AwakenTemplate,
}

impl Default for AwakenRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AwakenRegistry {
    /// Empty registry; everything resolves to the generic fallbacks
    pub fn new() -> Self {
        Self {
            by_category: HashMap::new(),
            by_ability: HashMap::new(),
            armor: HashMap::new(),
            weapon_fallback: template::for_generic(),
            armor_fallback: template::for_generic_armor(),
        }
    }

    /// Registry with the factory template for every built-in category and
    /// armor slot
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_template("summon", template::for_summon());
        registry.register_template("damage", template::for_damage());
        registry.register_template("projectile", template::for_projectile());
        registry.register_template("aoe", template::for_aoe());
        registry.register_template("dot", template::for_dot());
        registry.register_template("stack", template::for_stack());
        registry.register_template("control", template::for_control());
        registry.register_template("defensive", template::for_defensive());
        registry.register_template("ultimate", template::for_ultimate());
        registry.register_armor_template(ArmorSlot::Helmet, template::for_helmet());
        registry.register_armor_template(ArmorSlot::Chestplate, template::for_chestplate());
        registry.register_armor_template(ArmorSlot::Leggings, template::for_leggings());
        registry.register_armor_template(ArmorSlot::Boots, template::for_boots());
        registry
    }

    pub fn register_template(&mut self, category: impl Into<String>, template: AwakenTemplate) {
        self.by_category.insert(category.into(), template);
    }

    /// Ability-specific override; wins over the category template
    pub fn register_override(&mut self, ability_id: impl Into<String>, template: AwakenTemplate) {
        self.by_ability.insert(ability_id.into(), template);
    }

    pub fn register_armor_template(&mut self, slot: ArmorSlot, template: AwakenTemplate) {
        self.armor.insert(slot, template);
    }

    pub fn template_for(&self, ability: &AbilityDef) -> &AwakenTemplate {
        if let Some(t) = self.by_ability.get(&ability.id) {
            return t;
        }
        self.by_category
            .get(&ability.category)
            .unwrap_or(&self.weapon_fallback)
    }

    pub fn template_for_armor(&self, slot: ArmorSlot) -> &AwakenTemplate {
        self.armor.get(&slot).unwrap_or(&self.armor_fallback)
    }

    pub fn generate(&self, ability: &AbilityDef, quality: f64, rng: &mut impl Rng) -> Awakening {
        self.template_for(ability).generate(ability, quality, rng)
    }

    pub fn generate_for_armor(
        &self,
        slot: ArmorSlot,
        quality: f64,
        rng: &mut impl Rng,
    ) -> Awakening {
        self.template_for_armor(slot).generate_for_armor(slot, quality, rng)
    }

    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }

    pub fn override_count(&self) -> usize {
        self.by_ability.len()
    }

    pub fn armor_template_count(&self) -> usize {
        self.armor.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierKind;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn decoy() -> AbilityDef {
        AbilityDef::new("decoy", "Shadow Decoy", "rogue", "summon", 2)
    }

    #[test]
    fn test_defaults_cover_all_categories_and_slots() {
        let registry = AwakenRegistry::with_defaults();
        assert_eq!(registry.category_count(), 9);
        assert_eq!(registry.armor_template_count(), 4);
        assert_eq!(registry.override_count(), 0);

        let mut categories: Vec<&str> = registry.categories().collect();
        categories.sort_unstable();
        assert_eq!(
            categories,
            vec![
                "aoe", "control", "damage", "defensive", "dot", "projectile", "stack", "summon",
                "ultimate"
            ]
        );
    }

    #[test]
    fn test_category_resolution() {
        let registry = AwakenRegistry::with_defaults();
        let t = registry.template_for(&decoy());
        assert_eq!(t.category.as_deref(), Some("summon"));
    }

    #[test]
    fn test_override_wins_over_category() {
        let mut registry = AwakenRegistry::with_defaults();
        let special = AwakenTemplate::new(None, vec![(ModifierKind::UniqueEffect, 1.0)])
            .unwrap()
            .named("Echo of the Void");
        registry.register_override("decoy", special);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let awakening = registry.generate(&decoy(), 0.0, &mut rng);
        assert_eq!(awakening.display_name, "Echo of the Void");
        assert_eq!(awakening.kind, ModifierKind::UniqueEffect);
    }

    #[test]
    fn test_unknown_category_falls_back_to_generic() {
        let registry = AwakenRegistry::with_defaults();
        let odd = AbilityDef::new("warp", "Warp", "mage", "mobility", 1);
        let t = registry.template_for(&odd);
        assert_eq!(t.category.as_deref(), Some("generic"));
    }

    #[test]
    fn test_empty_registry_still_generates() {
        let registry = AwakenRegistry::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let weapon = registry.generate(&decoy(), 0.0, &mut rng);
        assert!(weapon.is_weapon_bound());
        let armor = registry.generate_for_armor(ArmorSlot::Helmet, 0.0, &mut rng);
        assert!(armor.is_armor_bound());
    }
}
