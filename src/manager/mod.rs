//! Awakening lifecycle: generation odds, item persistence, activation.
//!
//! The manager owns the tuning config and a shared registry handle. All
//! host interaction flows through the catalog/store/character traits so the
//! same code serves the live game, tests and offline tooling.
//!
//! Branch, display name and effect category are never persisted; `read`
//! re-derives them from the live catalog so renames and rebalances reach
//! items already in circulation.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::awaken::Awakening;
use crate::catalog::{AbilityCatalog, AbilityDef};
use crate::config::AwakenConfig;
use crate::constants::{
    CONFIG_PATH, FALLBACK_DISPLAY_NAME, KEY_AWAKEN_ABILITY, KEY_AWAKEN_CLASS, KEY_AWAKEN_DESC,
    KEY_AWAKEN_ID, KEY_AWAKEN_KIND, KEY_AWAKEN_VALUE,
};
use crate::modifier::ModifierKind;
use crate::player::{ArmorSlot, CharacterView};
use crate::rarity::Rarity;
use crate::registry::AwakenRegistry;
use crate::store::{MetadataError, MetadataStore};

/// Fired by host systems after an item rolled an awakening.
#[derive(Event, Debug, Clone)]
pub struct AwakeningGeneratedEvent {
    pub item_id: String,
    pub awakening: Awakening,
}

/// Snapshot of the manager for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AwakenStats {
    pub enabled: bool,
    pub template_count: usize,
    pub override_count: usize,
    pub armor_template_count: usize,
    pub cached_items: usize,
    pub chance_by_rarity: HashMap<Rarity, f64>,
}

#[derive(Debug, Resource)]
pub struct AwakenManager {
    config: AwakenConfig,
    registry: Arc<AwakenRegistry>,
    cache: HashMap<String, Awakening>,
}

impl AwakenManager {
    pub fn new(config: AwakenConfig, registry: Arc<AwakenRegistry>) -> Self {
        Self {
            config,
            registry,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AwakenConfig {
        &self.config
    }

    /// Swap the tuning config, used by the hot reload path
    pub fn set_config(&mut self, config: AwakenConfig) {
        self.config = config;
    }

    pub fn registry(&self) -> &AwakenRegistry {
        &self.registry
    }

    /// Chance that a drop of this rarity rolls an awakening.
    ///
    /// Values above 1.0 simply mean guaranteed; callers draw a uniform roll
    /// against the result.
    pub fn generation_chance(&self, rarity: Rarity, tier: u32, luck_bonus: f64) -> f64 {
        let tier = tier.min(self.config.tier_cap) as f64;
        (self.config.chance_for(rarity) + tier * self.config.tier_chance_bonus)
            * (1.0 + luck_bonus)
    }

    pub fn should_generate(
        &self,
        rarity: Rarity,
        tier: u32,
        luck_bonus: f64,
        rng: &mut impl Rng,
    ) -> bool {
        if !self.config.enabled {
            return false;
        }
        rng.gen::<f64>() < self.generation_chance(rarity, tier, luck_bonus)
    }

    pub fn generate(&self, ability: &AbilityDef, quality: f64, rng: &mut impl Rng) -> Awakening {
        let awakening = self.registry.generate(ability, quality, rng);
        debug!(
            ability = %ability.id,
            kind = awakening.kind.as_str(),
            value = awakening.value,
            "rolled awakening"
        );
        awakening
    }

    /// Roll against a uniformly random ability from the live catalog.
    ///
    /// Picks a class first so classes with small kits are not underweighted.
    /// Quality is drawn from the rarity's cap. None when the catalog is
    /// empty.
    pub fn generate_random(
        &self,
        catalog: &dyn AbilityCatalog,
        rarity: Rarity,
        rng: &mut impl Rng,
    ) -> Option<Awakening> {
        let classes = catalog.class_ids();
        if classes.is_empty() {
            return None;
        }
        let class_id = classes[rng.gen_range(0..classes.len())];
        let abilities = catalog.abilities_for_class(class_id);
        if abilities.is_empty() {
            return None;
        }
        let ability = abilities[rng.gen_range(0..abilities.len())];
        let quality = rarity.roll_quality(rng);
        Some(self.generate(ability, quality, rng))
    }

    pub fn generate_for_armor(
        &self,
        slot: ArmorSlot,
        quality: f64,
        rng: &mut impl Rng,
    ) -> Awakening {
        self.registry.generate_for_armor(slot, quality, rng)
    }

    /// Write the awakening onto an item, replacing any previous one.
    ///
    /// Only the scalar facts go to the store; empty strings stand in for
    /// absent class and ability so armor awakenings round-trip.
    pub fn persist(&self, store: &mut dyn MetadataStore, awakening: &Awakening) {
        store.set_str(KEY_AWAKEN_ID, &awakening.id);
        store.set_str(
            KEY_AWAKEN_CLASS,
            awakening.required_class.as_deref().unwrap_or(""),
        );
        store.set_str(
            KEY_AWAKEN_ABILITY,
            awakening.target_ability.as_deref().unwrap_or(""),
        );
        store.set_str(KEY_AWAKEN_KIND, awakening.kind.as_str());
        store.set_f64(KEY_AWAKEN_VALUE, awakening.value);
        store.set_str(KEY_AWAKEN_DESC, &awakening.description);
        debug!(item = store.item_id(), id = %awakening.id, "persisted awakening");
    }

    /// Reconstruct the awakening stored on an item.
    ///
    /// None when the item has no awakening. Corrupt metadata logs one
    /// warning with the item id and also reads as None.
    pub fn read(
        &self,
        catalog: &dyn AbilityCatalog,
        store: &dyn MetadataStore,
    ) -> Option<Awakening> {
        let id = store.get_str(KEY_AWAKEN_ID)?;
        match parse_stored(catalog, store, id) {
            Ok(awakening) => Some(awakening),
            Err(err) => {
                warn!(item = store.item_id(), error = %err, "corrupt awakening metadata, ignoring");
                None
            }
        }
    }

    pub fn has_awakening(&self, store: &dyn MetadataStore) -> bool {
        store.contains(KEY_AWAKEN_ID)
    }

    /// Strip the awakening from an item
    pub fn clear(&self, store: &mut dyn MetadataStore) {
        for key in [
            KEY_AWAKEN_ID,
            KEY_AWAKEN_CLASS,
            KEY_AWAKEN_ABILITY,
            KEY_AWAKEN_KIND,
            KEY_AWAKEN_VALUE,
            KEY_AWAKEN_DESC,
        ] {
            store.remove(key);
        }
    }

    /// Whether the wearer currently benefits from the awakening.
    ///
    /// Armor-bound awakenings are always on. Weapon-bound ones need a build
    /// that satisfies every constraint; no build means inactive.
    pub fn is_active(&self, character: &dyn CharacterView, awakening: &Awakening) -> bool {
        if awakening.is_armor_bound() {
            return true;
        }
        match character.build() {
            Some(build) => awakening.matches_build(build),
            None => false,
        }
    }

    /// The main-hand awakening, only when active
    pub fn get_active_awakening(
        &self,
        catalog: &dyn AbilityCatalog,
        character: &dyn CharacterView,
    ) -> Option<Awakening> {
        let store = character.main_hand()?;
        let awakening = self.read(catalog, store)?;
        self.is_active(character, &awakening).then_some(awakening)
    }

    /// First active awakening targeting the given ability, main hand first
    /// then armor slots in order
    pub fn get_active_awakening_for_ability(
        &self,
        catalog: &dyn AbilityCatalog,
        character: &dyn CharacterView,
        ability_id: &str,
    ) -> Option<Awakening> {
        let mut stores: Vec<&dyn MetadataStore> = Vec::with_capacity(5);
        if let Some(store) = character.main_hand() {
            stores.push(store);
        }
        for slot in ArmorSlot::ALL {
            if let Some(store) = character.armor_piece(slot) {
                stores.push(store);
            }
        }
        for store in stores {
            if let Some(awakening) = self.read(catalog, store) {
                if awakening.target_ability.as_deref() == Some(ability_id)
                    && self.is_active(character, &awakening)
                {
                    return Some(awakening);
                }
            }
        }
        None
    }

    /// Armor-bound awakenings across every equipped piece, slot order
    pub fn get_active_armor_awakenings(
        &self,
        catalog: &dyn AbilityCatalog,
        character: &dyn CharacterView,
    ) -> Vec<Awakening> {
        let mut found = Vec::new();
        for slot in ArmorSlot::ALL {
            if let Some(store) = character.armor_piece(slot) {
                if let Some(awakening) = self.read(catalog, store) {
                    if awakening.is_armor_bound() {
                        found.push(awakening);
                    }
                }
            }
        }
        found
    }

    /// Additive per-kind sum over all equipped armor awakenings
    pub fn aggregated_armor_bonuses(
        &self,
        catalog: &dyn AbilityCatalog,
        character: &dyn CharacterView,
    ) -> HashMap<ModifierKind, f64> {
        let mut totals = HashMap::new();
        for awakening in self.get_active_armor_awakenings(catalog, character) {
            *totals.entry(awakening.kind).or_insert(0.0) += awakening.value;
        }
        totals
    }

    /// Read-through cache keyed by item id.
    ///
    /// Misses (no awakening, corrupt data) are not cached so a later fix on
    /// the item is picked up.
    pub fn read_cached(
        &mut self,
        catalog: &dyn AbilityCatalog,
        store: &dyn MetadataStore,
    ) -> Option<Awakening> {
        let item_id = store.item_id().to_string();
        if let Some(hit) = self.cache.get(&item_id) {
            return Some(hit.clone());
        }
        let awakening = self.read(catalog, store)?;
        self.cache.insert(item_id, awakening.clone());
        Some(awakening)
    }

    pub fn invalidate(&mut self, item_id: &str) {
        self.cache.remove(item_id);
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_items(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&self) -> AwakenStats {
        AwakenStats {
            enabled: self.config.enabled,
            template_count: self.registry.category_count(),
            override_count: self.registry.override_count(),
            armor_template_count: self.registry.armor_template_count(),
            cached_items: self.cache.len(),
            chance_by_rarity: self.config.chance_by_rarity.clone(),
        }
    }
}

fn parse_stored(
    catalog: &dyn AbilityCatalog,
    store: &dyn MetadataStore,
    id: String,
) -> Result<Awakening, MetadataError> {
    let kind_id = store
        .get_str(KEY_AWAKEN_KIND)
        .ok_or(MetadataError::MissingKey(KEY_AWAKEN_KIND))?;
    let kind = ModifierKind::parse(&kind_id).ok_or(MetadataError::UnknownKind(kind_id))?;
    let value = store
        .get_f64(KEY_AWAKEN_VALUE)
        .ok_or(MetadataError::BadValue { key: KEY_AWAKEN_VALUE })?;
    if !value.is_finite() {
        return Err(MetadataError::BadValue { key: KEY_AWAKEN_VALUE });
    }

    let required_class = store.get_str(KEY_AWAKEN_CLASS).filter(|s| !s.is_empty());
    let target_ability = store.get_str(KEY_AWAKEN_ABILITY).filter(|s| !s.is_empty());

    // Live-catalog re-derivation. An unknown ability is not corrupt, the
    // catalog may simply have moved on; the awakening keeps fallback
    // display data and deactivates through the build check instead.
    let (display_name, required_branch, category) =
        match target_ability.as_deref().and_then(|aid| catalog.ability(aid)) {
            Some(def) => (
                format!("{} {}", def.name, kind.name_suffix()),
                def.branch_id.clone(),
                Some(def.category.clone()),
            ),
            None => (FALLBACK_DISPLAY_NAME.to_string(), None, None),
        };

    let description = store
        .get_str(KEY_AWAKEN_DESC)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| kind.format_description(value));

    Ok(Awakening {
        id,
        display_name,
        required_class,
        required_branch,
        target_ability,
        category,
        kind,
        value,
        description,
        unique: kind == ModifierKind::UniqueEffect,
        payload: None,
    })
}

/// Inserts the config and manager resources and registers the generation
/// event. Template registration beyond the defaults happens through
/// `ResMut<AwakenManager>` in host startup systems.
pub struct AwakenPlugin;

impl Plugin for AwakenPlugin {
    fn build(&self, app: &mut App) {
        let config = AwakenConfig::load_or_default(CONFIG_PATH);
        let registry = Arc::new(AwakenRegistry::with_defaults());
        app.insert_resource(config.clone())
            .insert_resource(AwakenManager::new(config, registry))
            .add_event::<AwakeningGeneratedEvent>()
            .add_systems(Update, log_generated_awakenings);
    }
}

fn log_generated_awakenings(mut events: EventReader<AwakeningGeneratedEvent>) {
    for event in events.read() {
        debug!(
            item = %event.item_id,
            name = %event.awakening.display_name,
            kind = event.awakening.kind.as_str(),
            "awakening generated"
        );
    }
}
