//! Demo binary: wires the engine into a headless Bevy app, then walks one
//! item through the full lifecycle (roll, persist, read, activate, lore)
//! and prints a distribution audit.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use bevy::prelude::*;

use awakening_core::balance::{sample_template_distribution, SampleConfig};
use awakening_core::catalog::{AbilityCatalog, AbilityDef, StaticAbilityCatalog};
use awakening_core::config::AwakenConfig;
use awakening_core::constants::CONFIG_PATH;
use awakening_core::context::AwakenContext;
use awakening_core::hotreload::{HotReloadPlugin, HotReloadState, HotReloadStatus};
use awakening_core::logging::{self, LoggingPlugin, TimingSpan};
use awakening_core::lore;
use awakening_core::manager::{AwakenManager, AwakenPlugin};
use awakening_core::player::{ArmorSlot, CharacterView, PlayerBuild, SimpleCharacter};
use awakening_core::rarity::Rarity;
use awakening_core::registry::AwakenRegistry;
use awakening_core::seed::WorldSeed;
use awakening_core::store::MemoryStore;

fn demo_catalog() -> StaticAbilityCatalog {
    StaticAbilityCatalog::new()
        .with_ability(
            AbilityDef::new("fireball", "Fireball", "mage", "projectile", 0).with_branch("fire"),
        )
        .with_ability(
            AbilityDef::new("meteor", "Meteor", "mage", "ultimate", 3).with_branch("fire"),
        )
        .with_ability(AbilityDef::new("cleave", "Cleave", "warrior", "damage", 0))
        .with_ability(AbilityDef::new("war_banner", "War Banner", "warrior", "summon", 2))
        .with_ability(AbilityDef::new("raise_dead", "Raise Dead", "occultist", "summon", 0))
        .with_ability(AbilityDef::new("soul_harvest", "Soul Harvest", "occultist", "stack", 1))
}

fn main() -> Result<()> {
    logging::init_tracing_default();

    // Headless smoke run of the plugin wiring
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LoggingPlugin)
        .add_plugins(AwakenPlugin)
        .add_plugins(HotReloadPlugin);
    app.update();
    let reload = HotReloadStatus::from_state(app.world().resource::<HotReloadState>());
    info!(enabled = reload.enabled, "hot reload state after startup");

    // Standalone lifecycle demo, no App required
    let catalog = demo_catalog();
    let registry = Arc::new(AwakenRegistry::with_defaults());
    let config = AwakenConfig::load_or_default(CONFIG_PATH);
    let mut manager = AwakenManager::new(config, registry);

    let world_seed = WorldSeed::new(2024);
    let mut rng = world_seed.item_rng("demo_staff");

    // How often would a tier-23 legendary drop awaken?
    let chance = manager.generation_chance(Rarity::Legendary, 23, 0.15);
    info!("legendary awakening odds at tier 23: {:.1}%", chance * 100.0);

    // Roll a weapon awakening and persist it
    let ability = catalog.ability("fireball").context("demo catalog is missing fireball")?;
    let quality = Rarity::Legendary.roll_quality(&mut rng);
    let awakening = manager.generate(ability, quality, &mut rng);
    let mut staff = MemoryStore::new("demo_staff");
    manager.persist(&mut staff, &awakening);

    // Equip it and read it back through the activation path
    let mut character = SimpleCharacter::new().with_build(
        PlayerBuild::new("mage").with_branch("fire").with_ability("fireball"),
    );
    character.equip_main_hand(staff);

    let active = manager
        .get_active_awakening(&catalog, &character)
        .context("persisted awakening should read back active")?;
    let state = lore::resolve_state(character.build(), &active);
    for line in lore::build_lore(&active, &state, Some(&ability.name)) {
        info!("{}", line);
    }

    // Armor pieces aggregate passively
    for (slot, item_id) in [
        (ArmorSlot::Chestplate, "demo_chest"),
        (ArmorSlot::Boots, "demo_boots"),
    ] {
        let mut piece_rng = world_seed.item_rng(item_id);
        let piece_quality = Rarity::Epic.roll_quality(&mut piece_rng);
        let armor_awakening = manager.generate_for_armor(slot, piece_quality, &mut piece_rng);
        let mut store = MemoryStore::new(item_id);
        manager.persist(&mut store, &armor_awakening);
        character.equip_armor(slot, store);
    }
    for (kind, total) in manager.aggregated_armor_bonuses(&catalog, &character) {
        info!("armor bonus: {} +{:.1}", kind.as_str(), total);
    }

    // Cast-time context
    let ctx = AwakenContext::capture(&manager, &catalog, &character, "fireball", None);
    info!(
        "fireball cast: damage {:.1}, cooldown {}ms, extra {}",
        ctx.apply_damage(100.0),
        ctx.apply_cooldown_ms(8_000),
        ctx.extra_count()
    );

    // Cached re-reads for hot paths
    if let Some(store) = character.main_hand() {
        let _ = manager.read_cached(&catalog, store);
    }

    // Distribution audit over the ability's template
    {
        let _span = TimingSpan::new("distribution_audit");
        let report = sample_template_distribution(
            manager.registry().template_for(ability),
            ability,
            &SampleConfig {
                samples: 50_000,
                base_seed: world_seed.item_seed("audit"),
                quality: 0.15,
            },
        );
        for entry in &report.entries {
            info!(
                "sampled {}: {:.1}% share, mean {:.1}",
                entry.kind.as_str(),
                entry.share * 100.0,
                entry.mean_value
            );
        }
    }

    let stats = serde_json::to_string_pretty(&manager.stats())?;
    info!("manager stats:\n{}", stats);

    Ok(())
}
