//! Edge case & boundary tests
//!
//! Behavior at system boundaries:
//! - Corrupt item metadata → reads as None, never panics
//! - Maximum values (u32::MAX tiers, u64::MAX seeds, huge luck)
//! - Zero / minimum boundary values
//! - Unknown identifiers (kinds, abilities, categories)
//! - Template construction limits (empty pools, bad weights, bad ranges)
//! - Config files that are missing, malformed or out of band

use std::sync::Arc;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use awakening_core::awaken::Awakening;
use awakening_core::catalog::{AbilityCatalog, AbilityDef, StaticAbilityCatalog};
use awakening_core::config::AwakenConfig;
use awakening_core::constants::{
    FALLBACK_AWAKENING_CHANCE, FALLBACK_DISPLAY_NAME, KEY_AWAKEN_ABILITY, KEY_AWAKEN_CLASS,
    KEY_AWAKEN_ID, KEY_AWAKEN_KIND, KEY_AWAKEN_VALUE,
};
use awakening_core::context::AwakenContext;
use awakening_core::lore::{build_lore, resolve_state, ActivationState};
use awakening_core::manager::AwakenManager;
use awakening_core::modifier::ModifierKind;
use awakening_core::player::{ArmorSlot, PlayerBuild, SimpleCharacter};
use awakening_core::rarity::Rarity;
use awakening_core::registry::AwakenRegistry;
use awakening_core::store::{MemoryStore, MetadataStore};
use awakening_core::template::{AwakenTemplate, TemplateError};

// ============================================================
// Helpers
// ============================================================

fn manager() -> AwakenManager {
    AwakenManager::new(
        AwakenConfig::default(),
        Arc::new(AwakenRegistry::with_defaults()),
    )
}

fn demo_catalog() -> StaticAbilityCatalog {
    StaticAbilityCatalog::new()
        .with_ability(
            AbilityDef::new("fireball", "Fireball", "mage", "projectile", 0).with_branch("fire"),
        )
        .with_ability(AbilityDef::new("cleave", "Cleave", "warrior", "damage", 0))
}

fn persisted_fireball(m: &AwakenManager, seed: u64) -> MemoryStore {
    let catalog = demo_catalog();
    let ability = catalog.ability("fireball").expect("demo ability exists");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let awakening = m.generate(ability, 0.1, &mut rng);
    let mut store = MemoryStore::new("edge_staff");
    m.persist(&mut store, &awakening);
    store
}

// ============================================================
// 1. Corrupt item metadata
// ============================================================

#[test]
fn corrupt_unknown_kind_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 1);
    store.set_str(KEY_AWAKEN_KIND, "searing_nonsense");
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_empty_kind_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 2);
    store.set_str(KEY_AWAKEN_KIND, "");
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_missing_kind_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 3);
    store.remove(KEY_AWAKEN_KIND);
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_missing_value_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 4);
    store.remove(KEY_AWAKEN_VALUE);
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_nan_value_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 5);
    store.set_f64(KEY_AWAKEN_VALUE, f64::NAN);
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_infinite_value_reads_none() {
    let m = manager();
    let mut store = persisted_fireball(&m, 6);
    store.set_f64(KEY_AWAKEN_VALUE, f64::INFINITY);
    assert!(m.read(&demo_catalog(), &store).is_none());
}

#[test]
fn corrupt_item_never_reports_active() {
    let m = manager();
    let mut store = persisted_fireball(&m, 7);
    store.set_str(KEY_AWAKEN_KIND, "broken");

    let mut character = SimpleCharacter::new().with_build(
        PlayerBuild::new("mage").with_branch("fire").with_ability("fireball"),
    );
    character.equip_main_hand(store);

    assert!(m.get_active_awakening(&demo_catalog(), &character).is_none());
    assert!(m
        .get_active_awakening_for_ability(&demo_catalog(), &character, "fireball")
        .is_none());
}

#[test]
fn id_key_alone_is_still_corrupt() {
    let m = manager();
    let mut store = MemoryStore::new("half_written");
    store.set_str(KEY_AWAKEN_ID, "awaken_mage_fireball");
    // no kind, no value
    assert!(m.has_awakening(&store));
    assert!(m.read(&demo_catalog(), &store).is_none());
}

// ============================================================
// 2. Unknown identifiers
// ============================================================

#[test]
fn unknown_stored_ability_falls_back_to_plain_name() {
    let m = manager();
    let mut store = persisted_fireball(&m, 8);
    store.set_str(KEY_AWAKEN_ABILITY, "ability_deleted_in_patch_9");

    let read = m.read(&demo_catalog(), &store).expect("scalar facts are intact");
    assert_eq!(read.display_name, FALLBACK_DISPLAY_NAME);
    assert!(read.required_branch.is_none());
    assert!(read.category.is_none());
    assert_eq!(read.target_ability.as_deref(), Some("ability_deleted_in_patch_9"));
}

#[test]
fn unknown_stored_ability_cannot_activate() {
    let m = manager();
    let mut store = persisted_fireball(&m, 9);
    store.set_str(KEY_AWAKEN_ABILITY, "ability_deleted_in_patch_9");

    let mut character = SimpleCharacter::new().with_build(
        PlayerBuild::new("mage").with_branch("fire").with_ability("fireball"),
    );
    character.equip_main_hand(store);
    assert!(m.get_active_awakening(&demo_catalog(), &character).is_none());
}

#[test]
fn unknown_category_generates_from_generic_pool() {
    let m = manager();
    let odd = AbilityDef::new("blink", "Blink", "mage", "mobility", 1);
    let pool: Vec<ModifierKind> = m.registry().template_for(&odd).kinds().collect();

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(10);
    for _ in 0..50 {
        let awakening = m.generate(&odd, 0.0, &mut rng);
        assert!(pool.contains(&awakening.kind));
        assert_eq!(awakening.id, "awaken_mage_blink");
    }
}

#[test]
fn empty_catalog_random_generation_is_none() {
    let m = manager();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    assert!(m
        .generate_random(&StaticAbilityCatalog::new(), Rarity::Exalted, &mut rng)
        .is_none());
}

#[test]
fn empty_class_string_in_store_means_unbound() {
    let m = manager();
    let mut store = persisted_fireball(&m, 12);
    store.set_str(KEY_AWAKEN_CLASS, "");
    store.set_str(KEY_AWAKEN_ABILITY, "");

    let read = m.read(&demo_catalog(), &store).expect("still readable");
    assert!(read.is_armor_bound());
    assert!(read.required_class.is_none());
    assert!(read.target_ability.is_none());
}

// ============================================================
// 3. Template construction limits
// ============================================================

#[test]
fn empty_pool_is_rejected() {
    assert_eq!(
        AwakenTemplate::new(Some("empty".into()), vec![]).unwrap_err(),
        TemplateError::EmptyPool
    );
}

#[test]
fn non_positive_and_non_finite_weights_are_rejected() {
    for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = AwakenTemplate::new(None, vec![(ModifierKind::DamageBonus, weight)])
            .expect_err("weight must be positive and finite");
        assert!(matches!(err, TemplateError::BadWeight { .. }), "weight {weight} slipped through");
    }
}

#[test]
fn inverted_and_non_finite_override_ranges_are_rejected() {
    let t = AwakenTemplate::new(None, vec![(ModifierKind::DamageBonus, 1.0)])
        .expect("valid pool");
    assert!(t.clone().with_value_override(ModifierKind::DamageBonus, 30.0, 10.0).is_err());
    assert!(t.clone().with_value_override(ModifierKind::DamageBonus, 0.0, 10.0).is_err());
    assert!(t
        .clone()
        .with_value_override(ModifierKind::DamageBonus, f64::NAN, 10.0)
        .is_err());
    assert!(t
        .with_value_override(ModifierKind::DamageBonus, 10.0, f64::INFINITY)
        .is_err());
}

#[test]
fn single_kind_pool_always_rolls_that_kind() {
    let t = AwakenTemplate::new(None, vec![(ModifierKind::ExtraBounce, 0.3)])
        .expect("valid pool");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
    for _ in 0..100 {
        assert_eq!(t.select_kind(&mut rng), ModifierKind::ExtraBounce);
    }
}

#[test]
fn degenerate_override_pins_the_roll() {
    let ability = AbilityDef::new("fireball", "Fireball", "mage", "projectile", 0);
    let t = AwakenTemplate::new(None, vec![(ModifierKind::DamageBonus, 1.0)])
        .expect("valid pool")
        .with_value_override(ModifierKind::DamageBonus, 25.0, 25.0)
        .expect("min == max is a legal range");

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(14);
    for _ in 0..20 {
        let awakening = t.generate(&ability, 0.0, &mut rng);
        assert_eq!(awakening.value, 25.0);
    }
}

// ============================================================
// 4. Boundary values
// ============================================================

#[test]
fn tier_contribution_saturates_at_the_cap() {
    let m = manager();
    let capped = m.generation_chance(Rarity::Rare, m.config().tier_cap, 0.0);
    assert_eq!(m.generation_chance(Rarity::Rare, u32::MAX, 0.0), capped);
    assert_eq!(m.generation_chance(Rarity::Rare, m.config().tier_cap + 1, 0.0), capped);
}

#[test]
fn huge_luck_guarantees_generation() {
    let m = manager();
    // chance far above 1.0; every uniform roll is below it
    assert!(m.generation_chance(Rarity::Common, 0, 1000.0) > 1.0);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(15);
    for _ in 0..100 {
        assert!(m.should_generate(Rarity::Common, 0, 1000.0, &mut rng));
    }
}

#[test]
fn zero_everything_still_has_base_chance() {
    let m = manager();
    let chance = m.generation_chance(Rarity::Common, 0, 0.0);
    assert!((chance - Rarity::Common.base_awakening_chance()).abs() < 1e-12);
}

#[test]
fn negative_quality_clamps_to_base_range() {
    let (min, max) = ModifierKind::DamageBonus.value_range();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(16);
    for _ in 0..200 {
        let v = ModifierKind::DamageBonus.roll_value_with_quality(-5.0, &mut rng);
        assert!(v >= min && v <= max);
    }
}

#[test]
fn quality_past_the_cap_clamps_to_the_ceiling() {
    let (_, max) = ModifierKind::DamageBonus.value_range();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(17);
    for _ in 0..200 {
        let v = ModifierKind::DamageBonus.roll_value_with_quality(99.0, &mut rng);
        assert!(v <= max * 1.06 + 1e-9, "quality past the cap must not exceed the ceiling, got {v}");
    }
}

#[test]
fn extreme_seeds_generate_deterministically() {
    let m = manager();
    let catalog = demo_catalog();
    let ability = catalog.ability("cleave").expect("demo ability exists");

    for seed in [0u64, 1, u64::MAX, u64::MAX - 1] {
        let mut a = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut b = Xoshiro256PlusPlus::seed_from_u64(seed);
        assert_eq!(
            m.generate(ability, 0.2, &mut a),
            m.generate(ability, 0.2, &mut b),
            "generation must be deterministic for seed={seed}"
        );
    }
}

// ============================================================
// 5. Config file handling
// ============================================================

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let config = AwakenConfig::load_or_default("/definitely/not/here/awakening.json");
    assert!(config.enabled);
    assert_eq!(config.chance_for(Rarity::Exalted), Rarity::Exalted.base_awakening_chance());
}

#[test]
fn malformed_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("awakening.json");
    std::fs::write(&path, "{this is not json").expect("write temp config");

    assert!(AwakenConfig::load_from_path(&path).is_err());
    let config = AwakenConfig::load_or_default(&path);
    assert!(config.enabled);
}

#[test]
fn empty_json_object_is_all_defaults() {
    let config = AwakenConfig::from_json("{}").expect("empty object is valid");
    assert!(config.enabled);
    assert_eq!(config.tier_cap, AwakenConfig::default().tier_cap);
    for rarity in Rarity::ALL {
        assert_eq!(config.chance_for(rarity), rarity.base_awakening_chance());
    }
}

#[test]
fn out_of_band_file_values_are_clamped_on_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("awakening.json");
    std::fs::write(
        &path,
        r#"{"chance_by_rarity": {"common": 7.5, "rare": -2.0}, "tier_chance_bonus": -0.5}"#,
    )
    .expect("write temp config");

    let config = AwakenConfig::load_or_default(&path);
    assert_eq!(config.chance_for(Rarity::Common), 1.0);
    assert_eq!(config.chance_for(Rarity::Rare), 0.0);
    assert!(config.tier_chance_bonus >= 0.0);
}

#[test]
fn dropped_rarity_entry_uses_the_fallback_chance() {
    let config = AwakenConfig::from_json(r#"{"chance_by_rarity": {"mythic": 0.2}}"#)
        .expect("valid json");
    assert_eq!(config.chance_for(Rarity::Mythic), 0.2);
    assert_eq!(config.chance_for(Rarity::Common), FALLBACK_AWAKENING_CHANCE);
}

// ============================================================
// 6. Persistence lifecycle
// ============================================================

#[test]
fn second_persist_overwrites_the_first() {
    let m = manager();
    let catalog = demo_catalog();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(18);

    let first = m.generate(catalog.ability("fireball").expect("exists"), 0.0, &mut rng);
    let second = m.generate(catalog.ability("cleave").expect("exists"), 0.0, &mut rng);

    let mut store = MemoryStore::new("reforged_blade");
    m.persist(&mut store, &first);
    m.persist(&mut store, &second);

    let read = m.read(&catalog, &store).expect("readable");
    assert_eq!(read.id, second.id);
    assert_eq!(read.target_ability.as_deref(), Some("cleave"));
}

#[test]
fn clear_is_idempotent() {
    let m = manager();
    let mut store = persisted_fireball(&m, 19);

    m.clear(&mut store);
    m.clear(&mut store);
    assert!(!m.has_awakening(&store));
    assert!(m.read(&demo_catalog(), &store).is_none());

    // clearing a store that never had one is also fine
    let mut plain = MemoryStore::new("plain_dagger");
    m.clear(&mut plain);
    assert_eq!(plain.key_count(), 0);
}

#[test]
fn unequipped_character_yields_nothing() {
    let m = manager();
    let catalog = demo_catalog();
    let character = SimpleCharacter::new();

    assert!(m.get_active_awakening(&catalog, &character).is_none());
    assert!(m.get_active_armor_awakenings(&catalog, &character).is_empty());
    assert!(m.aggregated_armor_bonuses(&catalog, &character).is_empty());
}

#[test]
fn weapon_awakening_on_armor_does_not_aggregate() {
    let m = manager();
    let catalog = demo_catalog();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(20);

    // a class-bound awakening stored on an armor piece stays out of the
    // passive armor totals
    let weapon_bound = m.generate(catalog.ability("fireball").expect("exists"), 0.0, &mut rng);
    let mut store = MemoryStore::new("cursed_helm");
    m.persist(&mut store, &weapon_bound);

    let mut character = SimpleCharacter::new();
    character.equip_armor(ArmorSlot::Helmet, store);

    assert!(m.get_active_armor_awakenings(&catalog, &character).is_empty());
    assert!(m.aggregated_armor_bonuses(&catalog, &character).is_empty());
}

// ============================================================
// 7. Context pass-through at the edges
// ============================================================

#[test]
fn capture_on_bare_character_is_inert() {
    let m = manager();
    let catalog = demo_catalog();
    let character = SimpleCharacter::new();

    let ctx = AwakenContext::capture(&m, &catalog, &character, "fireball", None);
    assert!(ctx.active_modifier().is_none());
    assert_eq!(ctx.apply_damage(100.0), 100.0);
    assert_eq!(ctx.apply_cooldown_ms(u64::MAX), u64::MAX);
    assert_eq!(ctx.extra_count(), 0);
}

#[test]
fn zero_base_values_survive_scaling() {
    let ctx = AwakenContext::empty("fireball");
    assert_eq!(ctx.apply_damage(0.0), 0.0);
    assert_eq!(ctx.apply_cooldown_ms(0), 0);
    assert_eq!(ctx.apply_crit_chance(0.0), 0.0);
}

// ============================================================
// 8. Lore rendering never omits structure
// ============================================================

#[test]
fn lore_is_framed_for_every_state() {
    let awakening = Awakening {
        id: "awaken_mage_fireball".into(),
        display_name: "Fireball Devastating".into(),
        required_class: Some("mage".into()),
        required_branch: Some("fire".into()),
        target_ability: Some("fireball".into()),
        category: Some("projectile".into()),
        kind: ModifierKind::DamageBonus,
        value: 27.0,
        description: "+27% damage".into(),
        unique: false,
        payload: None,
    };

    let states = [
        ActivationState::Active,
        ActivationState::Dormant,
        ActivationState::NoBuild,
        ActivationState::WrongClass("mage".into()),
        ActivationState::WrongBranch,
        ActivationState::AbilityNotSelected,
    ];
    for state in &states {
        let lines = build_lore(&awakening, state, Some("Fireball"));
        assert!(lines.len() >= 6, "{state:?} produced a short block");
        assert_eq!(lines.first(), lines.last(), "{state:?} lost its frame");
        assert!(lines[1].contains("AWAKENING"));
    }
}

#[test]
fn resolve_state_on_armor_ignores_any_build() {
    let awakening = Awakening {
        id: "awaken_armor_boots".into(),
        display_name: "Boots Fleet".into(),
        required_class: None,
        required_branch: None,
        target_ability: None,
        category: None,
        kind: ModifierKind::SpeedBuff,
        value: 15.0,
        description: "+15% movement speed for 3s".into(),
        unique: false,
        payload: None,
    };
    assert_eq!(resolve_state(None, &awakening), ActivationState::Active);
    assert_eq!(
        resolve_state(Some(&PlayerBuild::new("anything")), &awakening),
        ActivationState::Active
    );
}
