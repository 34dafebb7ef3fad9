//! Awakening Engine - Procedural Affix Core
//!
//! This crate provides the awakening system for ability-driven loot:
//! - Modifier catalog (28 kinds with ranges, axes, display text)
//! - Weighted generation templates per ability category and armor slot
//! - Registry with ability-level overrides
//! - Item persistence through a host-provided metadata store
//! - Activation rules against the wearer's class/branch/ability build
//! - Per-cast execution context with typed accessors
//! - Lore rendering, rarity/quality scaling, config hot reload
//! - Monte-Carlo distribution auditing
//!
//! Rules logic is plain Rust; modules that own runtime state also expose a
//! `bevy` plugin so hosts can drop the engine into an `App`.

pub mod awaken;
pub mod balance;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod context;
pub mod hotreload;
pub mod logging;
pub mod lore;
pub mod manager;
pub mod modifier;
pub mod player;
pub mod rarity;
pub mod registry;
pub mod seed;
pub mod store;
pub mod template;
