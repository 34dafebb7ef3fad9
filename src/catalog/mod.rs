//! Ability catalog abstraction.
//!
//! The generation and activation paths never talk to the host game's class
//! system directly; they resolve abilities through [`AbilityCatalog`]. The
//! host implements the trait over its live data, tests and the demo binary
//! use [`StaticAbilityCatalog`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Static description of one class ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDef {
    /// Stable identifier, unique across all classes
    pub id: String,
    /// Player-facing name, used to compose awakening display names
    pub name: String,
    /// Owning class identifier
    pub class_id: String,
    /// Branch the ability belongs to, when the class splits into branches
    pub branch_id: Option<String>,
    /// Template category ("summon", "projectile", "ultimate", ...)
    pub category: String,
    /// Position in the class kit, used for deterministic ordering
    pub slot_index: u8,
}

impl AbilityDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class_id: impl Into<String>,
        category: impl Into<String>,
        slot_index: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_id: class_id.into(),
            branch_id: None,
            category: category.into(),
            slot_index,
        }
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }
}

/// Read access to the host's ability definitions.
pub trait AbilityCatalog {
    /// Look up a single ability by its stable identifier
    fn ability(&self, id: &str) -> Option<&AbilityDef>;

    /// All abilities of one class, in kit order
    fn abilities_for_class(&self, class_id: &str) -> Vec<&AbilityDef>;

    /// Every class that has at least one ability, in registration order
    fn class_ids(&self) -> Vec<&str>;
}

/// In-memory catalog with stable iteration order.
#[derive(Debug, Default, Clone)]
pub struct StaticAbilityCatalog {
    entries: Vec<AbilityDef>,
    by_id: HashMap<String, usize>,
}

impl StaticAbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a definition. Replacement keeps the original
    /// position so registration order stays stable.
    pub fn insert(&mut self, def: AbilityDef) {
        match self.by_id.get(&def.id) {
            Some(&index) => self.entries[index] = def,
            None => {
                self.by_id.insert(def.id.clone(), self.entries.len());
                self.entries.push(def);
            }
        }
    }

    pub fn with_ability(mut self, def: AbilityDef) -> Self {
        self.insert(def);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDef> {
        self.entries.iter()
    }
}

impl AbilityCatalog for StaticAbilityCatalog {
    fn ability(&self, id: &str) -> Option<&AbilityDef> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    fn abilities_for_class(&self, class_id: &str) -> Vec<&AbilityDef> {
        self.entries
            .iter()
            .filter(|def| def.class_id == class_id)
            .collect()
    }

    fn class_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for def in &self.entries {
            if !seen.contains(&def.class_id.as_str()) {
                seen.push(def.class_id.as_str());
            }
        }
        seen
    }
}
