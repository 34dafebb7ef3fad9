//! Character view and build state.
//!
//! Activation rules read the wearer through [`CharacterView`]: the selected
//! build plus the equipped items whose metadata may carry awakenings. The
//! host adapts its live player entity; [`SimpleCharacter`] serves tests and
//! offline tooling.

use serde::{Deserialize, Serialize};

use crate::store::{MemoryStore, MetadataStore};

/// The four armor slots that can carry defensive awakenings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorSlot {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 4] = [
        Self::Helmet,
        Self::Chestplate,
        Self::Leggings,
        Self::Boots,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Helmet => "Helmet",
            Self::Chestplate => "Chestplate",
            Self::Leggings => "Leggings",
            Self::Boots => "Boots",
        }
    }

    /// Stable identifier for ids and template registration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Helmet => "helmet",
            Self::Chestplate => "chestplate",
            Self::Leggings => "leggings",
            Self::Boots => "boots",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Helmet => 0,
            Self::Chestplate => 1,
            Self::Leggings => 2,
            Self::Boots => 3,
        }
    }
}

/// A character's selected class, branch and ability loadout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBuild {
    pub class_id: String,
    /// None until the class forces a branch pick
    pub branch_id: Option<String>,
    /// Identifiers of the abilities slotted into the active loadout
    pub selected_abilities: Vec<String>,
}

impl PlayerBuild {
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            branch_id: None,
            selected_abilities: Vec::new(),
        }
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_ability(mut self, ability_id: impl Into<String>) -> Self {
        self.selected_abilities.push(ability_id.into());
        self
    }

    pub fn is_ability_selected(&self, ability_id: &str) -> bool {
        self.selected_abilities.iter().any(|id| id == ability_id)
    }
}

/// Read access to the wearer's build and equipped item metadata.
pub trait CharacterView {
    /// None while the player has not picked a class yet
    fn build(&self) -> Option<&PlayerBuild>;

    /// Metadata of the held weapon, if any
    fn main_hand(&self) -> Option<&dyn MetadataStore>;

    /// Metadata of one equipped armor piece, if the slot is filled
    fn armor_piece(&self, slot: ArmorSlot) -> Option<&dyn MetadataStore>;
}

/// Owned character state for tests and the demo binary.
#[derive(Debug, Default)]
pub struct SimpleCharacter {
    build: Option<PlayerBuild>,
    main_hand: Option<MemoryStore>,
    armor: [Option<MemoryStore>; 4],
}

impl SimpleCharacter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build(mut self, build: PlayerBuild) -> Self {
        self.build = Some(build);
        self
    }

    pub fn set_build(&mut self, build: PlayerBuild) {
        self.build = Some(build);
    }

    pub fn clear_build(&mut self) {
        self.build = None;
    }

    pub fn equip_main_hand(&mut self, item: MemoryStore) {
        self.main_hand = Some(item);
    }

    pub fn main_hand_mut(&mut self) -> Option<&mut MemoryStore> {
        self.main_hand.as_mut()
    }

    pub fn equip_armor(&mut self, slot: ArmorSlot, item: MemoryStore) {
        self.armor[slot.index()] = Some(item);
    }

    pub fn armor_mut(&mut self, slot: ArmorSlot) -> Option<&mut MemoryStore> {
        self.armor[slot.index()].as_mut()
    }
}

impl CharacterView for SimpleCharacter {
    fn build(&self) -> Option<&PlayerBuild> {
        self.build.as_ref()
    }

    fn main_hand(&self) -> Option<&dyn MetadataStore> {
        self.main_hand.as_ref().map(|s| s as &dyn MetadataStore)
    }

    fn armor_piece(&self, slot: ArmorSlot) -> Option<&dyn MetadataStore> {
        self.armor[slot.index()].as_ref().map(|s| s as &dyn MetadataStore)
    }
}
