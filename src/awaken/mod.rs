//! The awakening itself.
//!
//! An [`Awakening`] is one rolled modifier bound either to a class ability
//! (weapon-bound) or to nothing (armor-bound). The struct is plain data;
//! generation lives in [`crate::template`], persistence and activation in
//! [`crate::manager`].

use serde::{Deserialize, Serialize};

use crate::modifier::ModifierKind;
use crate::player::PlayerBuild;

/// One rolled awakening carried by an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Awakening {
    /// Stable identifier, `awaken_{class}_{ability}` or `awaken_armor_{slot}`
    pub id: String,
    /// Composed display name, e.g. "Fireball Devastating"
    pub display_name: String,
    /// Class the wearer must have picked, None for armor-bound awakenings
    pub required_class: Option<String>,
    /// Branch constraint inherited from the target ability, when it has one
    pub required_branch: Option<String>,
    /// Ability the modifier applies to, None for armor-bound awakenings
    pub target_ability: Option<String>,
    /// Template category the awakening was generated from
    pub category: Option<String>,
    pub kind: ModifierKind,
    /// Rolled magnitude; integer kinds round on use
    pub value: f64,
    /// Player-facing effect line
    pub description: String,
    /// Unique effects bypass the normal value scaling
    pub unique: bool,
    /// Free-form payload for unique effect handlers
    pub payload: Option<String>,
}

impl Awakening {
    /// Armor-bound awakenings target no class and no ability
    pub fn is_armor_bound(&self) -> bool {
        self.required_class.is_none() && self.target_ability.is_none()
    }

    pub fn is_weapon_bound(&self) -> bool {
        !self.is_armor_bound()
    }

    /// Rolled value as a whole count, for integer kinds
    pub fn value_as_int(&self) -> i64 {
        self.value.round() as i64
    }

    pub fn is_class_compatible(&self, class_id: &str) -> bool {
        match &self.required_class {
            Some(required) => required == class_id,
            None => true,
        }
    }

    /// Whether a build satisfies every constraint the awakening carries.
    ///
    /// Armor-bound awakenings carry none and always match. Weapon-bound
    /// awakenings need the class, the branch when one is required, and the
    /// target ability slotted into the loadout.
    pub fn matches_build(&self, build: &PlayerBuild) -> bool {
        if let Some(required) = &self.required_class {
            if *required != build.class_id {
                return false;
            }
        }
        if let Some(required) = &self.required_branch {
            if build.branch_id.as_ref() != Some(required) {
                return false;
            }
        }
        match &self.target_ability {
            Some(ability) => build.is_ability_selected(ability),
            None => true,
        }
    }
}
