//! Item lore rendering.
//!
//! Pure string assembly; the host decides where the lines go (tooltip,
//! chat, item lore). No item mutation happens here.

use crate::awaken::Awakening;
use crate::player::PlayerBuild;

const SEPARATOR: &str = "────────────────────";

/// Why an awakening is or is not currently active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationState {
    Active,
    /// Item rendered without a wearer (shop, chest preview)
    Dormant,
    NoBuild,
    WrongClass(String),
    WrongBranch,
    AbilityNotSelected,
}

impl ActivationState {
    pub fn is_active(&self) -> bool {
        matches!(self, ActivationState::Active)
    }
}

/// Classify an awakening against a wearer's build.
///
/// Armor-bound awakenings are always active. Constraint checks run in
/// severity order so the reason shown is the first thing the player must
/// fix.
pub fn resolve_state(build: Option<&PlayerBuild>, awakening: &Awakening) -> ActivationState {
    if awakening.is_armor_bound() {
        return ActivationState::Active;
    }
    let Some(build) = build else {
        return ActivationState::NoBuild;
    };
    if let Some(required) = &awakening.required_class {
        if *required != build.class_id {
            return ActivationState::WrongClass(required.clone());
        }
    }
    if let Some(required) = &awakening.required_branch {
        if build.branch_id.as_ref() != Some(required) {
            return ActivationState::WrongBranch;
        }
    }
    if let Some(ability) = &awakening.target_ability {
        if !build.is_ability_selected(ability) {
            return ActivationState::AbilityNotSelected;
        }
    }
    ActivationState::Active
}

/// Full lore block: separator, status header, name, target, effect,
/// optional reason, separator.
pub fn build_lore(
    awakening: &Awakening,
    state: &ActivationState,
    ability_name: Option<&str>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(7);
    lines.push(SEPARATOR.to_string());
    lines.push(if state.is_active() {
        "✦ AWAKENING [ACTIVE]".to_string()
    } else {
        "✦ AWAKENING [INACTIVE]".to_string()
    });
    lines.push(awakening.display_name.clone());

    if awakening.is_armor_bound() {
        lines.push("Passive (armor)".to_string());
    } else {
        let target = ability_name
            .map(str::to_string)
            .or_else(|| awakening.target_ability.clone())
            .unwrap_or_else(|| "Unknown ability".to_string());
        lines.push(format!("Ability: {}", target));
    }

    lines.push(format!("Effect: {}", awakening.description));

    match state {
        ActivationState::Active => {}
        ActivationState::Dormant => {
            lines.push("(Equip to a build to activate)".to_string());
        }
        ActivationState::NoBuild => {
            lines.push("✖ No class selected".to_string());
        }
        ActivationState::WrongClass(required) => {
            lines.push(format!("✖ Requires class: {}", required));
        }
        ActivationState::WrongBranch => {
            lines.push("✖ Requires another branch".to_string());
        }
        ActivationState::AbilityNotSelected => {
            lines.push("✖ Ability not slotted".to_string());
        }
    }

    lines.push(SEPARATOR.to_string());
    lines
}

/// Two-line summary for list views
pub fn build_compact_lore(awakening: &Awakening, active: bool) -> Vec<String> {
    let status = if active { "[ACTIVE]" } else { "[INACTIVE]" };
    vec![
        format!("✦ {} {}", awakening.display_name, status),
        awakening.description.clone(),
    ]
}
