//! HUD action buttons: end turn, the action counter readout, and rest.

use crate::config::HudConfig;
use crate::extract::{self, ResourceKind};
use crate::snapshot::{ActorSnapshot, CombatSnapshot};

/// What pressing a button asks the host to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonAction {
    EndTurn,
    Rest,
}

/// One button slot next to the HUD grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonSpec {
    pub id: &'static str,
    pub label: String,
    /// `None` for display-only buttons.
    pub action: Option<ButtonAction>,
    pub visible: bool,
}

/// Builds the button row for an actor.
///
/// End-turn and the action counter show during combat on the actor's own
/// turn; rest shows outside combat.
pub fn hud_buttons(
    config: &HudConfig,
    actor: &ActorSnapshot,
    combat: &CombatSnapshot,
) -> Vec<ButtonSpec> {
    let my_turn = combat.is_turn_of(&actor.id);
    let actions = extract::resource_pool(config, actor, ResourceKind::Actions);

    vec![
        ButtonSpec {
            id: "end-turn",
            label: "End Turn".to_string(),
            action: Some(ButtonAction::EndTurn),
            visible: my_turn,
        },
        ButtonSpec {
            id: "action-counter",
            label: actions.to_string(),
            action: None,
            visible: my_turn,
        },
        ButtonSpec {
            id: "rest",
            label: "Rest".to_string(),
            action: Some(ButtonAction::Rest),
            visible: !combat.started,
        },
    ]
}

/// Hit points restored by an eight-hour rest.
pub fn rest_healing(level: u32, con_mod: i32) -> u32 {
    (con_mod * level as i32).max(1) as u32
}
