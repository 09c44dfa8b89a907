//! Combat tracker snapshot.

use super::common::ActorId;

/// Read-only view of the host's combat tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub started: bool,
    pub round: u32,
    /// Combatant whose turn it currently is.
    pub active: Option<ActorId>,
}

impl CombatSnapshot {
    /// No combat running.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn running(round: u32, active: ActorId) -> Self {
        Self {
            started: true,
            round,
            active: Some(active),
        }
    }

    /// True when combat is running and it is this actor's turn.
    pub fn is_turn_of(&self, actor: &ActorId) -> bool {
        self.started && self.active.as_ref() == Some(actor)
    }
}
