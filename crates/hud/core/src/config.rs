/// Rules configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudConfig {
    /// Actions a combatant regains at the start of their own turn.
    pub actions_per_turn: u32,
    /// Reactions a combatant regains at each round boundary.
    pub reactions_per_round: u32,
}

impl HudConfig {
    // ===== compile-time constants =====
    /// Grid scale the game system assumes.
    pub const FEET_PER_SQUARE: u32 = 5;
    /// Maximum effective range of a ranged weapon, in range increments.
    pub const MAX_RANGE_INCREMENTS: u32 = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTIONS_PER_TURN: u32 = 3;
    pub const DEFAULT_REACTIONS_PER_ROUND: u32 = 1;

    pub fn new() -> Self {
        Self {
            actions_per_turn: Self::DEFAULT_ACTIONS_PER_TURN,
            reactions_per_round: Self::DEFAULT_REACTIONS_PER_ROUND,
        }
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self::new()
    }
}
