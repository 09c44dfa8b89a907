//! Per-actor action and reaction counters.
//!
//! The counters live in actor-scoped flag storage owned by the host; this
//! module owns their lifecycle rules. Reactions refill at round boundaries,
//! actions at the owning combatant's own turn start, and nothing else ever
//! resets them mid-turn. An uninitialized counter reads as full.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hud_core::config::HudConfig;
use hud_core::extract::ResourceKind;
use hud_core::snapshot::ActorId;

use crate::repository::{FlagError, FlagStore};

/// Counter kinds tracked per combatant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CounterKind {
    Action,
    Reaction,
}

impl CounterKind {
    /// Flag key the counter is persisted under.
    pub fn flag_key(self) -> &'static str {
        match self {
            CounterKind::Action => "actions_remaining",
            CounterKind::Reaction => "reactions_remaining",
        }
    }

    pub fn maximum(self, config: &HudConfig) -> u32 {
        match self {
            CounterKind::Action => config.actions_per_turn,
            CounterKind::Reaction => config.reactions_per_round,
        }
    }

    /// Resource kind the counter backs on the filter row.
    pub fn resource(self) -> ResourceKind {
        match self {
            CounterKind::Action => ResourceKind::Actions,
            CounterKind::Reaction => ResourceKind::Reactions,
        }
    }
}

/// Explicit counter context: flag store plus rule configuration.
///
/// One ledger per displayed HUD instance; nothing is process-global.
pub struct CounterLedger {
    store: Arc<dyn FlagStore>,
    config: HudConfig,
}

impl CounterLedger {
    pub fn new(store: Arc<dyn FlagStore>, config: HudConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    /// Reads a counter, defaulting to full and clamping to the kind maximum.
    pub async fn read(&self, actor: &ActorId, kind: CounterKind) -> Result<u32, FlagError> {
        let maximum = kind.maximum(&self.config);
        let value = self
            .store
            .read_flag(actor, kind.flag_key())
            .await?
            .and_then(|value| value.as_u64())
            .map_or(maximum, |value| value as u32);
        Ok(value.min(maximum))
    }

    /// Resets a counter to its kind maximum. Returns the new value.
    pub async fn reset(&self, actor: &ActorId, kind: CounterKind) -> Result<u32, FlagError> {
        let maximum = kind.maximum(&self.config);
        self.store
            .write_flag(actor, kind.flag_key(), serde_json::json!(maximum))
            .await?;
        Ok(maximum)
    }

    /// Spends from a counter, saturating at zero. Returns the remainder.
    pub async fn spend(
        &self,
        actor: &ActorId,
        kind: CounterKind,
        cost: u32,
    ) -> Result<u32, FlagError> {
        let remaining = self.read(actor, kind).await?.saturating_sub(cost);
        self.write(actor, kind, remaining).await?;
        Ok(remaining)
    }

    /// Persists a counter value as-is.
    pub async fn write(
        &self,
        actor: &ActorId,
        kind: CounterKind,
        value: u32,
    ) -> Result<(), FlagError> {
        self.store
            .write_flag(actor, kind.flag_key(), serde_json::json!(value))
            .await
    }
}
