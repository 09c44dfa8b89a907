//! Event types for the reconciliation pipeline.
//!
//! [`HostEvent`] is what the host dispatches in; [`CellEvent`] and
//! [`CounterEvent`] are what the engine publishes out after a pass.

use serde::{Deserialize, Serialize};

use hud_core::extract::ResourceKind;
use hud_core::snapshot::{ActorId, ItemId};

use crate::bindings::CellId;
use crate::counters::CounterKind;
use crate::view::CellPatch;

/// Change notification dispatched by the host.
///
/// Events are processed strictly in dispatch order, one at a time, each to
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostEvent {
    /// An item document changed (slot map, uses, charges).
    ItemUpdated { actor: ActorId, item: ItemId },
    /// An actor document's resource subtree changed.
    ActorUpdated {
        actor: ActorId,
        changed: Vec<ResourceKind>,
    },
    /// The combat tracker advanced to a new turn.
    TurnAdvanced { round: u32, active: ActorId },
    /// The combat tracker advanced to a new round.
    RoundAdvanced {
        round: u32,
        combatants: Vec<ActorId>,
    },
}

/// Display-cell updates produced by a reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellEvent {
    /// A cell's derived view was recomputed and patched.
    Patched { cell: CellId, patch: CellPatch },
}

/// Counter changes produced by turn/round boundaries or action use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CounterEvent {
    /// Counter reset to its kind maximum at a boundary.
    Reset {
        actor: ActorId,
        kind: CounterKind,
        value: u32,
    },
    /// Counter spent by an action use.
    Spent {
        actor: ActorId,
        kind: CounterKind,
        remaining: u32,
    },
}
