//! Resource extractors: normalized `{value, max}` pairs read from raw
//! actor and item snapshots.
//!
//! Every extractor is pure and total. Absent data never errors; each resource
//! kind has a documented fallback instead, so a half-initialized actor
//! document still yields a well-formed pool.

use crate::action::ActionKind;
use crate::config::HudConfig;
use crate::snapshot::{ActorSnapshot, ItemId, ItemSnapshot, ResourcePool};

/// Actor-level depletable resources the HUD tracks.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    /// Per-turn action economy.
    Actions,
    /// Per-round reaction.
    Reactions,
    /// Focus point pool.
    Focus,
    HitPoints,
}

/// Reads the pool for an actor-level resource kind.
///
/// Fallbacks: counters that were never initialized read as full
/// (`value == max == kind maximum`); a missing focus pool reads as the zero
/// pool. Inputs are re-clamped, never trusted to satisfy `value <= max`.
pub fn resource_pool(config: &HudConfig, actor: &ActorSnapshot, kind: ResourceKind) -> ResourcePool {
    match kind {
        ResourceKind::Actions => counter_pool(actor.counters.actions_remaining, config.actions_per_turn),
        ResourceKind::Reactions => {
            counter_pool(actor.counters.reactions_remaining, config.reactions_per_round)
        }
        ResourceKind::Focus => actor.focus.unwrap_or(ResourcePool::ZERO).clamped(),
        ResourceKind::HitPoints => actor.hit_points.clamped(),
    }
}

fn counter_pool(remaining: Option<u32>, maximum: u32) -> ResourcePool {
    match remaining {
        Some(value) => ResourcePool::new(value, maximum).clamped(),
        None => ResourcePool::at_max(maximum),
    }
}

/// Limited uses of an item, if it tracks any.
///
/// Items with `max == 0` (or no uses field at all) track nothing and yield
/// `None`; callers emit no uses indicator for them.
pub fn item_uses(item: &ItemSnapshot) -> Option<ResourcePool> {
    item.uses
        .filter(|uses| uses.max > 0)
        .map(ResourcePool::clamped)
}

/// Everything a display cell needs from its backing item, resolved once.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    pub id: ItemId,
    pub name: String,
    /// Tagged use-time dispatch kind; `None` for passive or inert items.
    pub kind: Option<ActionKind>,
    pub quantity: Option<u32>,
    pub uses: Option<ResourcePool>,
}

/// Transforms an item snapshot into cell data.
pub fn cell_data(item: &ItemSnapshot) -> CellData {
    CellData {
        id: item.id.clone(),
        name: item.name.clone(),
        kind: ActionKind::resolve(item),
        quantity: item.quantity,
        uses: item_uses(item),
    }
}
