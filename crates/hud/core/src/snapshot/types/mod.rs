//! Snapshot building blocks grouped by concern.

mod combat;
mod common;
mod item;
mod spellbook;

pub use combat::CombatSnapshot;
pub use common::{ActorId, ItemId, Rank, ResourcePool, SpellIdentity};
pub use item::{
    ActionCost, ItemSnapshot, ItemTraits, ItemType, RangeSpec, SpellDelivery, TargetCategory,
    TargetSpec, TemplateShape,
};
pub use spellbook::{CastingKind, PreparationRecord, RankSlot, RankSlots, SpellbookSnapshot};
