//! Read-only snapshots of host-owned game state.
//!
//! The host application owns the authoritative actor and item documents; this
//! module owns the data structures a single reconciliation pass reads. A
//! snapshot is taken fresh from the source of truth on every pass and never
//! cached across passes, so no staleness tracking exists here.

pub mod types;

pub use types::{
    ActionCost, ActorId, CastingKind, CombatSnapshot, ItemId, ItemSnapshot, ItemTraits, ItemType,
    PreparationRecord, Rank, RangeSpec, RankSlot, RankSlots, ResourcePool, SpellDelivery,
    SpellIdentity, SpellbookSnapshot, TargetCategory, TargetSpec, TemplateShape,
};

/// Per-actor counter flags as last persisted by the runtime.
///
/// `None` means the flag was never written; extraction substitutes the
/// kind-specific default (a full counter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterFlags {
    pub actions_remaining: Option<u32>,
    pub reactions_remaining: Option<u32>,
}

/// Read-only snapshot of one actor document and its owned items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub name: String,
    /// Level and Constitution modifier, used by the rest operation.
    pub level: u32,
    pub con_mod: i32,
    pub hit_points: ResourcePool,
    /// Focus pool; `None` for actors with no focus spells.
    pub focus: Option<ResourcePool>,
    pub counters: CounterFlags,
    pub items: Vec<ItemSnapshot>,
    pub spellbooks: Vec<SpellbookSnapshot>,
}

impl ActorSnapshot {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            con_mod: 0,
            hit_points: ResourcePool::ZERO,
            focus: None,
            counters: CounterFlags::default(),
            items: Vec::new(),
            spellbooks: Vec::new(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemSnapshot> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn spellbook(&self, id: &ItemId) -> Option<&SpellbookSnapshot> {
        self.spellbooks.iter().find(|book| &book.id == id)
    }

    /// First item matching a spell identity.
    pub fn spell(&self, identity: &SpellIdentity) -> Option<&ItemSnapshot> {
        self.items
            .iter()
            .find(|item| item.spell_identity.as_ref() == Some(identity))
    }

    /// Union of every owned item's traits.
    pub fn present_traits(&self) -> ItemTraits {
        self.items
            .iter()
            .fold(ItemTraits::empty(), |acc, item| acc | item.traits)
    }

    pub fn has_focus_spells(&self) -> bool {
        self.items.iter().any(ItemSnapshot::is_focus_spell)
    }
}
