//! Pure rules for a tabletop combat HUD.
//!
//! `hud-core` defines the canonical derivation rules (resource extraction,
//! depletion, spell slot aggregation, filtering, ordering, targeting) and
//! exposes pure APIs reused by the reconciling runtime and offline tools.
//! All functions are total over snapshot data; the host's authoritative
//! documents are only ever read through the types in [`snapshot`].
pub mod action;
pub mod aggregate;
pub mod buttons;
pub mod classify;
pub mod config;
pub mod extract;
pub mod filter;
pub mod populate;
pub mod snapshot;
pub mod sort;
pub mod targeting;

pub use action::ActionKind;
pub use aggregate::{AggregatedSpellView, SpellCell, aggregate, aggregate_cells};
pub use buttons::{ButtonAction, ButtonSpec, hud_buttons, rest_healing};
pub use classify::{depleted, pips_remaining};
pub use config::HudConfig;
pub use extract::{CellData, ResourceKind, cell_data, item_uses, resource_pool};
pub use filter::{
    CellTags, FilterChip, FilterPredicate, matches, roman_numeral, standard_filters, visible,
};
pub use populate::{PopulateCategory, eligible, is_spell_usable, matching_items, passive_feats};
pub use snapshot::{
    ActionCost, ActorId, ActorSnapshot, CastingKind, CombatSnapshot, CounterFlags, ItemId,
    ItemSnapshot, ItemTraits, ItemType, PreparationRecord, Rank, RangeSpec, RankSlot, RankSlots,
    ResourcePool, SpellDelivery, SpellIdentity, SpellbookSnapshot, TargetCategory, TargetSpec,
    TemplateShape,
};
pub use sort::{hud_cmp, sort_hud};
pub use targeting::{
    Disposition, EffectiveRange, Footprint, TargetRejection, TargetRequirements, Template,
    TokenRef, effective_range, grid_distance, needs_targeting, target_requirements, valid_target,
};
