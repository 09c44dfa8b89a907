//! Filter chips and cell matching.
//!
//! A chip is a stateless predicate descriptor; a cell carries a small tag set
//! extracted once from its backing item. Matching is pure and evaluated per
//! chip; callers OR across active chips and show everything when no chip is
//! active.

use crate::snapshot::{
    ActionCost, ActorSnapshot, ItemSnapshot, ItemTraits, ItemType, Rank,
};

/// Tags a display cell is matched by, extracted once from its item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellTags {
    pub item_type: ItemType,
    /// Numeric action cost; absent for free actions, reactions, and
    /// passives.
    pub action_cost: Option<u8>,
    pub traits: ItemTraits,
    pub rank: Option<Rank>,
    pub focus_spell: bool,
}

impl CellTags {
    pub fn from_item(item: &ItemSnapshot) -> Self {
        let action_cost = match item.action_cost {
            Some(ActionCost::Actions(n)) if n > 0 => Some(n),
            _ => None,
        };
        Self {
            item_type: item.item_type,
            action_cost,
            traits: item.traits,
            rank: item.rank,
            focus_spell: item.is_focus_spell(),
        }
    }
}

/// The one predicate a chip encodes.
///
/// Exactly one kind per chip; a chip that needed two kinds would be two
/// chips.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterPredicate {
    /// Cells costing exactly this many actions.
    ActionCost(u8),
    /// Cells carrying this trait (single flag).
    HasTrait(ItemTraits),
    /// Spell cells of exactly this rank.
    SpellRank(Rank),
    /// Focus spell cells.
    FocusSpell,
    /// Cells backed by this item type.
    ItemKind(ItemType),
}

/// A selectable filter chip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterChip {
    pub id: String,
    pub label: String,
    /// Short glyph text shown on the chip face.
    pub short: Option<String>,
    /// Pip count for chips that visualize a resource; lit pips are computed
    /// per render via [`crate::classify::pips_remaining`], never stored.
    pub pip_index: Option<u32>,
    pub predicate: FilterPredicate,
}

impl FilterChip {
    pub fn new(id: impl Into<String>, label: impl Into<String>, predicate: FilterPredicate) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            short: None,
            pip_index: None,
            predicate,
        }
    }

    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn with_pips(mut self, pip_index: u32) -> Self {
        self.pip_index = Some(pip_index);
        self
    }
}

/// Whether a cell matches one chip.
pub fn matches(chip: &FilterChip, tags: &CellTags) -> bool {
    match &chip.predicate {
        FilterPredicate::ActionCost(cost) => tags.action_cost == Some(*cost),
        FilterPredicate::HasTrait(flag) => tags.traits.contains(*flag),
        FilterPredicate::SpellRank(rank) => {
            tags.item_type == ItemType::Spell && tags.rank == Some(*rank)
        }
        FilterPredicate::FocusSpell => tags.focus_spell,
        FilterPredicate::ItemKind(item_type) => tags.item_type == *item_type,
    }
}

/// Whether a cell is shown under the active chip set.
///
/// Zero active chips shows every cell; otherwise a cell shows if at least
/// one active chip matches it.
pub fn visible(active: &[FilterChip], tags: &CellTags) -> bool {
    active.is_empty() || active.iter().any(|chip| matches(chip, tags))
}

/// Trait chips offered when the actor owns at least one matching item, in
/// display order.
const COMMON_TRAIT_CHIPS: &[ItemTraits] = &[
    ItemTraits::ATTACK,
    ItemTraits::MANIPULATE,
    ItemTraits::CONCENTRATE,
    ItemTraits::MOVE,
    ItemTraits::EXPLORATION,
];

/// Builds the standard chip row for an actor.
///
/// Action-cost chips always come first, in ascending cost order regardless
/// of how many actions remain. Trait chips appear only for traits present on
/// the actor's items; spell-rank chips only for ranks with any slots.
pub fn standard_filters(actor: &ActorSnapshot) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    for cost in 1..=3u8 {
        chips.push(
            FilterChip::new(
                format!("action-{cost}"),
                if cost == 1 { "Action" } else { "Actions" },
                FilterPredicate::ActionCost(cost),
            )
            .with_short(cost.to_string())
            .with_pips(u32::from(cost)),
        );
    }

    let present = actor.present_traits();
    for &flag in COMMON_TRAIT_CHIPS {
        if present.contains(flag) {
            let name = flag.name().unwrap_or("trait");
            chips.push(FilterChip::new(
                format!("trait-{name}"),
                capitalize(name),
                FilterPredicate::HasTrait(flag),
            ));
        }
    }

    if actor.has_focus_spells() {
        chips.push(FilterChip::new(
            "focus-spell",
            "Focus Spell",
            FilterPredicate::FocusSpell,
        ));
    }

    for rank in Rank::all().skip(1) {
        let has_slots = actor.spellbooks.iter().any(|book| {
            book.ranks
                .rank(rank)
                .pool
                .is_some_and(|pool| pool.max > 0)
                || !book.ranks.rank(rank).prepared.is_empty()
        });
        if has_slots {
            chips.push(
                FilterChip::new(
                    format!("rank-{rank}"),
                    "Spell Rank",
                    FilterPredicate::SpellRank(rank),
                )
                .with_short(roman_numeral(rank.get())),
            );
        }
    }

    for item_type in [ItemType::Weapon, ItemType::Action, ItemType::Feat] {
        chips.push(FilterChip::new(
            item_type.as_ref(),
            capitalize(item_type.as_ref()),
            FilterPredicate::ItemKind(item_type),
        ));
    }

    chips
}

/// Roman numeral glyph for rank chips (1..=10).
pub fn roman_numeral(n: u8) -> String {
    const NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
    match n {
        1..=10 => NUMERALS[usize::from(n) - 1].to_string(),
        _ => n.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
