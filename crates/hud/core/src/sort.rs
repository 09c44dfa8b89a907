//! Deterministic HUD cell ordering.
//!
//! Item type sets the coarse order; within a type, spells sort by rank with
//! cantrips first, actions and feats by action cost, everything else
//! alphabetically. Unknown types go last so a new host document type cannot
//! scramble the layout.

use std::cmp::Ordering;

use crate::snapshot::{ItemSnapshot, ItemType};

/// Item type precedence, first to last.
const TYPE_ORDER: &[ItemType] = &[
    ItemType::Weapon,
    ItemType::Melee,
    ItemType::Ranged,
    ItemType::Action,
    ItemType::Feat,
    ItemType::Spell,
    ItemType::Consumable,
    ItemType::Ammo,
    ItemType::Equipment,
    ItemType::Armor,
    ItemType::Shield,
    ItemType::Backpack,
];

/// Rank sort key for a spell cell; cantrips sort first, unranked last.
const UNRANKED: u8 = u8::MAX;

fn type_index(item_type: ItemType) -> usize {
    TYPE_ORDER
        .iter()
        .position(|&t| t == item_type)
        .unwrap_or(TYPE_ORDER.len())
}

fn spell_rank_key(item: &ItemSnapshot) -> u8 {
    if item.item_type != ItemType::Spell {
        return UNRANKED;
    }
    if item.is_cantrip_or_at_will() {
        return 0;
    }
    item.rank.map_or(UNRANKED, |rank| rank.get())
}

fn cost_key(item: &ItemSnapshot) -> u8 {
    item.action_cost.map_or(0, |cost| cost.sort_weight())
}

/// Total order over HUD cells.
pub fn hud_cmp(a: &ItemSnapshot, b: &ItemSnapshot) -> Ordering {
    type_index(a.item_type)
        .cmp(&type_index(b.item_type))
        .then_with(|| match a.item_type {
            ItemType::Spell => spell_rank_key(a).cmp(&spell_rank_key(b)),
            ItemType::Action | ItemType::Feat => cost_key(a).cmp(&cost_key(b)),
            _ => Ordering::Equal,
        })
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts a cell list in place.
pub fn sort_hud(items: &mut [ItemSnapshot]) {
    items.sort_by(hud_cmp);
}
