//! Population rules: which actor items belong on the HUD.
//!
//! Strikes are always eligible; actions and feats need a real action cost
//! (passives stay off the bar); spells must currently be usable through one
//! of the actor's spellcasting entries. Passive feats instead form the
//! persisted passive selection.

use crate::snapshot::{
    ActionCost, ActorSnapshot, CastingKind, ItemId, ItemSnapshot, ItemType,
};

/// Item categories the population dialog offers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PopulateCategory {
    Weapons,
    /// Melee/ranged attack entries carrying the strike action.
    Strikes,
    Actions,
    Feats,
    Spells,
    FocusSpells,
    Consumables,
    Equipment,
    Armor,
    Shields,
}

fn matches_category(item: &ItemSnapshot, category: PopulateCategory) -> bool {
    match category {
        PopulateCategory::Weapons => item.item_type == ItemType::Weapon,
        PopulateCategory::Strikes => is_strike(item),
        PopulateCategory::Actions => item.item_type == ItemType::Action,
        PopulateCategory::Feats => item.item_type == ItemType::Feat,
        PopulateCategory::Spells => item.item_type == ItemType::Spell,
        PopulateCategory::FocusSpells => item.is_focus_spell(),
        PopulateCategory::Consumables => item.item_type == ItemType::Consumable,
        PopulateCategory::Equipment => item.item_type == ItemType::Equipment,
        PopulateCategory::Armor => item.item_type == ItemType::Armor,
        PopulateCategory::Shields => item.item_type == ItemType::Shield,
    }
}

fn is_strike(item: &ItemSnapshot) -> bool {
    matches!(item.item_type, ItemType::Melee | ItemType::Ranged) && item.strike
}

fn has_action_cost(item: &ItemSnapshot) -> bool {
    matches!(item.action_cost, Some(ActionCost::Actions(n)) if n > 0)
}

/// Whether a spell can currently be cast through any of the actor's entries.
///
/// Cantrips and at-will spells are always usable. Focus spells need a focus
/// point. Prepared entries need at least one unexpended preparation of the
/// spell; spontaneous entries need a remaining slot at the spell's rank or a
/// castable higher rank. Innate spells are limited by item uses, not slots.
pub fn is_spell_usable(actor: &ActorSnapshot, spell: &ItemSnapshot) -> bool {
    if spell.item_type != ItemType::Spell {
        return false;
    }
    if spell.is_cantrip_or_at_will() {
        return true;
    }
    if spell.is_focus_spell() {
        return actor.focus.is_some_and(|pool| pool.clamped().value > 0);
    }

    let Some(identity) = spell.spell_identity.as_ref() else {
        return false;
    };

    actor.spellbooks.iter().any(|book| match book.casting {
        CastingKind::Prepared => book
            .ranks
            .iter()
            .flat_map(|(_, slot)| &slot.prepared)
            .any(|record| &record.spell == identity && !record.expended),
        CastingKind::Spontaneous => {
            let minimum = spell.rank.map_or(0, |rank| rank.get());
            book.ranks.iter().any(|(rank, slot)| {
                rank.get() >= minimum
                    && slot.pool.is_some_and(|pool| pool.clamped().value > 0)
            })
        }
        CastingKind::Focus => false,
        CastingKind::Innate => spell.uses.is_none_or(|uses| uses.clamped().value > 0),
    })
}

/// Whether an item lands on the HUD for the selected categories.
///
/// Strikes are included regardless of action cost; actions and feats are
/// excluded when passive; spells are excluded when not usable.
pub fn eligible(
    actor: &ActorSnapshot,
    item: &ItemSnapshot,
    selected: &[PopulateCategory],
) -> bool {
    if !selected.iter().any(|&cat| matches_category(item, cat)) {
        return false;
    }

    if item.item_type == ItemType::Spell && !is_spell_usable(actor, item) {
        return false;
    }

    if !is_strike(item)
        && matches!(item.item_type, ItemType::Action | ItemType::Feat)
        && !has_action_cost(item)
    {
        return false;
    }

    true
}

/// Item ids eligible for the selected categories, in actor item order.
pub fn matching_items(actor: &ActorSnapshot, selected: &[PopulateCategory]) -> Vec<ItemId> {
    actor
        .items
        .iter()
        .filter(|item| eligible(actor, item, selected))
        .map(|item| item.id.clone())
        .collect()
}

/// Feats with no action cost: the passive selection persisted per actor.
pub fn passive_feats(actor: &ActorSnapshot) -> Vec<ItemId> {
    actor
        .items
        .iter()
        .filter(|item| item.item_type == ItemType::Feat && !has_action_cost(item))
        .map(|item| item.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        ActorId, ItemTraits, PreparationRecord, Rank, ResourcePool, SpellIdentity,
        SpellbookSnapshot,
    };

    fn actor() -> ActorSnapshot {
        ActorSnapshot::new(ActorId::new("hero"), "Hero")
    }

    fn spell(identity: &str, rank: u8) -> ItemSnapshot {
        ItemSnapshot::new(ItemId::new(identity), identity, ItemType::Spell)
            .with_rank(Rank::new(rank).unwrap())
            .with_spell_identity(SpellIdentity::new(identity))
    }

    #[test]
    fn strikes_are_always_eligible_even_without_cost() {
        let actor = actor();
        let strike =
            ItemSnapshot::new(ItemId::new("claw"), "Claw", ItemType::Melee).with_strike();
        assert!(eligible(&actor, &strike, &[PopulateCategory::Strikes]));

        // A melee entry without the strike action is not a strike.
        let inert = ItemSnapshot::new(ItemId::new("prop"), "Prop", ItemType::Melee);
        assert!(!eligible(&actor, &inert, &[PopulateCategory::Strikes]));
    }

    #[test]
    fn passive_feats_are_excluded_from_population() {
        let actor = actor();
        let passive = ItemSnapshot::new(ItemId::new("toughness"), "Toughness", ItemType::Feat);
        let active = ItemSnapshot::new(ItemId::new("sudden-charge"), "Sudden Charge", ItemType::Feat)
            .with_action_cost(ActionCost::Actions(2));

        assert!(!eligible(&actor, &passive, &[PopulateCategory::Feats]));
        assert!(eligible(&actor, &active, &[PopulateCategory::Feats]));

        let mut actor = actor;
        actor.items = vec![passive.clone(), active];
        assert_eq!(passive_feats(&actor), vec![passive.id]);
    }

    #[test]
    fn prepared_spell_usability_consults_expended_flags() {
        let mut actor = actor();
        let mut book = SpellbookSnapshot::new(ItemId::new("book"), CastingKind::Prepared);
        book.ranks.prepare(
            Rank::new(3).unwrap(),
            PreparationRecord::new(SpellIdentity::new("fireball"), true),
        );
        actor.spellbooks.push(book);

        let fireball = spell("fireball", 3);
        assert!(!is_spell_usable(&actor, &fireball));

        actor.spellbooks[0].ranks.prepare(
            Rank::new(3).unwrap(),
            PreparationRecord::new(SpellIdentity::new("fireball"), false),
        );
        assert!(is_spell_usable(&actor, &fireball));
    }

    #[test]
    fn spontaneous_spells_can_heighten_into_higher_slots() {
        let mut actor = actor();
        let mut book = SpellbookSnapshot::new(ItemId::new("repertoire"), CastingKind::Spontaneous);
        book.ranks.set_pool(Rank::new(5).unwrap(), ResourcePool::new(1, 2));
        actor.spellbooks.push(book);

        assert!(is_spell_usable(&actor, &spell("haste", 3)));
        assert!(!is_spell_usable(&actor, &spell("wish", 9)));
    }

    #[test]
    fn focus_spells_need_a_focus_point() {
        let mut actor = actor();
        let lay_on_hands = spell("lay-on-hands", 1).with_traits(ItemTraits::FOCUS);

        assert!(!is_spell_usable(&actor, &lay_on_hands));

        actor.focus = Some(ResourcePool::new(1, 2));
        assert!(is_spell_usable(&actor, &lay_on_hands));

        actor.focus = Some(ResourcePool::new(0, 2));
        assert!(!is_spell_usable(&actor, &lay_on_hands));
    }

    #[test]
    fn cantrips_are_always_usable() {
        let actor = actor();
        let light = spell("light", 1).with_traits(ItemTraits::CANTRIP);
        assert!(is_spell_usable(&actor, &light));
    }
}
