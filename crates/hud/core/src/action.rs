//! Use-time dispatch kinds.
//!
//! The host exposes items whose capabilities would otherwise have to be
//! probed at click time. Instead the shape resolves once, at extraction, to a
//! tagged kind; everything downstream dispatches on the tag.

use crate::snapshot::{ActionCost, ItemSnapshot, ItemType};

/// What using a display cell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Melee or ranged attack entry carrying the strike action.
    Strike,
    Spell,
    Consumable,
    /// Feat or standalone activity with a real action cost.
    Feat,
    /// Host macro execution.
    Macro,
}

impl ActionKind {
    /// Resolves an item snapshot to its use-time kind.
    ///
    /// Returns `None` for items with no use path: passive feats and
    /// activities (zero action cost), plain weapons (used through their
    /// strike entries), and inert gear.
    pub fn resolve(item: &ItemSnapshot) -> Option<ActionKind> {
        match item.item_type {
            ItemType::Melee | ItemType::Ranged if item.strike => Some(ActionKind::Strike),
            ItemType::Melee | ItemType::Ranged => None,
            ItemType::Spell => Some(ActionKind::Spell),
            ItemType::Consumable => Some(ActionKind::Consumable),
            ItemType::Feat | ItemType::Action if has_active_cost(item) => Some(ActionKind::Feat),
            ItemType::Feat | ItemType::Action => None,
            ItemType::Macro => Some(ActionKind::Macro),
            _ => None,
        }
    }
}

fn has_active_cost(item: &ItemSnapshot) -> bool {
    matches!(
        item.action_cost,
        Some(ActionCost::Actions(n)) if n > 0
    ) || matches!(item.action_cost, Some(ActionCost::Reaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ItemId;

    fn item(item_type: ItemType) -> ItemSnapshot {
        ItemSnapshot::new(ItemId::new("x"), "X", item_type)
    }

    #[test]
    fn strike_requires_melee_or_ranged_with_strike_action() {
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Melee).with_strike()),
            Some(ActionKind::Strike)
        );
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Ranged).with_strike()),
            Some(ActionKind::Strike)
        );
        // A melee entry without the strike action is not usable.
        assert_eq!(ActionKind::resolve(&item(ItemType::Melee)), None);
        // Plain weapons are used through their strike entries.
        assert_eq!(ActionKind::resolve(&item(ItemType::Weapon)), None);
    }

    #[test]
    fn passive_feats_have_no_use_path() {
        assert_eq!(ActionKind::resolve(&item(ItemType::Feat)), None);
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Feat).with_action_cost(ActionCost::Free)),
            None
        );
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Feat).with_action_cost(ActionCost::Actions(1))),
            Some(ActionKind::Feat)
        );
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Action).with_action_cost(ActionCost::Reaction)),
            Some(ActionKind::Feat)
        );
    }

    #[test]
    fn spells_consumables_and_macros_always_resolve() {
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Spell)),
            Some(ActionKind::Spell)
        );
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Consumable)),
            Some(ActionKind::Consumable)
        );
        assert_eq!(
            ActionKind::resolve(&item(ItemType::Macro)),
            Some(ActionKind::Macro)
        );
    }
}
