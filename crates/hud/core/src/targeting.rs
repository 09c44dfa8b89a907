//! Targeting rules: whether an item needs a target selector, what it
//! requires of its targets, and effective range on the grid.
//!
//! Everything here is pure over snapshot data; token positions arrive as
//! grid-coordinate footprints, never as live host objects.

use crate::config::HudConfig;
use crate::snapshot::{
    ItemSnapshot, ItemTraits, ItemType, SpellDelivery, TargetCategory, TargetSpec, TemplateShape,
};

/// Whether using the item (or its strike activity) requires picking targets.
///
/// Strikes always do. Self-targeting items and area templates never do; the
/// template is placed, not aimed at a token. A specific creature count, the
/// attack trait, spell attack rolls, and save spells with a named target
/// count all do.
pub fn needs_targeting(item: &ItemSnapshot, strike_activity: bool) -> bool {
    if strike_activity {
        return true;
    }

    let target = item.target.unwrap_or_default();

    if target.category == TargetCategory::SelfOnly {
        return false;
    }
    if target.template.is_some() {
        return false;
    }
    if target.count.is_some_and(|count| count > 0) {
        return true;
    }
    if item.traits.contains(ItemTraits::ATTACK) {
        return true;
    }

    if item.item_type == ItemType::Spell {
        match item.delivery {
            Some(SpellDelivery::Attack) => return true,
            Some(SpellDelivery::Save) => return target.count.is_some(),
            None => {}
        }
    }

    false
}

/// Template to place for area items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub shape: TemplateShape,
    /// Size in feet.
    pub size: u32,
}

/// What a target selector must enforce for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRequirements {
    pub min_targets: u32,
    pub max_targets: u32,
    pub category: TargetCategory,
    pub template: Option<Template>,
    /// Effective range in grid squares, when the item has one.
    pub range_squares: Option<u32>,
}

impl Default for TargetRequirements {
    fn default() -> Self {
        Self {
            min_targets: 1,
            max_targets: 1,
            category: TargetCategory::Any,
            template: None,
            range_squares: None,
        }
    }
}

/// Extracts target requirements from an item snapshot.
pub fn target_requirements(item: &ItemSnapshot) -> TargetRequirements {
    let mut requirements = TargetRequirements::default();
    let target = item.target.unwrap_or_default();

    requirements.category = target.category;
    if let Some(count) = target.count {
        requirements.min_targets = count.max(1);
        requirements.max_targets = count;
    }
    if let Some(shape) = target.template {
        requirements.template = Some(Template {
            shape,
            size: target.size.unwrap_or(0),
        });
    }

    requirements.range_squares = effective_range(item).squares;
    requirements
}

/// Effective range of an item, normalized to grid squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveRange {
    pub squares: Option<u32>,
    /// Original value in feet, kept for display.
    pub feet: Option<u32>,
    pub touch: bool,
}

/// Computes an item's effective range.
///
/// Touch items reach one adjacent square. Ranged weapons reach their range
/// increment times the maximum increment count. The reach trait raises a
/// shorter flat range. Feet convert to squares at the system's fixed grid
/// scale.
pub fn effective_range(item: &ItemSnapshot) -> EffectiveRange {
    if item.traits.contains(ItemTraits::TOUCH) {
        return EffectiveRange {
            squares: Some(1),
            feet: Some(HudConfig::FEET_PER_SQUARE),
            touch: true,
        };
    }

    let range = item.range.unwrap_or_default();
    let mut feet = range.feet;

    if let Some(increment) = range.increment {
        feet = Some(increment * HudConfig::MAX_RANGE_INCREMENTS);
    }

    if item.traits.contains(ItemTraits::REACH) {
        let reach = item.reach.unwrap_or(10);
        feet = Some(feet.map_or(reach, |f| f.max(reach)));
    }

    EffectiveRange {
        squares: feet.map(|f| f / HudConfig::FEET_PER_SQUARE),
        feet,
        touch: false,
    }
}

/// Token footprint in grid coordinates (top-left square plus size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn single(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    fn right(&self) -> i32 {
        self.x + self.width.max(1) as i32 - 1
    }

    fn bottom(&self) -> i32 {
        self.y + self.height.max(1) as i32 - 1
    }
}

/// Minimum distance in squares between two footprints.
///
/// Chebyshev metric over occupied squares: the gap along each axis between
/// the two rectangles, whichever is larger. Overlapping or adjacent
/// footprints are zero squares apart.
pub fn grid_distance(a: Footprint, b: Footprint) -> u32 {
    let dx = axis_gap(a.x, a.right(), b.x, b.right());
    let dy = axis_gap(a.y, a.bottom(), b.y, b.bottom());
    dx.max(dy)
}

fn axis_gap(a_min: i32, a_max: i32, b_min: i32, b_max: i32) -> u32 {
    if b_min > a_max {
        (b_min - a_max) as u32
    } else if a_min > b_max {
        (a_min - b_max) as u32
    } else {
        0
    }
}

/// Token disposition toward the displayed actor's party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disposition {
    Friendly,
    Neutral,
    Hostile,
}

/// The target-relevant slice of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenRef {
    pub id: String,
    pub disposition: Disposition,
    pub visible: bool,
    /// Token backs a creature actor (not a hazard or loot pile).
    pub creature: bool,
}

/// Why a token cannot be targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetRejection {
    #[error("target is not visible")]
    NotVisible,
    #[error("item only targets the user")]
    SelfOnly,
    #[error("cannot target yourself")]
    CannotTargetSelf,
    #[error("target must be an enemy")]
    MustBeEnemy,
    #[error("target must be an ally")]
    MustBeAlly,
    #[error("target must be a creature")]
    MustBeCreature,
}

/// Validates one candidate token against the item's target category.
pub fn valid_target(
    requirements: &TargetRequirements,
    source: &TokenRef,
    target: &TokenRef,
) -> Result<(), TargetRejection> {
    if !target.visible {
        return Err(TargetRejection::NotVisible);
    }

    let is_self = source.id == target.id;
    match requirements.category {
        TargetCategory::SelfOnly if !is_self => Err(TargetRejection::SelfOnly),
        TargetCategory::Enemy if is_self => Err(TargetRejection::CannotTargetSelf),
        TargetCategory::Enemy if !is_enemy(source.disposition, target.disposition) => {
            Err(TargetRejection::MustBeEnemy)
        }
        TargetCategory::Ally | TargetCategory::Willing
            if !is_self && source.disposition != target.disposition =>
        {
            Err(TargetRejection::MustBeAlly)
        }
        TargetCategory::Creature if !target.creature => Err(TargetRejection::MustBeCreature),
        _ => Ok(()),
    }
}

fn is_enemy(source: Disposition, target: Disposition) -> bool {
    match source {
        Disposition::Friendly => target == Disposition::Hostile,
        Disposition::Hostile => target == Disposition::Friendly,
        Disposition::Neutral => target == Disposition::Hostile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ItemId, RangeSpec};

    fn spell() -> ItemSnapshot {
        ItemSnapshot::new(ItemId::new("s"), "S", ItemType::Spell)
    }

    #[test]
    fn strikes_always_need_targeting() {
        let inert = ItemSnapshot::new(ItemId::new("x"), "X", ItemType::Equipment);
        assert!(needs_targeting(&inert, true));
    }

    #[test]
    fn templates_and_self_targets_never_need_a_selector() {
        let burst = spell().with_target(TargetSpec {
            template: Some(TemplateShape::Burst),
            size: Some(20),
            ..TargetSpec::default()
        });
        assert!(!needs_targeting(&burst, false));

        let shield = spell().with_target(TargetSpec {
            category: TargetCategory::SelfOnly,
            ..TargetSpec::default()
        });
        assert!(!needs_targeting(&shield, false));
    }

    #[test]
    fn attack_spells_need_targeting() {
        let ray = spell().with_delivery(SpellDelivery::Attack);
        assert!(needs_targeting(&ray, false));

        // A save spell with no named target count places itself.
        let fear = spell().with_delivery(SpellDelivery::Save);
        assert!(!needs_targeting(&fear, false));

        let targeted_fear = spell()
            .with_delivery(SpellDelivery::Save)
            .with_target(TargetSpec {
                count: Some(1),
                ..TargetSpec::default()
            });
        assert!(needs_targeting(&targeted_fear, false));
    }

    #[test]
    fn range_increments_multiply_out() {
        let bow = ItemSnapshot::new(ItemId::new("bow"), "Bow", ItemType::Ranged)
            .with_strike()
            .with_range(RangeSpec {
                feet: None,
                increment: Some(100),
            });
        let range = effective_range(&bow);
        assert_eq!(range.feet, Some(600));
        assert_eq!(range.squares, Some(120));
    }

    #[test]
    fn touch_reaches_one_square() {
        let touch = spell().with_traits(ItemTraits::TOUCH);
        let range = effective_range(&touch);
        assert!(range.touch);
        assert_eq!(range.squares, Some(1));
    }

    #[test]
    fn reach_raises_a_shorter_range() {
        let glaive = ItemSnapshot::new(ItemId::new("glaive"), "Glaive", ItemType::Melee)
            .with_strike()
            .with_traits(ItemTraits::REACH)
            .with_range(RangeSpec {
                feet: Some(5),
                increment: None,
            });
        assert_eq!(effective_range(&glaive).feet, Some(10));
    }

    #[test]
    fn footprint_distance_is_edge_to_edge() {
        let a = Footprint::single(0, 0);
        let b = Footprint::single(3, 4);
        assert_eq!(grid_distance(a, b), 4);

        // A 2x2 token's nearest square counts, not its origin.
        let large = Footprint {
            x: 2,
            y: 2,
            width: 2,
            height: 2,
        };
        assert_eq!(grid_distance(a, large), 2);

        // Adjacent and overlapping footprints are zero apart.
        assert_eq!(grid_distance(a, Footprint::single(1, 1)), 1);
        assert_eq!(grid_distance(a, a), 0);
    }

    #[test]
    fn enemy_category_respects_dispositions() {
        let requirements = TargetRequirements {
            category: TargetCategory::Enemy,
            ..TargetRequirements::default()
        };
        let hero = TokenRef {
            id: "hero".into(),
            disposition: Disposition::Friendly,
            visible: true,
            creature: true,
        };
        let goblin = TokenRef {
            id: "goblin".into(),
            disposition: Disposition::Hostile,
            visible: true,
            creature: true,
        };
        let ally = TokenRef {
            id: "ally".into(),
            disposition: Disposition::Friendly,
            visible: true,
            creature: true,
        };

        assert_eq!(valid_target(&requirements, &hero, &goblin), Ok(()));
        assert_eq!(
            valid_target(&requirements, &hero, &ally),
            Err(TargetRejection::MustBeEnemy)
        );
        assert_eq!(
            valid_target(&requirements, &hero, &hero),
            Err(TargetRejection::CannotTargetSelf)
        );

        let hidden = TokenRef {
            visible: false,
            ..goblin
        };
        assert_eq!(
            valid_target(&requirements, &hero, &hidden),
            Err(TargetRejection::NotVisible)
        );
    }
}
