//! Item-level snapshot data read from the host's document schema.
//!
//! Every field mirrors something the host exposes on an item document; all of
//! them are optional at the schema boundary, so constructors start from the
//! sparsest possible snapshot and `with_*` builders layer data on.

use super::common::{ItemId, Rank, ResourcePool, SpellIdentity};

/// Host item document types that can back a display cell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemType {
    Weapon,
    /// Derived melee attack entry (carries the strike action).
    Melee,
    /// Derived ranged attack entry (carries the strike action).
    Ranged,
    /// Standalone activity.
    Action,
    Feat,
    Spell,
    Consumable,
    Ammo,
    #[default]
    Equipment,
    Armor,
    Shield,
    Backpack,
    /// Host macro document referenced from a cell.
    Macro,
}

bitflags::bitflags! {
    /// Traits carried on an item document that the engine cares about.
    ///
    /// The host stores traits as an open list of strings; unknown names are
    /// dropped at the snapshot boundary.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemTraits: u16 {
        const ATTACK      = 1 << 0;
        const MANIPULATE  = 1 << 1;
        const CONCENTRATE = 1 << 2;
        const MOVE        = 1 << 3;
        const EXPLORATION = 1 << 4;
        const FOCUS       = 1 << 5;
        const CANTRIP     = 1 << 6;
        const TOUCH       = 1 << 7;
        const REACH       = 1 << 8;
        const AT_WILL     = 1 << 9;
    }
}

impl ItemTraits {
    /// Trait names as they appear in the host schema, in a stable order.
    pub const NAMED: &[(Self, &str)] = &[
        (Self::ATTACK, "attack"),
        (Self::MANIPULATE, "manipulate"),
        (Self::CONCENTRATE, "concentrate"),
        (Self::MOVE, "move"),
        (Self::EXPLORATION, "exploration"),
        (Self::FOCUS, "focus"),
        (Self::CANTRIP, "cantrip"),
        (Self::TOUCH, "touch"),
        (Self::REACH, "reach"),
        (Self::AT_WILL, "at-will"),
    ];

    /// Parses a host trait list, ignoring names the engine does not track.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut traits = Self::empty();
        for name in names {
            if let Some((flag, _)) = Self::NAMED.iter().find(|(_, n)| *n == name) {
                traits |= *flag;
            }
        }
        traits
    }

    /// Host schema name of a single-flag value, if it is one.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }
}

/// Normalized action cost of an item.
///
/// The host stores this across two fields (a numeric action count and a
/// free/reaction action type); the snapshot boundary collapses them into one
/// tagged value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCost {
    Free,
    Reaction,
    /// 1, 2, or 3 actions.
    Actions(u8),
}

impl ActionCost {
    /// Numeric action count, zero for free actions and reactions.
    pub fn action_count(self) -> u8 {
        match self {
            ActionCost::Actions(n) => n,
            ActionCost::Free | ActionCost::Reaction => 0,
        }
    }

    /// Ordering weight: free < reaction < 1 < 2 < 3 actions.
    pub fn sort_weight(self) -> u8 {
        match self {
            ActionCost::Free => 0,
            ActionCost::Reaction => 1,
            ActionCost::Actions(n) => 2 * n,
        }
    }
}

/// Who or what an item can be aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCategory {
    #[default]
    Any,
    SelfOnly,
    Enemy,
    Ally,
    Willing,
    Creature,
}

/// Area template shapes that bypass single-target selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateShape {
    Emanation,
    Burst,
    Cone,
    Line,
}

/// Target configuration read from an item document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSpec {
    pub category: TargetCategory,
    /// Specific creature count, when the item names one.
    pub count: Option<u32>,
    pub template: Option<TemplateShape>,
    /// Template size in feet.
    pub size: Option<u32>,
}

/// Raw range configuration read from an item document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSpec {
    /// Flat range in feet.
    pub feet: Option<u32>,
    /// Range increment in feet (ranged weapons).
    pub increment: Option<u32>,
}

/// How a spell resolves against its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellDelivery {
    /// Spell attack roll against the target.
    Attack,
    /// Target rolls a saving throw.
    Save,
}

/// Read-only snapshot of one item document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub traits: ItemTraits,
    pub action_cost: Option<ActionCost>,
    /// Spell rank; `None` for non-spells.
    pub rank: Option<Rank>,
    /// Identity used for slot deduplication; `None` for non-spells.
    pub spell_identity: Option<SpellIdentity>,
    pub delivery: Option<SpellDelivery>,
    /// Limited uses; only meaningful when `max > 0`.
    pub uses: Option<ResourcePool>,
    pub quantity: Option<u32>,
    pub target: Option<TargetSpec>,
    pub range: Option<RangeSpec>,
    /// Reach in feet when the reach trait is present.
    pub reach: Option<u32>,
    /// Item carries the strike action (melee/ranged attack entries).
    pub strike: bool,
}

impl ItemSnapshot {
    /// Sparsest snapshot: everything beyond identity and type is absent.
    pub fn new(id: ItemId, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id,
            name: name.into(),
            item_type,
            traits: ItemTraits::empty(),
            action_cost: None,
            rank: None,
            spell_identity: None,
            delivery: None,
            uses: None,
            quantity: None,
            target: None,
            range: None,
            reach: None,
            strike: false,
        }
    }

    pub fn with_traits(mut self, traits: ItemTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_action_cost(mut self, cost: ActionCost) -> Self {
        self.action_cost = Some(cost);
        self
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_spell_identity(mut self, identity: SpellIdentity) -> Self {
        self.spell_identity = Some(identity);
        self
    }

    pub fn with_delivery(mut self, delivery: SpellDelivery) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn with_uses(mut self, value: u32, max: u32) -> Self {
        self.uses = Some(ResourcePool::new(value, max));
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_reach(mut self, feet: u32) -> Self {
        self.reach = Some(feet);
        self
    }

    pub fn with_strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// True for spells carrying the focus trait.
    pub fn is_focus_spell(&self) -> bool {
        self.item_type == ItemType::Spell && self.traits.contains(ItemTraits::FOCUS)
    }

    /// True for spells that never consume slots or uses.
    pub fn is_cantrip_or_at_will(&self) -> bool {
        self.item_type == ItemType::Spell
            && self
                .traits
                .intersects(ItemTraits::CANTRIP | ItemTraits::AT_WILL)
    }
}
