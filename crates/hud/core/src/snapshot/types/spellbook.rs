//! Spellcasting entry snapshots: per-rank slot maps and preparation records.

use super::common::{ItemId, Rank, ResourcePool, SpellIdentity};

/// How a spellcasting entry consumes its slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CastingKind {
    /// Spells are readied into specific slots ahead of time; each slot tracks
    /// its own expended flag.
    Prepared,
    /// A per-rank slot pool shared by every known spell of that rank.
    Spontaneous,
    /// Casts consume focus points from the actor's focus pool.
    Focus,
    /// Granted spells; tracked per item uses when limited at all.
    Innate,
}

/// One readied instance of a spell in a slot.
///
/// Several records may share a [`SpellIdentity`] (the same spell prepared
/// more than once, possibly at different ranks); each is expended
/// independently.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreparationRecord {
    pub spell: SpellIdentity,
    pub expended: bool,
}

impl PreparationRecord {
    pub fn new(spell: SpellIdentity, expended: bool) -> Self {
        Self { spell, expended }
    }
}

/// Slot state for a single rank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankSlot {
    /// Preparation records (prepared casters).
    pub prepared: Vec<PreparationRecord>,
    /// Shared slot pool (spontaneous casters); `None` when the rank has no
    /// slots at all.
    pub pool: Option<ResourcePool>,
}

/// Dense rank-indexed slot table, ranks 0 through [`Rank::MAX`].
///
/// The map the host exposes is sparse; absent ranks read as empty slots here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankSlots {
    slots: Vec<RankSlot>,
}

impl RankSlots {
    pub fn empty() -> Self {
        Self {
            slots: vec![RankSlot::default(); Rank::COUNT],
        }
    }

    pub fn rank(&self, rank: Rank) -> &RankSlot {
        &self.slots[rank.as_index()]
    }

    pub fn rank_mut(&mut self, rank: Rank) -> &mut RankSlot {
        &mut self.slots[rank.as_index()]
    }

    /// Ranks in ascending order with their slot state.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &RankSlot)> {
        Rank::all().map(|rank| (rank, self.rank(rank)))
    }

    /// Appends a preparation record at the given rank.
    pub fn prepare(&mut self, rank: Rank, record: PreparationRecord) {
        self.rank_mut(rank).prepared.push(record);
    }

    /// Sets the shared slot pool for a rank.
    pub fn set_pool(&mut self, rank: Rank, pool: ResourcePool) {
        self.rank_mut(rank).pool = Some(pool);
    }
}

impl Default for RankSlots {
    fn default() -> Self {
        Self::empty()
    }
}

/// Read-only snapshot of one spellcasting entry item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellbookSnapshot {
    /// Item id of the spellcasting entry document.
    pub id: ItemId,
    pub casting: CastingKind,
    pub ranks: RankSlots,
}

impl SpellbookSnapshot {
    pub fn new(id: ItemId, casting: CastingKind) -> Self {
        Self {
            id,
            casting,
            ranks: RankSlots::empty(),
        }
    }

    /// Every spell identity referenced by this entry's slots, in
    /// first-encountered order (ascending rank, then slot order).
    pub fn identities(&self) -> Vec<SpellIdentity> {
        let mut seen = Vec::new();
        for (_, slot) in self.ranks.iter() {
            for record in &slot.prepared {
                if !seen.contains(&record.spell) {
                    seen.push(record.spell.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_ranks_read_as_empty() {
        let slots = RankSlots::empty();
        for (_, slot) in slots.iter() {
            assert!(slot.prepared.is_empty());
            assert!(slot.pool.is_none());
        }
    }

    #[test]
    fn identities_are_deduplicated_in_rank_order() {
        let mut book = SpellbookSnapshot::new(ItemId::new("entry"), CastingKind::Prepared);
        let fireball = SpellIdentity::new("fireball");
        let haste = SpellIdentity::new("haste");
        book.ranks.prepare(
            Rank::new(5).unwrap(),
            PreparationRecord::new(fireball.clone(), false),
        );
        book.ranks.prepare(
            Rank::new(3).unwrap(),
            PreparationRecord::new(haste.clone(), false),
        );
        book.ranks.prepare(
            Rank::new(3).unwrap(),
            PreparationRecord::new(fireball.clone(), true),
        );

        // Rank 3 is visited before rank 5, so haste's first sighting wins.
        assert_eq!(book.identities(), vec![haste, fireball]);
    }
}
