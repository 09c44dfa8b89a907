//! Spell slot aggregation for prepared casters.
//!
//! A spell readied into several slots (possibly at several ranks) collapses
//! into one display cell. The aggregator fans in over the sparse per-rank
//! slot map, counting preparations and unexpended casts per spell identity.

use crate::snapshot::{ItemSnapshot, Rank, RankSlots, ResourcePool, SpellIdentity};

/// Consolidated slot usage for one spell identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedSpellView {
    pub total_preparations: u32,
    pub remaining_casts: u32,
    /// Cantrip / at-will spells bypass tracking entirely.
    pub cantrip_or_at_will: bool,
}

impl AggregatedSpellView {
    /// Untracked view for cantrip and at-will spells.
    pub const UNTRACKED: Self = Self {
        total_preparations: 0,
        remaining_casts: 0,
        cantrip_or_at_will: true,
    };

    /// Uses pair for the cell's indicator; `None` when the spell is
    /// untracked and no indicator is shown.
    pub fn uses(&self) -> Option<ResourcePool> {
        if self.cantrip_or_at_will {
            None
        } else {
            Some(ResourcePool::new(
                self.remaining_casts,
                self.total_preparations,
            ))
        }
    }
}

/// Counts preparations and remaining casts of one identity across all ranks.
///
/// Pure fan-in: two calls over an unchanged slot map yield identical views.
pub fn aggregate(identity: &SpellIdentity, ranks: &RankSlots) -> AggregatedSpellView {
    let mut total_preparations = 0;
    let mut remaining_casts = 0;

    for (_, slot) in ranks.iter() {
        for record in slot.prepared.iter().filter(|r| &r.spell == identity) {
            total_preparations += 1;
            if !record.expended {
                remaining_casts += 1;
            }
        }
    }

    AggregatedSpellView {
        total_preparations,
        remaining_casts,
        cantrip_or_at_will: false,
    }
}

/// One emitted display cell for an aggregated spell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCell {
    pub identity: SpellIdentity,
    /// Lowest rank the spell is readied at; fixes the cell's position so the
    /// layout is stable across recomputations.
    pub first_rank: Rank,
    pub view: AggregatedSpellView,
}

/// Emits one cell per spell identity readied in the given slot map.
///
/// Cells are ordered by first-encountered rank ascending, then slot order
/// within a rank; identities with zero preparations never appear. The
/// cantrip/at-will check consults the spell's static definition once, via
/// `spell_lookup`, and short-circuits the count for matching spells.
pub fn aggregate_cells<'a>(
    ranks: &RankSlots,
    spell_lookup: impl Fn(&SpellIdentity) -> Option<&'a ItemSnapshot>,
) -> Vec<SpellCell> {
    let mut cells: Vec<SpellCell> = Vec::new();

    for (rank, slot) in ranks.iter() {
        for record in &slot.prepared {
            if cells.iter().any(|cell| cell.identity == record.spell) {
                continue;
            }

            let untracked = spell_lookup(&record.spell)
                .is_some_and(ItemSnapshot::is_cantrip_or_at_will);
            let view = if untracked {
                AggregatedSpellView::UNTRACKED
            } else {
                aggregate(&record.spell, ranks)
            };

            cells.push(SpellCell {
                identity: record.spell.clone(),
                first_rank: rank,
                view,
            });
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ItemId, ItemTraits, ItemType, PreparationRecord};

    fn rank(n: u8) -> Rank {
        Rank::new(n).unwrap()
    }

    fn prepared(ranks: &[(u8, &str, bool)]) -> RankSlots {
        let mut slots = RankSlots::empty();
        for (r, identity, expended) in ranks {
            slots.prepare(
                rank(*r),
                PreparationRecord::new(SpellIdentity::new(*identity), *expended),
            );
        }
        slots
    }

    #[test]
    fn counts_preparations_and_remaining_casts_across_ranks() {
        // Fireball twice at rank 3 (one expended), once at rank 5.
        let slots = prepared(&[
            (3, "fireball", true),
            (3, "fireball", false),
            (5, "fireball", false),
        ]);

        let view = aggregate(&SpellIdentity::new("fireball"), &slots);
        assert_eq!(view.total_preparations, 3);
        assert_eq!(view.remaining_casts, 2);
        assert!(!view.cantrip_or_at_will);
        assert_eq!(view.uses(), Some(ResourcePool::new(2, 3)));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let slots = prepared(&[(1, "heal", false), (2, "heal", true)]);
        let identity = SpellIdentity::new("heal");
        assert_eq!(aggregate(&identity, &slots), aggregate(&identity, &slots));
    }

    #[test]
    fn unprepared_spells_emit_no_cell() {
        let slots = prepared(&[(3, "fireball", false)]);
        let cells = aggregate_cells(&slots, |_| None);
        assert_eq!(cells.len(), 1);
        assert!(!cells.iter().any(|c| c.identity == SpellIdentity::new("haste")));
    }

    #[test]
    fn cells_are_ordered_by_first_encountered_rank() {
        let slots = prepared(&[
            (5, "fireball", false),
            (3, "haste", false),
            (3, "fireball", true),
        ]);

        let cells = aggregate_cells(&slots, |_| None);
        let order: Vec<&str> = cells.iter().map(|c| c.identity.as_str()).collect();
        // Fireball's first sighting is at rank 3, after haste in slot order.
        assert_eq!(order, vec!["haste", "fireball"]);
        assert_eq!(cells[0].first_rank, rank(3));
        assert_eq!(cells[1].first_rank, rank(3));
        // The rank 3 preparation still counts toward fireball's totals.
        assert_eq!(cells[1].view.total_preparations, 2);
    }

    #[test]
    fn cantrips_bypass_tracking_even_when_slotted() {
        let slots = prepared(&[(0, "light", false), (0, "light", true)]);
        let light = ItemSnapshot::new(ItemId::new("light"), "Light", ItemType::Spell)
            .with_traits(ItemTraits::CANTRIP)
            .with_spell_identity(SpellIdentity::new("light"));

        let cells = aggregate_cells(&slots, |identity| {
            (identity == &SpellIdentity::new("light")).then_some(&light)
        });

        assert_eq!(cells.len(), 1);
        assert!(cells[0].view.cantrip_or_at_will);
        assert_eq!(cells[0].view.uses(), None);
    }
}
