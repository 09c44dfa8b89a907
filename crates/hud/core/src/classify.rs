//! Depletion classification for resource pools.
//!
//! A pool is depleted when it has nothing left of a non-zero maximum. A pool
//! that was never meaningful (`max == 0`, e.g. a caster with no focus points)
//! is not depleted; it simply has no indicator at all.

use crate::snapshot::ResourcePool;

/// Cell-level depletion flag.
pub fn depleted(pool: ResourcePool) -> bool {
    let pool = pool.clamped();
    pool.value == 0 && pool.max > 0
}

/// Lit pip count for a multi-pip filter chip.
///
/// A chip with `pip_index` pips lights `min(value, pip_index)` of them, so a
/// three-pip actions chip shows two lit pips when two of three actions
/// remain.
pub fn pips_remaining(pool: ResourcePool, pip_index: u32) -> u32 {
    pool.clamped().value.min(pip_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_is_never_depleted() {
        assert!(!depleted(ResourcePool::new(0, 0)));
        // value without a maximum is a transient host artifact, still not depleted
        assert!(!depleted(ResourcePool::new(5, 0)));
    }

    #[test]
    fn empty_pool_with_real_max_is_depleted() {
        assert!(depleted(ResourcePool::new(0, 1)));
        assert!(depleted(ResourcePool::new(0, 3)));
        assert!(!depleted(ResourcePool::new(1, 3)));
    }

    #[test]
    fn pips_are_bounded_by_value_and_index() {
        let pool = ResourcePool::new(1, 3);
        assert_eq!(pips_remaining(pool, 2), 1);

        for n in 0..=5 {
            let pips = pips_remaining(pool, n);
            assert!(pips <= pool.value);
            assert!(pips <= n);
        }
    }

    #[test]
    fn pips_are_monotonic_in_pip_index() {
        let pool = ResourcePool::new(2, 3);
        let mut last = 0;
        for n in 0..=5 {
            let pips = pips_remaining(pool, n);
            assert!(pips >= last);
            last = pips;
        }
    }

    #[test]
    fn pips_clamp_unclamped_input() {
        // transient value > max from a host update batch
        assert_eq!(pips_remaining(ResourcePool::new(9, 3), 3), 3);
    }
}
