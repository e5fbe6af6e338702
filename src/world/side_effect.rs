//! Opt-in side effects of terminal writes.

use bitflags::bitflags;

bitflags! {
    /// Engine side effects a block write may trigger.
    ///
    /// Every effect is opt-in: bulk edits typically write with an empty set
    /// and apply the effects once afterwards. Adapters report the subset
    /// they actually support when asked to apply a set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SideEffectSet: u8 {
        /// Recompute physics for the changed block.
        const PHYSICS = 1;
        /// Notify neighboring blocks of the change.
        const NEIGHBORS = 1 << 1;
        /// Recompute lighting around the change.
        const LIGHTING = 1 << 2;
        /// Wake entity AI observing the position.
        const ENTITY_AI = 1 << 3;
    }
}

impl SideEffectSet {
    /// Effects applied for ordinary single-block edits.
    pub fn defaults() -> Self {
        Self::PHYSICS | Self::NEIGHBORS | Self::LIGHTING
    }

    /// Everything suppressed, for bulk edits.
    pub fn none() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_entity_ai() {
        let defaults = SideEffectSet::defaults();
        assert!(defaults.contains(SideEffectSet::PHYSICS));
        assert!(!defaults.contains(SideEffectSet::ENTITY_AI));
    }

    #[test]
    fn test_subset_intersection() {
        let supported = SideEffectSet::PHYSICS | SideEffectSet::NEIGHBORS;
        let requested = SideEffectSet::defaults();
        assert_eq!(requested & supported, supported);
    }
}
