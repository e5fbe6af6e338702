//! Write masking: restrict edits to positions a mask accepts.

use crate::block::BaseBlock;
use crate::core::types::{BlockVector, Result};
use crate::region::Region;

use super::{DelegateExtent, Extent};

/// Predicate over block positions.
pub trait Mask {
    fn test(&self, position: BlockVector) -> bool;
}

/// Mask accepting positions a region precisely contains.
pub struct RegionMask<R: Region> {
    region: R,
}

impl<R: Region> RegionMask<R> {
    pub fn new(region: R) -> Self {
        Self { region }
    }
}

impl<R: Region> Mask for RegionMask<R> {
    fn test(&self, position: BlockVector) -> bool {
        self.region.contains(position)
    }
}

/// Mask accepting only positions every member mask accepts.
#[derive(Default)]
pub struct MaskIntersection {
    masks: Vec<Box<dyn Mask>>,
}

impl MaskIntersection {
    pub fn new(masks: Vec<Box<dyn Mask>>) -> Self {
        Self { masks }
    }

    pub fn add(&mut self, mask: Box<dyn Mask>) {
        self.masks.push(mask);
    }
}

impl Mask for MaskIntersection {
    fn test(&self, position: BlockVector) -> bool {
        self.masks.iter().all(|mask| mask.test(position))
    }
}

/// Layer that silently drops block writes outside its mask.
///
/// A rejected write reports `Ok(false)`; rejection is an expected outcome,
/// never an error. Reads and biome traffic pass through untouched.
pub struct MaskingExtent<E: Extent, M: Mask> {
    inner: E,
    mask: M,
}

impl<E: Extent, M: Mask> MaskingExtent<E, M> {
    pub fn new(inner: E, mask: M) -> Self {
        Self { inner, mask }
    }

    pub fn mask(&self) -> &M {
        &self.mask
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Extent, M: Mask> DelegateExtent for MaskingExtent<E, M> {
    type Inner = E;

    fn inner(&self) -> &E {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        if !self.mask.test(position) {
            return Ok(false);
        }
        self.inner.set_block(position, block)
    }
}

#[cfg(test)]
mod tests {
    use crate::block::BlockState;
    use crate::extent::NullExtent;
    use crate::region::CuboidRegion;
    use crate::world::LocalWorld;

    use super::*;

    fn stone() -> BaseBlock {
        BaseBlock::new(BlockState::STONE)
    }

    #[test]
    fn test_write_inside_mask_passes_through() {
        let world = LocalWorld::new("w", BlockVector::splat(-8), BlockVector::splat(8));
        let mask = RegionMask::new(CuboidRegion::new(BlockVector::ZERO, BlockVector::splat(4)));
        let mut layer = MaskingExtent::new(world.handle(), mask);

        assert!(Extent::set_block(&mut layer, BlockVector::new(1, 1, 1), stone()).unwrap());
        let inner = layer.into_inner();
        assert_eq!(
            inner.get_block(BlockVector::new(1, 1, 1)).unwrap().state(),
            BlockState::STONE
        );
    }

    #[test]
    fn test_write_outside_mask_is_refused_not_an_error() {
        let world = LocalWorld::new("w", BlockVector::splat(-8), BlockVector::splat(8));
        let mask = RegionMask::new(CuboidRegion::new(BlockVector::ZERO, BlockVector::splat(4)));
        let mut layer = MaskingExtent::new(world.handle(), mask);

        assert!(!Extent::set_block(&mut layer, BlockVector::new(7, 7, 7), stone()).unwrap());
        let inner = layer.into_inner();
        assert!(inner
            .get_block(BlockVector::new(7, 7, 7))
            .unwrap()
            .state()
            .is_air());
    }

    #[test]
    fn test_intersection_requires_all_members() {
        let a = RegionMask::new(CuboidRegion::new(BlockVector::ZERO, BlockVector::splat(4)));
        let b = RegionMask::new(CuboidRegion::new(BlockVector::splat(2), BlockVector::splat(6)));
        let both = MaskIntersection::new(vec![Box::new(a), Box::new(b)]);

        assert!(both.test(BlockVector::splat(3)));
        assert!(!both.test(BlockVector::splat(1)));

        let mut layer = MaskingExtent::new(NullExtent, both);
        // Refused by the terminal either way; the mask just short-circuits
        assert!(!Extent::set_block(&mut layer, BlockVector::splat(1), stone()).unwrap());
    }
}
