//! Inert terminal extent.

use crate::biome::Biome;
use crate::block::{BaseBlock, BlockState, LazyBlock};
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::entity::{BaseEntity, Entity, Location};
use crate::operation::BoxedOperation;
use crate::region::Region;

use super::Extent;

/// An extent that contains nothing and accepts nothing.
///
/// Reads yield air and the default biome, writes and spawns are refused.
/// Serves as a chain terminal in tests and for sessions detached from
/// their world.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullExtent;

impl Extent for NullExtent {
    fn get_block(&self, _position: BlockVector) -> Result<BaseBlock> {
        Ok(BaseBlock::new(BlockState::AIR))
    }

    fn get_lazy_block(&self, position: BlockVector) -> Result<LazyBlock<'_>> {
        Ok(LazyBlock::new(BlockState::AIR, self, position))
    }

    fn set_block(&mut self, _position: BlockVector, _block: BaseBlock) -> Result<bool> {
        Ok(false)
    }

    fn get_biome(&self, _column: ColumnVector) -> Result<Biome> {
        Ok(Biome::default())
    }

    fn set_biome(&mut self, _column: ColumnVector, _biome: Biome) -> Result<bool> {
        Ok(false)
    }

    fn create_entity(
        &mut self,
        _location: Location,
        _entity: BaseEntity,
    ) -> Result<Option<Box<dyn Entity>>> {
        Ok(None)
    }

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>> {
        Ok(Vec::new())
    }

    fn entities_in_region(&self, _region: &dyn Region) -> Result<Vec<Box<dyn Entity>>> {
        Ok(Vec::new())
    }

    fn minimum_point(&self) -> BlockVector {
        BlockVector::ZERO
    }

    fn maximum_point(&self) -> BlockVector {
        BlockVector::ZERO
    }

    fn interleave_operation(&self) -> Option<BoxedOperation> {
        None
    }

    fn finalize_operation(&self) -> Option<BoxedOperation> {
        None
    }
}
