//! Decorator base for extents that forward to a wrapped inner extent.

use crate::biome::Biome;
use crate::block::{BaseBlock, LazyBlock};
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::entity::{BaseEntity, Entity, Location};
use crate::operation::{BoxedOperation, OperationQueue};
use crate::region::Region;

use super::Extent;

/// Base contract for pipeline layers wrapping exactly one inner extent.
///
/// Every capability forwards to the inner extent by default, so an
/// override-free layer is behaviorally transparent; layers override only
/// the forwarding methods they need to change. The wrapper owns its inner
/// extent by value, so a chain is a single-parent line and can never be
/// constructed without its inner link.
///
/// The two operation hooks contribute this layer's own deferred work. The
/// blanket [`Extent`] impl merges each hook's result with the inner chain's
/// composed operation and is not overridable, which keeps the merge
/// ordering a firm contract: a chain of N layers advances contributed
/// operations in outer-to-inner declaration order.
///
/// Call sites should import [`Extent`], not this trait; importing both
/// makes the shared method names ambiguous.
pub trait DelegateExtent {
    /// Concrete inner extent. Layers that know the concrete type can reach
    /// past the base contract through [`inner`](Self::inner).
    type Inner: Extent;

    fn inner(&self) -> &Self::Inner;

    fn inner_mut(&mut self) -> &mut Self::Inner;

    fn get_block(&self, position: BlockVector) -> Result<BaseBlock> {
        self.inner().get_block(position)
    }

    fn get_lazy_block(&self, position: BlockVector) -> Result<LazyBlock<'_>> {
        self.inner().get_lazy_block(position)
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        self.inner_mut().set_block(position, block)
    }

    fn get_biome(&self, column: ColumnVector) -> Result<Biome> {
        self.inner().get_biome(column)
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        self.inner_mut().set_biome(column, biome)
    }

    fn create_entity(
        &mut self,
        location: Location,
        entity: BaseEntity,
    ) -> Result<Option<Box<dyn Entity>>> {
        self.inner_mut().create_entity(location, entity)
    }

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>> {
        self.inner().entities()
    }

    fn entities_in_region(&self, region: &dyn Region) -> Result<Vec<Box<dyn Entity>>> {
        self.inner().entities_in_region(region)
    }

    fn minimum_point(&self) -> BlockVector {
        self.inner().minimum_point()
    }

    fn maximum_point(&self) -> BlockVector {
        self.inner().maximum_point()
    }

    /// This layer's own work to run interleaved with the edit.
    ///
    /// Implementations never consult the inner chain here; the merge happens
    /// in [`Extent::interleave_operation`]. Capturing transfers any pending
    /// deferred work into the returned operation, so a layer hands out each
    /// piece of work exactly once.
    fn local_interleave_operation(&self) -> Option<BoxedOperation> {
        None
    }

    /// This layer's own work to run once after the edit completes.
    ///
    /// Same contract as [`local_interleave_operation`](Self::local_interleave_operation).
    fn local_finalize_operation(&self) -> Option<BoxedOperation> {
        None
    }
}

/// Merge a layer's own operation with the inner chain's composed operation.
///
/// Ours-first ordering is the chain contract; a single contributor is
/// returned directly to avoid needless queue nesting.
fn merge(ours: Option<BoxedOperation>, other: Option<BoxedOperation>) -> Option<BoxedOperation> {
    match (ours, other) {
        (Some(ours), Some(other)) => Some(Box::new(OperationQueue::pair(ours, other))),
        (Some(operation), None) | (None, Some(operation)) => Some(operation),
        (None, None) => None,
    }
}

impl<T: DelegateExtent> Extent for T {
    fn get_block(&self, position: BlockVector) -> Result<BaseBlock> {
        DelegateExtent::get_block(self, position)
    }

    fn get_lazy_block(&self, position: BlockVector) -> Result<LazyBlock<'_>> {
        DelegateExtent::get_lazy_block(self, position)
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        DelegateExtent::set_block(self, position, block)
    }

    fn get_biome(&self, column: ColumnVector) -> Result<Biome> {
        DelegateExtent::get_biome(self, column)
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        DelegateExtent::set_biome(self, column, biome)
    }

    fn create_entity(
        &mut self,
        location: Location,
        entity: BaseEntity,
    ) -> Result<Option<Box<dyn Entity>>> {
        DelegateExtent::create_entity(self, location, entity)
    }

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>> {
        DelegateExtent::entities(self)
    }

    fn entities_in_region(&self, region: &dyn Region) -> Result<Vec<Box<dyn Entity>>> {
        DelegateExtent::entities_in_region(self, region)
    }

    fn minimum_point(&self) -> BlockVector {
        DelegateExtent::minimum_point(self)
    }

    fn maximum_point(&self) -> BlockVector {
        DelegateExtent::maximum_point(self)
    }

    fn interleave_operation(&self) -> Option<BoxedOperation> {
        merge(
            self.local_interleave_operation(),
            self.inner().interleave_operation(),
        )
    }

    fn finalize_operation(&self) -> Option<BoxedOperation> {
        merge(
            self.local_finalize_operation(),
            self.inner().finalize_operation(),
        )
    }
}
