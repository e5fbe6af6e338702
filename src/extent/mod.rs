//! The extent capability contract and its pipeline layers.
//!
//! An extent is a bounded, readable/writable store of blocks, biomes, and
//! entities. Edit pipelines are chains of wrapper extents around a terminal
//! world-backed extent; each wrapper transforms, filters, or records
//! traffic before delegating inward, and may contribute deferred work to
//! the chain's composed interleave and finalize operations.

pub mod delegate;
pub mod null;
pub mod masking;
pub mod counting;
pub mod limit;
pub mod recording;
pub mod biome_translate;

pub use delegate::DelegateExtent;
pub use null::NullExtent;
pub use masking::{Mask, MaskIntersection, MaskingExtent, RegionMask};
pub use counting::ChangeCountExtent;
pub use limit::ChangeLimitExtent;
pub use recording::RecordingExtent;
pub use biome_translate::BiomeTranslateExtent;

use crate::biome::Biome;
use crate::block::{BaseBlock, LazyBlock};
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::entity::{BaseEntity, Entity, Location};
use crate::operation::BoxedOperation;
use crate::region::Region;

/// Capability set for a bounded spatial, entity, and biome store.
///
/// Reads and writes fail only for terminal-adapter conditions (position out
/// of bounds, backing world unloaded) or a layer's own terminating
/// conditions (edit limit); refusals are values, not errors.
pub trait Extent {
    /// Authoritative, fully-resolved block read.
    fn get_block(&self, position: BlockVector) -> Result<BaseBlock>;

    /// Block read that skips extended-data resolution; the payload is
    /// fetched on demand through the returned view.
    fn get_lazy_block(&self, position: BlockVector) -> Result<LazyBlock<'_>>;

    /// Write a block. Returns whether the store's state actually changed
    /// (false for a rewrite of an identical block).
    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool>;

    /// Biome of a 2D column.
    fn get_biome(&self, column: ColumnVector) -> Result<Biome>;

    /// Write a column's biome. Returns whether the value changed.
    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool>;

    /// Attempt to spawn an entity. `Ok(None)` means the store refused the
    /// spawn; a well-formed description never produces an error by itself.
    fn create_entity(
        &mut self,
        location: Location,
        entity: BaseEntity,
    ) -> Result<Option<Box<dyn Entity>>>;

    /// All entities in this extent.
    fn entities(&self) -> Result<Vec<Box<dyn Entity>>>;

    /// Entities whose block position the region precisely contains.
    fn entities_in_region(&self, region: &dyn Region) -> Result<Vec<Box<dyn Entity>>>;

    /// Inclusive lower corner of the addressable volume.
    fn minimum_point(&self) -> BlockVector;

    /// Inclusive upper corner of the addressable volume.
    fn maximum_point(&self) -> BlockVector;

    /// Composed deferred work to run interleaved with the ongoing edit,
    /// merged across the whole chain in outer-to-inner order. Capturing
    /// claims each layer's pending work, so capture once per batch and run
    /// the operation to completion.
    fn interleave_operation(&self) -> Option<BoxedOperation>;

    /// Composed deferred work to run once after the edit completes, merged
    /// like the interleave operation.
    fn finalize_operation(&self) -> Option<BoxedOperation>;
}
