//! Block values: compact states and full blocks with extended data.

use serde::{Deserialize, Serialize};

use crate::core::types::{BlockVector, Result};
use crate::extent::Extent;

/// NBT-like extended data payload attached to a block or entity.
pub type NbtCompound = serde_json::Map<String, serde_json::Value>;

/// Compact block-type identifier.
///
/// The concrete encoding is registry-defined; the pipeline treats the value
/// as opaque and only compares it for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockState(pub u16);

impl BlockState {
    pub const AIR: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const DIRT: Self = Self(2);
    pub const GRASS: Self = Self(3);
    pub const SAND: Self = Self(4);
    pub const WATER: Self = Self(5);
    pub const GLASS: Self = Self(6);

    /// Returns true if this state is air (the empty block).
    pub fn is_air(&self) -> bool {
        *self == Self::AIR
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::AIR
    }
}

/// A full block value: state plus optional extended data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseBlock {
    state: BlockState,
    nbt: Option<NbtCompound>,
}

impl BaseBlock {
    /// Block with no extended data.
    pub fn new(state: BlockState) -> Self {
        Self { state, nbt: None }
    }

    /// Block carrying an extended data payload.
    pub fn with_nbt(state: BlockState, nbt: NbtCompound) -> Self {
        Self {
            state,
            nbt: Some(nbt),
        }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn nbt(&self) -> Option<&NbtCompound> {
        self.nbt.as_ref()
    }

    pub fn has_nbt(&self) -> bool {
        self.nbt.is_some()
    }
}

impl From<BlockState> for BaseBlock {
    fn from(state: BlockState) -> Self {
        Self::new(state)
    }
}

/// A block read that skipped extended-data resolution.
///
/// Bulk scans read states cheaply; the extended payload is only fetched when
/// `full_block` is called, with a second read at the recorded position.
pub struct LazyBlock<'a> {
    state: BlockState,
    extent: &'a dyn Extent,
    position: BlockVector,
}

impl<'a> LazyBlock<'a> {
    pub fn new(state: BlockState, extent: &'a dyn Extent, position: BlockVector) -> Self {
        Self {
            state,
            extent,
            position,
        }
    }

    /// The already-resolved compact state.
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Position this block was read from.
    pub fn position(&self) -> BlockVector {
        self.position
    }

    /// Resolve the extended payload with a full read at this position.
    pub fn full_block(&self) -> Result<BaseBlock> {
        self.extent.get_block(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_state_air() {
        assert!(BlockState::AIR.is_air());
        assert!(!BlockState::STONE.is_air());
        assert_eq!(BlockState::default(), BlockState::AIR);
    }

    #[test]
    fn test_base_block_equality_includes_nbt() {
        let plain = BaseBlock::new(BlockState::STONE);
        let mut nbt = NbtCompound::new();
        nbt.insert("text".to_string(), serde_json::Value::from("hello"));
        let tagged = BaseBlock::with_nbt(BlockState::STONE, nbt);

        assert_eq!(plain.state(), tagged.state());
        assert_ne!(plain, tagged);
        assert!(tagged.has_nbt());
        assert!(!plain.has_nbt());
    }

    #[test]
    fn test_from_state() {
        let block: BaseBlock = BlockState::GLASS.into();
        assert_eq!(block.state(), BlockState::GLASS);
        assert!(block.nbt().is_none());
    }
}
