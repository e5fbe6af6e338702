//! Terminal world adapters.
//!
//! The innermost extent of any chain is backed by an actual world store.
//! Adapters translate pipeline values to engine-native representations
//! with no precision loss for integer coordinates and enumerated types,
//! apply only explicitly requested side effects, and report a dropped
//! backing store as [`EditError::WorldUnavailable`](crate::core::EditError::WorldUnavailable)
//! rather than serving stale data.

pub mod side_effect;
pub mod local;

pub use side_effect::SideEffectSet;
pub use local::{LocalWorld, LocalWorldHandle, SideEffectApplier};

use crate::block::{BaseBlock, BlockState};
use crate::core::types::{BlockVector, Result};
use crate::extent::Extent;

/// Contract for the terminal extent backed by an actual world store.
pub trait World: Extent {
    /// Human-readable world name.
    fn name(&self) -> String;

    /// False once the backing store has been unloaded. All further access
    /// through an unloaded world fails with `WorldUnavailable`.
    fn is_loaded(&self) -> bool;

    /// Write a block with an explicit side-effect set, overriding the
    /// adapter's configured default.
    fn set_block_with(
        &mut self,
        position: BlockVector,
        block: BaseBlock,
        side_effects: SideEffectSet,
    ) -> Result<bool>;

    /// Apply the requested side effects at a position, returning the
    /// subset this adapter actually applied.
    fn apply_side_effects(
        &mut self,
        position: BlockVector,
        previous: BlockState,
        requested: SideEffectSet,
    ) -> Result<SideEffectSet>;
}
