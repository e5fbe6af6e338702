//! Chunked replay of recorded changes onto an extent.

use crate::core::types::Result;
use crate::extent::Extent;
use crate::operation::{Operation, Progress};

use super::{BlockChange, ChangeSet};

/// Changes applied to the target extent per advance step.
const REPLAY_BATCH: usize = 32;

/// Applies a list of block changes to an owned target extent, a bounded
/// number per step.
///
/// Undo applies each change's previous block in reverse recording order;
/// redo re-applies the current blocks in original order. The target extent
/// can be recovered with [`into_inner`](Self::into_inner) once the replay
/// has completed.
pub struct ChangeReplay<E: Extent> {
    extent: E,
    changes: Vec<BlockChange>,
    cursor: usize,
}

impl<E: Extent> ChangeReplay<E> {
    /// Replay that reverts everything the change set recorded.
    pub fn undo(extent: E, changes: &ChangeSet) -> Self {
        Self {
            extent,
            changes: changes.undo_blocks(),
            cursor: 0,
        }
    }

    /// Replay that re-applies everything the change set recorded.
    pub fn redo(extent: E, changes: &ChangeSet) -> Self {
        Self {
            extent,
            changes: changes.redo_blocks(),
            cursor: 0,
        }
    }

    /// Changes not yet applied.
    pub fn remaining(&self) -> usize {
        self.changes.len() - self.cursor
    }

    /// Give the target extent back.
    pub fn into_inner(self) -> E {
        self.extent
    }
}

impl<E: Extent> Operation for ChangeReplay<E> {
    fn resume(&mut self) -> Result<Progress> {
        if self.cursor >= self.changes.len() {
            return Ok(Progress::Complete);
        }
        let end = (self.cursor + REPLAY_BATCH).min(self.changes.len());
        for change in &self.changes[self.cursor..end] {
            self.extent.set_block(change.position, change.current.clone())?;
        }
        self.cursor = end;
        if self.cursor >= self.changes.len() {
            Ok(Progress::Complete)
        } else {
            Ok(Progress::More)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::block::{BaseBlock, BlockState};
    use crate::core::types::BlockVector;
    use crate::operation::complete;
    use crate::world::LocalWorld;

    use super::*;

    #[test]
    fn test_undo_restores_previous_blocks() {
        let world = LocalWorld::new("w", BlockVector::splat(-64), BlockVector::splat(64));
        let mut handle = world.handle();
        let mut set = ChangeSet::new();

        for x in 0..40 {
            let position = BlockVector::new(x, 0, 0);
            let previous = handle.get_block(position).unwrap();
            handle
                .set_block(position, BaseBlock::new(BlockState::STONE))
                .unwrap();
            set.record_block(BlockChange {
                position,
                previous,
                current: BaseBlock::new(BlockState::STONE),
            });
        }

        let replay = ChangeReplay::undo(world.handle(), &set);
        assert_eq!(replay.remaining(), 40);
        complete(replay).unwrap();

        for x in 0..40 {
            let block = handle.get_block(BlockVector::new(x, 0, 0)).unwrap();
            assert!(block.state().is_air(), "block {} was not reverted", x);
        }
    }

    #[test]
    fn test_redo_reapplies_changes_after_undo() {
        let world = LocalWorld::new("w", BlockVector::splat(-8), BlockVector::splat(8));
        let mut handle = world.handle();
        let position = BlockVector::new(2, 3, 4);

        let previous = handle.get_block(position).unwrap();
        handle
            .set_block(position, BaseBlock::new(BlockState::GLASS))
            .unwrap();
        let mut set = ChangeSet::new();
        set.record_block(BlockChange {
            position,
            previous,
            current: BaseBlock::new(BlockState::GLASS),
        });

        complete(ChangeReplay::undo(world.handle(), &set)).unwrap();
        assert!(handle.get_block(position).unwrap().state().is_air());

        complete(ChangeReplay::redo(world.handle(), &set)).unwrap();
        assert_eq!(
            handle.get_block(position).unwrap().state(),
            BlockState::GLASS
        );
    }
}
