//! Change recording for history.

use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::biome::Biome;
use crate::block::BaseBlock;
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::history::{BiomeChange, BlockChange, ChangeFlush, ChangeSet};
use crate::operation::BoxedOperation;

use super::{DelegateExtent, Extent};

/// Layer recording every effective change flowing through it.
///
/// Each write that actually changed state is staged with its previous
/// value. The layer's interleave operation folds the staged changes into
/// the shared session change set in bounded batches; capturing the
/// operation drains the staging, so each change is folded exactly once and
/// the layer starts the next batch empty.
pub struct RecordingExtent<E: Extent> {
    inner: E,
    session: Arc<Mutex<ChangeSet>>,
    staged_blocks: Mutex<Vec<BlockChange>>,
    staged_biomes: Mutex<Vec<BiomeChange>>,
}

impl<E: Extent> RecordingExtent<E> {
    pub fn new(inner: E, session: Arc<Mutex<ChangeSet>>) -> Self {
        Self {
            inner,
            session,
            staged_blocks: Mutex::new(Vec::new()),
            staged_biomes: Mutex::new(Vec::new()),
        }
    }

    /// Block changes staged in the current batch, in write order.
    pub fn staged_blocks(&self) -> Vec<BlockChange> {
        self.staged_blocks.lock().clone()
    }

    pub fn staged_biomes(&self) -> Vec<BiomeChange> {
        self.staged_biomes.lock().clone()
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Extent> DelegateExtent for RecordingExtent<E> {
    type Inner = E;

    fn inner(&self) -> &E {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        let previous = self.inner.get_block(position)?;
        let changed = self.inner.set_block(position, block.clone())?;
        if changed {
            self.staged_blocks.get_mut().push(BlockChange {
                position,
                previous,
                current: block,
            });
        }
        Ok(changed)
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        let previous = self.inner.get_biome(column)?;
        let changed = self.inner.set_biome(column, biome)?;
        if changed {
            self.staged_biomes.get_mut().push(BiomeChange {
                column,
                previous,
                current: biome,
            });
        }
        Ok(changed)
    }

    fn local_interleave_operation(&self) -> Option<BoxedOperation> {
        let mut blocks = self.staged_blocks.lock();
        let mut biomes = self.staged_biomes.lock();
        if blocks.is_empty() && biomes.is_empty() {
            return None;
        }
        Some(Box::new(ChangeFlush::new(
            mem::take(&mut *blocks),
            mem::take(&mut *biomes),
            Arc::clone(&self.session),
        )))
    }
}
