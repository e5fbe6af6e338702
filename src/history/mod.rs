//! In-memory change journal for history recording.
//!
//! Recording layers stage the changes of one edit batch and fold them into
//! a session-wide [`ChangeSet`] through a deferred [`ChangeFlush`]
//! operation. Replaying a change set onto an extent (undo/redo) is itself
//! a chunked operation, [`ChangeReplay`]. Durable storage of history is
//! left to the embedding application.

pub mod replay;

pub use replay::ChangeReplay;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::block::BaseBlock;
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::operation::{Operation, Progress};

/// A single effective block change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockChange {
    pub position: BlockVector,
    pub previous: BaseBlock,
    pub current: BaseBlock,
}

impl BlockChange {
    /// The same change with direction reversed.
    pub fn inverted(&self) -> Self {
        Self {
            position: self.position,
            previous: self.current.clone(),
            current: self.previous.clone(),
        }
    }
}

/// A single effective biome change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeChange {
    pub column: ColumnVector,
    pub previous: Biome,
    pub current: Biome,
}

/// Ordered journal of the changes an edit session accumulated.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    blocks: Vec<BlockChange>,
    biomes: Vec<BiomeChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_block(&mut self, change: BlockChange) {
        self.blocks.push(change);
    }

    pub fn record_biome(&mut self, change: BiomeChange) {
        self.biomes.push(change);
    }

    pub fn blocks(&self) -> &[BlockChange] {
        &self.blocks
    }

    pub fn biomes(&self) -> &[BiomeChange] {
        &self.biomes
    }

    /// Total recorded changes, blocks and biomes.
    pub fn len(&self) -> usize {
        self.blocks.len() + self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.biomes.is_empty()
    }

    /// Inverse block changes in reverse order, for undo.
    pub fn undo_blocks(&self) -> Vec<BlockChange> {
        self.blocks.iter().rev().map(BlockChange::inverted).collect()
    }

    /// Block changes in original order, for redo.
    pub fn redo_blocks(&self) -> Vec<BlockChange> {
        self.blocks.clone()
    }
}

/// Changes folded into the session change set per advance step.
const FLUSH_BATCH: usize = 64;

/// Deferred fold of one batch's staged changes into the shared session
/// change set, a bounded number per step.
pub struct ChangeFlush {
    blocks: Vec<BlockChange>,
    biomes: Vec<BiomeChange>,
    session: Arc<Mutex<ChangeSet>>,
    cursor: usize,
}

impl ChangeFlush {
    pub fn new(
        blocks: Vec<BlockChange>,
        biomes: Vec<BiomeChange>,
        session: Arc<Mutex<ChangeSet>>,
    ) -> Self {
        Self {
            blocks,
            biomes,
            session,
            cursor: 0,
        }
    }

    /// Number of changes this flush carries.
    pub fn change_count(&self) -> usize {
        self.blocks.len() + self.biomes.len()
    }
}

impl Operation for ChangeFlush {
    fn resume(&mut self) -> Result<Progress> {
        let total = self.change_count();
        if self.cursor >= total {
            return Ok(Progress::Complete);
        }
        let end = (self.cursor + FLUSH_BATCH).min(total);
        let mut session = self.session.lock();
        for index in self.cursor..end {
            if index < self.blocks.len() {
                session.record_block(self.blocks[index].clone());
            } else {
                session.record_biome(self.biomes[index - self.blocks.len()]);
            }
        }
        drop(session);
        self.cursor = end;
        if self.cursor >= total {
            Ok(Progress::Complete)
        } else {
            Ok(Progress::More)
        }
    }
}
