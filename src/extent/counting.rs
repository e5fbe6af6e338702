//! Change counting.

use crate::biome::Biome;
use crate::block::BaseBlock;
use crate::core::types::{BlockVector, ColumnVector, Result};

use super::{DelegateExtent, Extent};

/// Layer counting the effective changes flowing through it.
///
/// Only writes that actually changed state are counted; identical rewrites
/// and masked-out writes further in are not.
pub struct ChangeCountExtent<E: Extent> {
    inner: E,
    count: u32,
}

impl<E: Extent> ChangeCountExtent<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, count: 0 }
    }

    /// Effective block and biome changes seen so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Extent> DelegateExtent for ChangeCountExtent<E> {
    type Inner = E;

    fn inner(&self) -> &E {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        let changed = self.inner.set_block(position, block)?;
        if changed {
            self.count += 1;
        }
        Ok(changed)
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        let changed = self.inner.set_biome(column, biome)?;
        if changed {
            self.count += 1;
        }
        Ok(changed)
    }
}
