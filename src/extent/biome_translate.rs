//! Biome translation.

use std::collections::HashMap;

use crate::biome::Biome;
use crate::core::types::{ColumnVector, Result};

use super::{DelegateExtent, Extent};

/// Layer remapping biome writes through a translation table.
///
/// Writes of a mapped biome reach the inner extent as the mapped value;
/// unmapped biomes pass through unchanged. Reads are not translated back.
pub struct BiomeTranslateExtent<E: Extent> {
    inner: E,
    table: HashMap<Biome, Biome>,
}

impl<E: Extent> BiomeTranslateExtent<E> {
    pub fn new(inner: E, table: HashMap<Biome, Biome>) -> Self {
        Self { inner, table }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Extent> DelegateExtent for BiomeTranslateExtent<E> {
    type Inner = E;

    fn inner(&self) -> &E {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        let translated = self.table.get(&biome).copied().unwrap_or(biome);
        self.inner.set_biome(column, translated)
    }
}
