//! Biome identifiers.

use serde::{Deserialize, Serialize};

/// Compact biome identifier for a 2D column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Biome(pub u16);

impl Biome {
    pub const OCEAN: Self = Self(0);
    pub const PLAINS: Self = Self(1);
    pub const DESERT: Self = Self(2);
    pub const FOREST: Self = Self(3);
    pub const TAIGA: Self = Self(4);
    pub const SWAMP: Self = Self(5);
    pub const MOUNTAINS: Self = Self(6);
}
