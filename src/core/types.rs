//! Core type aliases and re-exports

pub use glam::{DVec3, IVec2, IVec3};

/// Integer block position (x, y, z)
pub type BlockVector = IVec3;

/// Integer biome column (x, z)
pub type ColumnVector = IVec2;

/// Standard Result type for the pipeline
pub type Result<T> = std::result::Result<T, crate::core::error::EditError>;
