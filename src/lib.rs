//! Voxedit - a layered voxel-world editing pipeline

pub mod core;
pub mod block;
pub mod biome;
pub mod entity;
pub mod region;
pub mod operation;
pub mod extent;
pub mod history;
pub mod world;
pub mod session;

pub use biome::Biome;
pub use block::{BaseBlock, BlockState, LazyBlock, NbtCompound};
pub use extent::{DelegateExtent, Extent};
pub use operation::{BoxedOperation, Operation, OperationQueue, Progress};
