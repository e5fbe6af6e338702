//! Error types for the editing pipeline

use thiserror::Error;

use crate::core::types::BlockVector;

/// Main error type for the editing pipeline
///
/// Soft refusals (a masked-out write, an entity spawn the store declines)
/// are not errors; they surface as `Ok(false)` or `Ok(None)` from the call
/// that was refused.
#[derive(Debug, Error)]
pub enum EditError {
    /// A layer's per-session cap on changed blocks was reached.
    #[error("edit limit of {limit} changed blocks exceeded")]
    EditLimitExceeded { limit: u32 },

    /// The backing world reference is no longer valid (unloaded).
    #[error("the backing world is no longer available")]
    WorldUnavailable,

    /// The position is outside the terminal extent's addressable volume.
    #[error("position {position} is outside the extent bounds")]
    OutOfBounds { position: BlockVector },

    /// A driver observed a cooperative cancellation request.
    #[error("operation cancelled")]
    Cancelled,

    /// Structured failure raised while advancing an operation.
    #[error("operation failed: {0}")]
    Operation(String),
}
