//! Deferred work units and their composition.
//!
//! Pipeline layers hand back `Operation`s for work that cannot run inline
//! with the edit: interleave operations run interspersed with the ongoing
//! batch, finalize operations run once after it. Drivers advance an
//! operation one bounded step at a time until it completes or fails.

pub mod queue;

pub use queue::OperationQueue;

use crate::core::error::EditError;
use crate::core::types::Result;

/// Outcome of advancing an operation one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// More work remains; call `resume` again.
    More,
    /// The operation has run to completion.
    Complete,
}

/// A unit of deferred work advanced one bounded step at a time.
///
/// A single step must never block for unbounded time; long-running work is
/// chunked across steps. Advancing past completion is undefined unless an
/// implementation documents otherwise, and operations are not inherently
/// idempotent.
pub trait Operation {
    /// Advance one step.
    fn resume(&mut self) -> Result<Progress>;

    /// Cooperative cancellation check, consulted by drivers between steps.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<O: Operation + ?Sized> Operation for Box<O> {
    fn resume(&mut self) -> Result<Progress> {
        (**self).resume()
    }

    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Owned, type-erased operation.
pub type BoxedOperation = Box<dyn Operation>;

/// Run an operation to completion.
///
/// Checks the cancellation hook between steps; a cancelled operation is
/// abandoned with `EditError::Cancelled`. Side effects of steps already
/// taken remain, there is no rollback.
pub fn complete(mut operation: impl Operation) -> Result<()> {
    let mut steps = 0u64;
    loop {
        if operation.is_cancelled() {
            log::debug!("operation cancelled after {} steps", steps);
            return Err(EditError::Cancelled);
        }
        match operation.resume()? {
            Progress::More => steps += 1,
            Progress::Complete => {
                log::trace!("operation complete after {} steps", steps);
                return Ok(());
            }
        }
    }
}
