//! Per-session change cap.

use crate::block::BaseBlock;
use crate::core::error::EditError;
use crate::core::types::{BlockVector, Result};

use super::{DelegateExtent, Extent};

/// Layer enforcing a cap on the number of changed blocks per session.
///
/// Once the cap is reached, every further block write fails with
/// [`EditError::EditLimitExceeded`] *before* delegating inward, so inner
/// layers never observe the over-limit write. The condition terminates the
/// current batch; it is for the caller to report and stop.
pub struct ChangeLimitExtent<E: Extent> {
    inner: E,
    limit: u32,
    count: u32,
}

impl<E: Extent> ChangeLimitExtent<E> {
    pub fn new(inner: E, limit: u32) -> Self {
        Self {
            inner,
            limit,
            count: 0,
        }
    }

    /// Changed blocks so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Extent> DelegateExtent for ChangeLimitExtent<E> {
    type Inner = E;

    fn inner(&self) -> &E {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        if self.count >= self.limit {
            return Err(EditError::EditLimitExceeded { limit: self.limit });
        }
        let changed = self.inner.set_block(position, block)?;
        if changed {
            self.count += 1;
        }
        Ok(changed)
    }
}
