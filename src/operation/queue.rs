//! Ordered composition of operations.

use std::collections::VecDeque;

use crate::core::types::Result;

use super::{BoxedOperation, Operation, Progress};

/// An ordered composite operation.
///
/// Members advance strictly in insertion order; the queue completes only
/// when every member has completed. A member failure aborts the queue
/// immediately with the member's cause, without advancing the remaining
/// members. Cleanup of a failed member's partial side effects is that
/// member's own responsibility.
#[derive(Default)]
pub struct OperationQueue {
    operations: VecDeque<BoxedOperation>,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue of exactly two operations, first before second.
    pub fn pair(first: BoxedOperation, second: BoxedOperation) -> Self {
        let mut queue = Self::new();
        queue.offer(first);
        queue.offer(second);
        queue
    }

    /// Append an operation to the end of the queue.
    pub fn offer(&mut self, operation: BoxedOperation) {
        self.operations.push_back(operation);
    }

    /// Number of members not yet completed.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Operation for OperationQueue {
    fn resume(&mut self) -> Result<Progress> {
        let Some(head) = self.operations.front_mut() else {
            return Ok(Progress::Complete);
        };
        match head.resume()? {
            Progress::More => Ok(Progress::More),
            Progress::Complete => {
                self.operations.pop_front();
                if self.operations.is_empty() {
                    Ok(Progress::Complete)
                } else {
                    Ok(Progress::More)
                }
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.operations
            .front()
            .is_some_and(|head| head.is_cancelled())
    }
}
