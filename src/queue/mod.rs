//! Ring queue implementations
//!
//! This module provides the [`RingQueueLike`] capability trait, the FIFO subset of the deque
//! contract, and its fixed-capacity implementation [`RingQueue`].
//!
//! ## Capability Contract
//!
//! Implementors supply the queries, single-value `push`/`pop`, the checked batch push and a
//! raw-storage `scan`. Unchecked batch pushes, pop-by-count, pop-into-buffer and
//! predicate-driven draining are provided on top of `push`/`pop`.
//!
//! ## Examples
//!
//! ```rust
//! use safequeue::queue::{RingQueue, RingQueueLike};
//!
//! // 5 slots: one is the sentinel, 4 are usable
//! let mut queue = RingQueue::new(5);
//! queue.push_all(vec![1, 2, 3, 4])?;
//! assert!(queue.is_full());
//! assert_eq!(queue.pop_n(2), vec![1, 2]);
//! # Ok::<(), safequeue::Error>(())
//! ```

pub mod ring;

pub use ring::RingQueue;

use crate::batch;
use crate::Result;
use alloc::vec::Vec;

/// Capability contract for a FIFO ring queue.
///
/// Implementations never lock; share them across threads through
/// [`SafeRingQueue`](crate::sync::SafeRingQueue).
pub trait RingQueueLike<T> {
    /// Number of stored values
    fn len(&self) -> usize;

    /// `true` when no values are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when the next push would be rejected
    fn is_full(&self) -> bool;

    /// Remaining capacity as defined by the implementation
    fn available_capacity(&self) -> usize;

    /// Enqueue a value at the back
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) when the queue is full.
    fn push(&mut self, value: T) -> Result<()>;

    /// Enqueue every value in order, or none of them; an empty batch is a no-op
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientCapacity`](crate::Error::InsufficientCapacity) when the batch
    /// does not fit; the queue is untouched.
    fn push_all(&mut self, values: Vec<T>) -> Result<()>;

    /// Dequeue the front value, `None` when empty
    fn pop(&mut self) -> Option<T>;

    /// Visit every storage slot in storage order, including cleared ones (`None`)
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when `visitor` is `None`.
    fn scan(&self, visitor: Option<&mut dyn FnMut(Option<&T>)>) -> Result<()>;

    /// Enqueue values until the queue fills up; returns how many were pushed
    fn push_all_unchecked(&mut self, values: Vec<T>) -> usize {
        batch::push_until_full(values, |value| self.push(value))
    }

    /// Dequeue up to `count` values
    fn pop_n(&mut self, count: usize) -> Vec<T> {
        let len = self.len();
        batch::pop_n(count, len, || self.pop())
    }

    /// Dequeue into `buffer`
    ///
    /// A non-empty buffer is overwritten positionally; an empty buffer with spare capacity
    /// is appended to up to that capacity. Returns the number of values written.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when `buffer` is `None`,
    /// [`Error::EmptyCapacity`](crate::Error::EmptyCapacity) when it has neither length nor
    /// capacity.
    fn pop_into(&mut self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        batch::pop_into(buffer, || self.pop())
    }

    /// Dequeue into `predicate` until it returns `false` or the queue empties
    ///
    /// The value the predicate rejected has already been removed. Returns the number of
    /// values popped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when `predicate` is `None`.
    fn pop_while(&mut self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        batch::pop_while(predicate, || self.pop())
    }
}


#[cfg(test)]
mod proptests;

#[cfg(test)]
mod loom_tests;
