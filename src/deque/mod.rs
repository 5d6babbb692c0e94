//! Deque (double-ended queue) implementations
//!
//! This module provides the [`DequeLike`] capability trait and its default implementation,
//! [`LinkedDeque`].
//!
//! ## Capability Contract
//!
//! A type qualifies as a pluggable deque by implementing the handful of required
//! primitives: length and capacity queries plus single-value push/pop at both ends. The
//! batch operations (checked and unchecked pushes, pop-by-count, pop-into-buffer and
//! predicate-driven draining) are provided on top of those primitives, so every
//! implementation shares the same batch semantics.
//!
//! ## Capacity
//!
//! Capacity is a signed value: a negative capacity means unbounded, in which case
//! [`DequeLike::is_full`] is always `false` and [`DequeLike::available_capacity`]
//! reports `-1`.
//!
//! ## Examples
//!
//! ```rust
//! use safequeue::deque::{DequeLike, LinkedDeque};
//!
//! let mut deque = LinkedDeque::bounded(3);
//! deque.push_back_all(vec![1, 2, 3])?;
//! assert!(deque.is_full());
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_back(), Some(3));
//! # Ok::<(), safequeue::Error>(())
//! ```

pub mod linked;

pub use linked::{Iter, LinkedDeque, NodeId};

use crate::batch;
use crate::{Error, Result};
use alloc::vec::Vec;

/// Capability contract for a double-ended queue.
///
/// Implementations never lock; share them across threads through
/// [`SafeDeque`](crate::sync::SafeDeque).
pub trait DequeLike<T> {
    /// Number of stored values
    fn len(&self) -> usize;

    /// `true` when no values are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when a bounded deque holds `capacity` values; always `false` when unbounded
    fn is_full(&self) -> bool;

    /// Remaining capacity, or `-1` when unbounded
    fn available_capacity(&self) -> isize;

    /// Whether `count` more values fit
    fn can_accept(&self, count: usize) -> bool {
        let available = self.available_capacity();
        available < 0 || available as usize >= count
    }

    /// Append a value at the back
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when the deque is full.
    fn push_back(&mut self, value: T) -> Result<()>;

    /// Prepend a value at the front
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when the deque is full.
    fn push_front(&mut self, value: T) -> Result<()>;

    /// Remove and return the front value, `None` when empty
    fn pop_front(&mut self) -> Option<T>;

    /// Remove and return the back value, `None` when empty
    fn pop_back(&mut self) -> Option<T>;

    /// Append every value at the back, in order, or none of them
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientCapacity`] when the batch does not fit; the deque is untouched.
    fn push_back_all(&mut self, values: Vec<T>) -> Result<()> {
        check_batch(&*self, values.len())?;
        for value in values {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Prepend every value at the front, in order, or none of them
    ///
    /// Each value becomes the new front, so the batch ends up reversed: pushing `[1, 2, 3]`
    /// leaves `3, 2, 1` front-to-back.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientCapacity`] when the batch does not fit; the deque is untouched.
    fn push_front_all(&mut self, values: Vec<T>) -> Result<()> {
        check_batch(&*self, values.len())?;
        for value in values {
            self.push_front(value)?;
        }
        Ok(())
    }

    /// Append values at the back until the deque fills up; returns how many were pushed
    fn push_back_all_unchecked(&mut self, values: Vec<T>) -> usize {
        batch::push_until_full(values, |value| self.push_back(value))
    }

    /// Prepend values at the front until the deque fills up; returns how many were pushed
    fn push_front_all_unchecked(&mut self, values: Vec<T>) -> usize {
        batch::push_until_full(values, |value| self.push_front(value))
    }

    /// Pop up to `count` values from the front
    fn pop_front_n(&mut self, count: usize) -> Vec<T> {
        let len = self.len();
        batch::pop_n(count, len, || self.pop_front())
    }

    /// Pop up to `count` values from the back
    fn pop_back_n(&mut self, count: usize) -> Vec<T> {
        let len = self.len();
        batch::pop_n(count, len, || self.pop_back())
    }

    /// Pop front values into `buffer`
    ///
    /// A non-empty buffer is overwritten positionally; an empty buffer with spare capacity
    /// is appended to up to that capacity. Returns the number of values written.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `buffer` is `None`, [`Error::EmptyCapacity`] when it
    /// has neither length nor capacity.
    fn pop_front_into(&mut self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        batch::pop_into(buffer, || self.pop_front())
    }

    /// Pop back values into `buffer`, with the same fill/append rules as
    /// [`pop_front_into`](DequeLike::pop_front_into)
    fn pop_back_into(&mut self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        batch::pop_into(buffer, || self.pop_back())
    }

    /// Pop front values into `predicate` until it returns `false` or the deque empties
    ///
    /// The value the predicate rejected has already been removed. Returns the number of
    /// values popped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `predicate` is `None`.
    fn pop_front_while(&mut self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        batch::pop_while(predicate, || self.pop_front())
    }

    /// Pop back values into `predicate` until it returns `false` or the deque empties
    fn pop_back_while(&mut self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        batch::pop_while(predicate, || self.pop_back())
    }
}

fn check_batch<T, D: DequeLike<T> + ?Sized>(deque: &D, requested: usize) -> Result<()> {
    if deque.can_accept(requested) {
        return Ok(());
    }
    Err(Error::InsufficientCapacity {
        requested,
        available: deque.available_capacity().max(0) as usize,
    })
}


#[cfg(test)]
mod proptests;
