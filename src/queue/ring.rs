//! Fixed-Capacity Ring Queue
//!
//! [`RingQueue`] is a circular FIFO buffer over a slot array allocated once at construction.
//!
//! ## Algorithm Details
//!
//! Two cursors walk the array modulo its length:
//! - `front`: the next slot to pop from
//! - `back`: the next slot to push into
//!
//! ```text
//! Empty State:    front == back
//! Full State:     (back + 1) % capacity == front
//! Length:         (back - front + capacity) % capacity
//! ```
//!
//! One slot always stays free, so `front == back` can only mean empty. A queue built with
//! `capacity` slots therefore holds at most `capacity - 1` values; use
//! [`RingQueue::with_usable_capacity`] to size it by the number of values instead.
//!
//! Popped slots are reset to `None` so the queue never keeps a dequeued value alive.

use super::RingQueueLike;
use crate::{Error, Result};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A fixed-capacity FIFO ring buffer with one reserved sentinel slot
///
/// # Examples
///
/// ```rust
/// use safequeue::queue::{RingQueue, RingQueueLike};
///
/// let mut queue = RingQueue::new(3);
/// queue.push(1)?;
/// queue.push(2)?;
/// assert!(queue.push(3).is_err()); // 3 slots, 2 usable
///
/// assert_eq!(queue.pop(), Some(1));
/// queue.push(3)?; // wraps around
/// assert_eq!(queue.pop_n(2), vec![2, 3]);
/// # Ok::<(), safequeue::Error>(())
/// ```
pub struct RingQueue<T> {
    slots: Box<[Option<T>]>,
    front: usize,
    back: usize,
}

impl<T> RingQueue<T> {
    /// Create a ring queue with `capacity` slots, `capacity - 1` of them usable
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring queue capacity must be greater than 0");

        let slots: Vec<Option<T>> = (0..capacity).map(|_| None).collect();
        Self {
            slots: slots.into_boxed_slice(),
            front: 0,
            back: 0,
        }
    }

    /// Create a ring queue that can hold exactly `usable` values
    ///
    /// Allocates `usable + 1` slots.
    pub fn with_usable_capacity(usable: usize) -> Self {
        Self::new(usable + 1)
    }

    /// Number of slots in the backing array, sentinel included
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of values the queue can hold at once
    #[inline]
    pub fn usable_capacity(&self) -> usize {
        self.capacity() - 1
    }

    /// Number of values that can still be pushed before the queue is full
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.usable_capacity() - self.len()
    }

    /// Front value without removing it
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    /// Iterate stored values in FIFO order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len()).filter_map(move |offset| self.slots[(self.front + offset) % capacity].as_ref())
    }

    #[inline]
    fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.capacity()
    }
}

impl<T> RingQueueLike<T> for RingQueue<T> {
    #[inline]
    fn len(&self) -> usize {
        let capacity = self.capacity();
        (self.back + capacity - self.front) % capacity
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.front == self.back
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.front == self.advance(self.back)
    }

    /// Slots not currently holding a value, sentinel included
    ///
    /// A full queue reports 1 here; [`RingQueue::free_slots`] excludes the sentinel.
    #[inline]
    fn available_capacity(&self) -> usize {
        self.capacity() - self.len()
    }

    fn push(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded);
        }

        self.slots[self.back] = Some(value);
        self.back = self.advance(self.back);
        Ok(())
    }

    fn push_all(&mut self, values: Vec<T>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let available = self.free_slots();
        if values.len() > available {
            return Err(Error::InsufficientCapacity {
                requested: values.len(),
                available,
            });
        }

        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.front].take();
        self.front = self.advance(self.front);
        value
    }

    fn scan(&self, visitor: Option<&mut dyn FnMut(Option<&T>)>) -> Result<()> {
        let visitor = visitor.ok_or(Error::InvalidArgument("visitor"))?;
        for slot in self.slots.iter() {
            visitor(slot.as_ref());
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity())
            .field("front", &self.front)
            .field("back", &self.back)
            .field("slots", &self.slots)
            .finish()
    }
}
