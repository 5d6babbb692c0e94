//! Batch pop/push loops shared by every container.
//!
//! Each helper is written against a single-value primitive (`pop` or `push` closure), so the
//! deque ends and the ring queue front share one definition of the batch semantics.

use crate::{Error, Result};
use alloc::vec::Vec;

/// Pops up to `count` values, stopping as soon as `pop` reports the container empty.
pub(crate) fn pop_n<T>(count: usize, len: usize, mut pop: impl FnMut() -> Option<T>) -> Vec<T> {
    let mut values = Vec::with_capacity(count.min(len));
    for _ in 0..count {
        match pop() {
            Some(value) => values.push(value),
            None => break,
        }
    }
    values
}

/// Pushes values in order until the first rejection and returns how many were accepted.
///
/// The rejected value and everything after it are dropped.
pub(crate) fn push_until_full<T>(values: Vec<T>, mut push: impl FnMut(T) -> Result<()>) -> usize {
    let mut pushed = 0;
    for value in values {
        if push(value).is_err() {
            break;
        }
        pushed += 1;
    }
    pushed
}

/// Moves popped values into a caller-supplied buffer.
///
/// A buffer with a non-zero length is filled positionally, overwriting its current contents
/// from index 0 and stopping at the first empty pop. A zero-length buffer with spare
/// capacity is appended to, up to its capacity, so a `Vec::with_capacity(n)` never
/// reallocates. Returns the number of values written.
pub(crate) fn pop_into<T>(
    buffer: Option<&mut Vec<T>>,
    mut pop: impl FnMut() -> Option<T>,
) -> Result<usize> {
    let buffer = buffer.ok_or(Error::InvalidArgument("buffer"))?;

    if !buffer.is_empty() {
        let mut filled = 0;
        for slot in buffer.iter_mut() {
            match pop() {
                Some(value) => *slot = value,
                None => break,
            }
            filled += 1;
        }
        return Ok(filled);
    }

    let capacity = buffer.capacity();
    if capacity == 0 {
        return Err(Error::EmptyCapacity);
    }

    let mut appended = 0;
    while appended < capacity {
        match pop() {
            Some(value) => buffer.push(value),
            None => break,
        }
        appended += 1;
    }
    Ok(appended)
}

/// Pops values and hands each to `predicate` until the container is empty or the predicate
/// returns `false`. The value the predicate rejected is already removed.
pub(crate) fn pop_while<T>(
    predicate: Option<&mut dyn FnMut(T) -> bool>,
    mut pop: impl FnMut() -> Option<T>,
) -> Result<usize> {
    let predicate = predicate.ok_or(Error::InvalidArgument("predicate"))?;

    let mut popped = 0;
    while let Some(value) = pop() {
        popped += 1;
        if !predicate(value) {
            break;
        }
    }
    Ok(popped)
}
