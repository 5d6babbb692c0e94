//! Thread-safe ring queue wrapper

use super::Guarded;
use crate::metrics::{MetricsCollector, PerformanceMetrics};
use crate::queue::{RingQueue, RingQueueLike};
use crate::{Error, Result};
use core::fmt;
use core::marker::PhantomData;
use parking_lot::MappedRwLockReadGuard;
use std::boxed::Box;
use std::vec::Vec;

/// A ring queue shared across threads behind a reader/writer lock
///
/// Besides the plain contract operations, the `*_and_len` variants report the queue length
/// observed under the same exclusive acquisition as the push or pop, which a separate
/// [`len`](SafeRingQueue::len) call cannot guarantee.
///
/// # Examples
///
/// ```rust
/// use safequeue::{RingQueue, SafeRingQueue};
///
/// let queue = SafeRingQueue::<u64>::new(|| Some(Box::new(RingQueue::with_usable_capacity(8))))?;
/// assert_eq!(queue.push_all_and_len(vec![10, 20, 30])?, 3);
///
/// let (value, remaining) = queue.pop_and_len();
/// assert_eq!(value, Some(10));
/// assert_eq!(remaining, 2);
/// # Ok::<(), safequeue::Error>(())
/// ```
pub struct SafeRingQueue<T, Q: ?Sized = dyn RingQueueLike<T> + Send + Sync> {
    inner: Guarded<Q>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Send + Sync + 'static> SafeRingQueue<T> {
    /// Build the wrapper around the boxed instance produced by `factory`
    ///
    /// The factory is invoked exactly once.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the factory returns `None`.
    pub fn new<F>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Option<Box<dyn RingQueueLike<T> + Send + Sync>>,
    {
        Self::from_factory(factory)
    }

    /// Wrap a fresh [`RingQueue`] with `capacity` slots (`capacity - 1` usable)
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0
    pub fn with_ring(capacity: usize) -> Self {
        Self::from_box(Box::new(RingQueue::new(capacity)))
    }
}

impl<T, Q: RingQueueLike<T> + ?Sized> SafeRingQueue<T, Q> {
    /// Build the wrapper around an instance of a concrete queue type
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the factory returns `None`.
    pub fn from_factory<F>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Option<Box<Q>>,
    {
        let inner = factory().ok_or(Error::InvalidState(
            "the ring queue factory returned no instance",
        ))?;
        Ok(Self::from_box(inner))
    }

    /// Wrap an already-built instance
    pub fn from_box(inner: Box<Q>) -> Self {
        Self {
            inner: Guarded::new(inner, |queue: &Q| queue.len() * core::mem::size_of::<T>()),
            _marker: PhantomData,
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.inner.read(|queue| queue.len())
    }

    /// `true` when no values are stored
    pub fn is_empty(&self) -> bool {
        self.inner.read(|queue| queue.is_empty())
    }

    /// `true` when the next push would be rejected
    pub fn is_full(&self) -> bool {
        self.inner.read(|queue| queue.is_full())
    }

    /// Remaining capacity as reported by the wrapped queue
    pub fn available_capacity(&self) -> usize {
        self.inner.read(|queue| queue.available_capacity())
    }

    /// Enqueue a value
    pub fn push(&self, value: T) -> Result<()> {
        self.inner.write(|queue| queue.push(value), |result| result.is_ok())
    }

    /// Enqueue a value and return the resulting length
    pub fn push_and_len(&self, value: T) -> Result<usize> {
        self.inner.write(
            |queue| {
                queue.push(value)?;
                Ok(queue.len())
            },
            |result| result.is_ok(),
        )
    }

    /// Enqueue every value, or none of them
    pub fn push_all(&self, values: Vec<T>) -> Result<()> {
        self.inner.write(|queue| queue.push_all(values), |result| result.is_ok())
    }

    /// Enqueue every value, or none of them, and return the resulting length
    pub fn push_all_and_len(&self, values: Vec<T>) -> Result<usize> {
        self.inner.write(
            |queue| {
                queue.push_all(values)?;
                Ok(queue.len())
            },
            |result| result.is_ok(),
        )
    }

    /// Enqueue values until full; returns how many were pushed
    pub fn push_all_unchecked(&self, values: Vec<T>) -> usize {
        self.inner
            .write(|queue| queue.push_all_unchecked(values), |pushed| *pushed > 0)
    }

    /// Dequeue the front value
    pub fn pop(&self) -> Option<T> {
        self.inner.write(|queue| queue.pop(), Option::is_some)
    }

    /// Dequeue the front value and return it with the remaining length
    pub fn pop_and_len(&self) -> (Option<T>, usize) {
        self.inner.write(
            |queue| {
                let value = queue.pop();
                (value, queue.len())
            },
            |(value, _)| value.is_some(),
        )
    }

    /// Dequeue up to `count` values
    pub fn pop_n(&self, count: usize) -> Vec<T> {
        self.inner
            .write(|queue| queue.pop_n(count), |values| !values.is_empty())
    }

    /// Dequeue up to `count` values and return them with the remaining length
    pub fn pop_n_and_len(&self, count: usize) -> (Vec<T>, usize) {
        self.inner.write(
            |queue| {
                let values = queue.pop_n(count);
                (values, queue.len())
            },
            |(values, _)| !values.is_empty(),
        )
    }

    /// Dequeue into `buffer`; see [`RingQueueLike::pop_into`]
    pub fn pop_into(&self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        self.inner
            .write(|queue| queue.pop_into(buffer), |result| result.is_ok())
    }

    /// Dequeue into `predicate`; see [`RingQueueLike::pop_while`]
    ///
    /// The predicate runs with the exclusive lock held and must not call back into this
    /// wrapper.
    pub fn pop_while(&self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        self.inner
            .write(|queue| queue.pop_while(predicate), |result| result.is_ok())
    }

    /// Visit the raw storage slots under the shared lock; see [`RingQueueLike::scan`]
    pub fn scan(&self, visitor: Option<&mut dyn FnMut(Option<&T>)>) -> Result<()> {
        self.inner.read(|queue| queue.scan(visitor))
    }

    /// Run `f` with the exclusive lock held
    ///
    /// `f` works on the queue directly and must not call methods of this wrapper, which would
    /// deadlock.
    pub fn run_exclusive<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Q) -> R,
    {
        self.inner.write(f, |_| true)
    }

    /// Run `f` with the shared lock held
    pub fn run_shared<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Q) -> R,
    {
        self.inner.read(f)
    }

    /// Shared-lock guard over the wrapped instance, for diagnostics
    pub fn instance(&self) -> MappedRwLockReadGuard<'_, Q> {
        self.inner.instance()
    }

    /// Direct access to the wrapped instance; the exclusive borrow stands in for the lock
    pub fn instance_mut(&mut self) -> &mut Q {
        self.inner.get_mut()
    }

    /// Unwrap the instance
    pub fn into_inner(self) -> Box<Q> {
        self.inner.into_inner()
    }
}

impl<T, Q: RingQueueLike<T> + ?Sized> MetricsCollector for SafeRingQueue<T, Q> {
    fn metrics(&self) -> PerformanceMetrics {
        self.inner.metrics()
    }

    fn reset_metrics(&self) {
        self.inner.reset_metrics();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.inner.set_metrics_enabled(enabled);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.inner.is_metrics_enabled()
    }
}

impl<T, Q: RingQueueLike<T> + ?Sized> fmt::Debug for SafeRingQueue<T, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeRingQueue")
            .field("len", &self.len())
            .field("available_capacity", &self.available_capacity())
            .field("metrics_enabled", &self.is_metrics_enabled())
            .finish_non_exhaustive()
    }
}
