//! Thread-safe deque wrapper

use super::Guarded;
use crate::deque::{DequeLike, LinkedDeque};
use crate::metrics::{MetricsCollector, PerformanceMetrics};
use crate::{Error, Result};
use core::fmt;
use core::marker::PhantomData;
use parking_lot::MappedRwLockReadGuard;
use std::boxed::Box;
use std::vec::Vec;

/// A deque shared across threads behind a reader/writer lock
///
/// The wrapped container is any [`DequeLike`] implementation produced by a factory. By default
/// it is held as a boxed trait object, so the concrete type can be chosen at runtime; naming a
/// concrete `D` instead keeps its inherent methods reachable from
/// [`run_exclusive`](SafeDeque::run_exclusive).
///
/// # Examples
///
/// ```rust
/// use safequeue::{DequeLike, LinkedDeque, SafeDeque};
///
/// let deque = SafeDeque::<i32>::new(|| Some(Box::new(LinkedDeque::bounded(4))))?;
/// deque.push_back_all(vec![1, 2, 3])?;
///
/// // pop two values and observe the remaining length atomically
/// let (popped, remaining) = deque.run_exclusive(|inner| {
///     let popped = inner.pop_front_n(2);
///     (popped, inner.len())
/// });
/// assert_eq!(popped, vec![1, 2]);
/// assert_eq!(remaining, 1);
/// # Ok::<(), safequeue::Error>(())
/// ```
pub struct SafeDeque<T, D: ?Sized = dyn DequeLike<T> + Send + Sync> {
    inner: Guarded<D>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Send + Sync + 'static> SafeDeque<T> {
    /// Build the wrapper around the boxed instance produced by `factory`
    ///
    /// The factory is invoked exactly once.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the factory returns `None`.
    pub fn new<F>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Option<Box<dyn DequeLike<T> + Send + Sync>>,
    {
        Self::from_factory(factory)
    }

    /// Wrap a fresh [`LinkedDeque`] with the given capacity (negative for unbounded)
    pub fn with_linked(capacity: isize) -> Self {
        Self::from_box(Box::new(LinkedDeque::new(capacity)))
    }
}

impl<T, D: DequeLike<T> + ?Sized> SafeDeque<T, D> {
    /// Build the wrapper around an instance of a concrete container type
    ///
    /// Like [`SafeDeque::new`], but keeps `D` as the wrapped type so `run_exclusive` and
    /// `instance` expose its inherent methods.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the factory returns `None`.
    pub fn from_factory<F>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Option<Box<D>>,
    {
        let inner = factory().ok_or(Error::InvalidState("the deque factory returned no instance"))?;
        Ok(Self::from_box(inner))
    }

    /// Wrap an already-built instance
    pub fn from_box(inner: Box<D>) -> Self {
        Self {
            inner: Guarded::new(inner, |deque: &D| deque.len() * core::mem::size_of::<T>()),
            _marker: PhantomData,
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.inner.read(|deque| deque.len())
    }

    /// `true` when no values are stored
    pub fn is_empty(&self) -> bool {
        self.inner.read(|deque| deque.is_empty())
    }

    /// `true` when a bounded deque is at capacity
    pub fn is_full(&self) -> bool {
        self.inner.read(|deque| deque.is_full())
    }

    /// Remaining capacity, `-1` when unbounded
    pub fn available_capacity(&self) -> isize {
        self.inner.read(|deque| deque.available_capacity())
    }

    /// Whether `count` more values fit
    pub fn can_accept(&self, count: usize) -> bool {
        self.inner.read(|deque| deque.can_accept(count))
    }

    /// Append a value at the back
    pub fn push_back(&self, value: T) -> Result<()> {
        self.inner.write(|deque| deque.push_back(value), |result| result.is_ok())
    }

    /// Prepend a value at the front
    pub fn push_front(&self, value: T) -> Result<()> {
        self.inner.write(|deque| deque.push_front(value), |result| result.is_ok())
    }

    /// Append every value at the back, or none of them
    pub fn push_back_all(&self, values: Vec<T>) -> Result<()> {
        self.inner.write(|deque| deque.push_back_all(values), |result| result.is_ok())
    }

    /// Prepend every value at the front (ending up reversed), or none of them
    pub fn push_front_all(&self, values: Vec<T>) -> Result<()> {
        self.inner.write(|deque| deque.push_front_all(values), |result| result.is_ok())
    }

    /// Append values at the back until full; returns how many were pushed
    pub fn push_back_all_unchecked(&self, values: Vec<T>) -> usize {
        self.inner
            .write(|deque| deque.push_back_all_unchecked(values), |pushed| *pushed > 0)
    }

    /// Prepend values at the front until full; returns how many were pushed
    pub fn push_front_all_unchecked(&self, values: Vec<T>) -> usize {
        self.inner
            .write(|deque| deque.push_front_all_unchecked(values), |pushed| *pushed > 0)
    }

    /// Remove and return the front value
    pub fn pop_front(&self) -> Option<T> {
        self.inner.write(|deque| deque.pop_front(), Option::is_some)
    }

    /// Remove and return the back value
    pub fn pop_back(&self) -> Option<T> {
        self.inner.write(|deque| deque.pop_back(), Option::is_some)
    }

    /// Pop up to `count` values from the front
    pub fn pop_front_n(&self, count: usize) -> Vec<T> {
        self.inner
            .write(|deque| deque.pop_front_n(count), |values| !values.is_empty())
    }

    /// Pop up to `count` values from the back
    pub fn pop_back_n(&self, count: usize) -> Vec<T> {
        self.inner
            .write(|deque| deque.pop_back_n(count), |values| !values.is_empty())
    }

    /// Pop front values into `buffer`; see [`DequeLike::pop_front_into`]
    pub fn pop_front_into(&self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        self.inner
            .write(|deque| deque.pop_front_into(buffer), |result| result.is_ok())
    }

    /// Pop back values into `buffer`; see [`DequeLike::pop_back_into`]
    pub fn pop_back_into(&self, buffer: Option<&mut Vec<T>>) -> Result<usize> {
        self.inner
            .write(|deque| deque.pop_back_into(buffer), |result| result.is_ok())
    }

    /// Drain the front into `predicate`; see [`DequeLike::pop_front_while`]
    ///
    /// The predicate runs with the exclusive lock held and must not call back into this
    /// wrapper.
    pub fn pop_front_while(&self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        self.inner
            .write(|deque| deque.pop_front_while(predicate), |result| result.is_ok())
    }

    /// Drain the back into `predicate`; see [`DequeLike::pop_back_while`]
    pub fn pop_back_while(&self, predicate: Option<&mut dyn FnMut(T) -> bool>) -> Result<usize> {
        self.inner
            .write(|deque| deque.pop_back_while(predicate), |result| result.is_ok())
    }

    /// Run `f` with the exclusive lock held
    ///
    /// Use this to compose several operations atomically. `f` works on the container directly
    /// and must not call methods of this wrapper, which would deadlock.
    pub fn run_exclusive<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut D) -> R,
    {
        self.inner.write(f, |_| true)
    }

    /// Run `f` with the shared lock held
    pub fn run_shared<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&D) -> R,
    {
        self.inner.read(f)
    }

    /// Shared-lock guard over the wrapped instance, for diagnostics
    ///
    /// Writers are blocked while the guard lives.
    pub fn instance(&self) -> MappedRwLockReadGuard<'_, D> {
        self.inner.instance()
    }

    /// Direct access to the wrapped instance; the exclusive borrow stands in for the lock
    pub fn instance_mut(&mut self) -> &mut D {
        self.inner.get_mut()
    }

    /// Unwrap the instance
    pub fn into_inner(self) -> Box<D> {
        self.inner.into_inner()
    }
}

impl<T, D: DequeLike<T> + ?Sized> MetricsCollector for SafeDeque<T, D> {
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

impl<T, D: DequeLike<T> + ?Sized> fmt::Debug for SafeDeque<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeDeque")
            .field("len", &self.len())
            .field("available_capacity", &self.available_capacity())
            .field("metrics_enabled", &self.is_metrics_enabled())
            .finish_non_exhaustive()
    }
}
