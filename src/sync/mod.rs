//! Reader/writer locking wrappers
//!
//! [`SafeDeque`] and [`SafeRingQueue`] turn any container implementing
//! [`DequeLike`](crate::DequeLike) or [`RingQueueLike`](crate::RingQueueLike) into an object
//! that can be shared across threads.
//!
//! ## Locking Discipline
//!
//! - One `parking_lot::RwLock` per wrapper, owning the only reference to the container
//! - Queries (`len`, `is_empty`, `is_full`, capacity checks, `scan`) take the shared lock
//! - Every push/pop takes the exclusive lock for exactly one delegated call
//! - `run_exclusive` / `run_shared` hold the lock across a caller-supplied closure; this is
//!   the only way to make several primitive calls appear atomic. The closure receives the
//!   container itself, so it never re-enters the wrapper's locking.
//!
//! Nothing blocks on queue state: a full container fails immediately, an empty one returns
//! `None`. Waiting only ever happens on the lock itself.
//!
//! ## Example
//!
//! ```rust
//! use safequeue::SafeDeque;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let deque = Arc::new(SafeDeque::with_linked(-1));
//! let handles: Vec<_> = (0..4)
//!     .map(|producer| {
//!         let deque = Arc::clone(&deque);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 deque.push_back(producer * 100 + i).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(deque.len(), 400);
//! ```

mod safe_deque;
mod safe_ring;

pub use safe_deque::SafeDeque;
pub use safe_ring::SafeRingQueue;

use crate::metrics::{AtomicMetrics, PerformanceMetrics};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::boxed::Box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Lock, container and metrics shared by both wrappers.
pub(crate) struct Guarded<D: ?Sized> {
    lock: RwLock<Box<D>>,
    metrics: AtomicMetrics,
    metrics_enabled: AtomicBool,
    // bytes currently held by the container, read under the lock after each mutation
    footprint: fn(&D) -> usize,
}

impl<D: ?Sized> Guarded<D> {
    pub(crate) fn new(inner: Box<D>, footprint: fn(&D) -> usize) -> Self {
        let guarded = Self {
            lock: RwLock::new(inner),
            metrics: AtomicMetrics::default(),
            metrics_enabled: AtomicBool::new(true),
            footprint,
        };
        let initial = (guarded.footprint)(&**guarded.lock.read());
        guarded.metrics.update_memory_usage(initial);
        guarded
    }

    /// Run `op` under the shared lock.
    pub(crate) fn read<R>(&self, op: impl FnOnce(&D) -> R) -> R {
        op(&**self.lock.read())
    }

    /// Run `op` under the exclusive lock, recording the outcome judged by `succeeded`.
    pub(crate) fn write<R>(
        &self,
        op: impl FnOnce(&mut D) -> R,
        succeeded: impl FnOnce(&R) -> bool,
    ) -> R {
        if !self.is_metrics_enabled() {
            return op(&mut **self.lock.write());
        }

        let start = Instant::now();
        let mut guard = match self.lock.try_write() {
            Some(guard) => guard,
            None => {
                self.metrics.record_contention();
                self.lock.write()
            }
        };
        let result = op(&mut **guard);
        let footprint = (self.footprint)(&**guard);
        drop(guard);

        let elapsed = start.elapsed();
        if succeeded(&result) {
            self.metrics.record_success(elapsed);
        } else {
            self.metrics.record_failure(elapsed);
        }
        self.metrics.update_memory_usage(footprint);
        result
    }

    pub(crate) fn instance(&self) -> MappedRwLockReadGuard<'_, D> {
        RwLockReadGuard::map(self.lock.read(), |inner| &**inner)
    }

    pub(crate) fn get_mut(&mut self) -> &mut D {
        &mut **self.lock.get_mut()
    }

    pub(crate) fn into_inner(self) -> Box<D> {
        self.lock.into_inner()
    }

    pub(crate) fn metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    pub(crate) fn reset_metrics(&self) {
        self.metrics.reset();
    }

    pub(crate) fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics_enabled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn is_metrics_enabled(&self) -> bool {
        self.metrics_enabled.load(Ordering::Relaxed)
    }
}
