//! # safequeue
//!
//! Double-ended queues and fixed-capacity ring queues, each usable from many threads
//! through a uniform reader/writer locking wrapper.
//!
//! ## Features
//!
//! - **Linked Deque**: doubly-linked deque with an optional capacity bound
//! - **Ring Queue**: fixed-capacity circular FIFO buffer with one reserved sentinel slot
//! - **Safety Wrappers**: [`SafeDeque`] and [`SafeRingQueue`] serialize access to any
//!   container implementing the matching capability trait
//!
//! ## Philosophy
//!
//! - Containers never lock themselves; the wrapper owns the only lock
//! - Every operation is non-blocking: a full container fails fast, an empty one yields `None`
//! - Compound operations run atomically through [`SafeDeque::run_exclusive`] and friends
//!
//! ## Quick Start
//!
//! ```rust
//! use safequeue::SafeRingQueue;
//!
//! // 5 slots, 4 usable
//! let queue = SafeRingQueue::with_ring(5);
//! queue.push_all(vec![1, 2, 3, 4])?;
//! assert!(queue.push(5).is_err());
//! assert_eq!(queue.pop(), Some(1));
//! # Ok::<(), safequeue::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! The plain containers in [`deque`] and [`queue`] are single-threaded. Share them across
//! threads only through the wrappers in [`sync`], which take a shared lock for queries and
//! an exclusive lock for every mutation.

#![no_std]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(all(feature = "std", not(test)))]
extern crate std;

extern crate alloc;

mod batch;
pub mod deque;
pub mod metrics;
pub mod queue;
#[cfg(feature = "std")]
pub mod sync;

pub use crate::deque::{DequeLike, LinkedDeque, NodeId};
pub use crate::queue::{RingQueue, RingQueueLike};
#[cfg(feature = "std")]
pub use crate::sync::{SafeDeque, SafeRingQueue};

/// Error types for safequeue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A single push hit a full bounded container
    CapacityExceeded,
    /// A batch push would exceed the remaining capacity; nothing was pushed
    InsufficientCapacity {
        /// Number of values in the rejected batch
        requested: usize,
        /// Remaining capacity at the time of the check
        available: usize,
    },
    /// A required callback or buffer parameter was absent
    InvalidArgument(&'static str),
    /// The output buffer has neither a length nor an allocated capacity
    EmptyCapacity,
    /// The wrapper could not be built, or is otherwise unusable
    InvalidState(&'static str),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::CapacityExceeded => write!(f, "the queue capacity is already full"),
            Error::InsufficientCapacity {
                requested,
                available,
            } => write!(
                f,
                "the capacity size of the queue is insufficient ({} requested, {} available)",
                requested, available
            ),
            Error::InvalidArgument(name) => write!(f, "the parameter {} is absent", name),
            Error::EmptyCapacity => write!(f, "the capacity of the output buffer is 0"),
            Error::InvalidState(reason) => write!(f, "invalid state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for safequeue operations
pub type Result<T> = core::result::Result<T, Error>;
