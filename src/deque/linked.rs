//! Doubly-Linked Deque Implementation
//!
//! [`LinkedDeque`] keeps its nodes in a slot arena and links them by index. Each node owns its
//! value plus the indices of its predecessor and successor; freed slots are chained into a
//! free list and reused by later pushes, so steady-state push/pop does not allocate.
//!
//! ## Node Handles
//!
//! Every slot carries a generation counter that is bumped when its node is unlinked. A
//! [`NodeId`] records both the slot index and the generation it was issued under, which makes
//! stale handles harmless: [`LinkedDeque::get`] returns `None` and [`LinkedDeque::remove`]
//! does nothing once the node is gone, even if the slot has since been reused.
//!
//! ## Layout
//!
//! ```text
//! head                                   tail
//!  |                                       |
//!  v                                       v
//! [slot 2] <-> [slot 0] <-> [slot 3] <-> [slot 1]      free: 4 -> 5 -> None
//! ```
//!
//! ## Performance Characteristics
//!
//! - **push/pop at either end**: O(1), amortized over arena growth
//! - **remove by handle**: O(1)
//! - **traversal**: O(n) following links

use super::DequeLike;
use crate::{Error, Result};
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Handle to a live node of a [`LinkedDeque`]
///
/// Handles are handed out by [`LinkedDeque::push_back_node`],
/// [`LinkedDeque::push_front_node`] and the `scan_*` visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

/// A doubly-linked deque with an optional capacity bound
///
/// # Examples
///
/// ```rust
/// use safequeue::deque::{DequeLike, LinkedDeque};
///
/// let mut deque = LinkedDeque::unbounded();
/// deque.push_front_all(vec![1, 2, 3])?;
///
/// // front pushes reverse the batch
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// assert_eq!(deque.available_capacity(), -1);
/// # Ok::<(), safequeue::Error>(())
/// ```
pub struct LinkedDeque<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    capacity: isize,
}

impl<T> LinkedDeque<T> {
    /// Create an empty deque
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of values; any negative value means unbounded
    pub const fn new(capacity: isize) -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            head: None,
            tail: None,
            len: 0,
            capacity,
        }
    }

    /// Create an empty deque without a capacity bound
    pub const fn unbounded() -> Self {
        Self::new(-1)
    }

    /// Create an empty deque holding at most `capacity` values
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not fit in an `isize`.
    pub fn bounded(capacity: usize) -> Self {
        let capacity = isize::try_from(capacity).expect("deque capacity overflows isize");
        Self::new(capacity)
    }

    /// The configured capacity, negative when unbounded
    #[inline]
    pub const fn capacity(&self) -> isize {
        self.capacity
    }

    /// Whether the deque enforces a capacity bound
    #[inline]
    pub const fn is_bounded(&self) -> bool {
        self.capacity >= 0
    }

    /// Append a value at the back and return its handle
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when the deque is full.
    pub fn push_back_node(&mut self, value: T) -> Result<NodeId> {
        if self.is_full() {
            return Err(Error::CapacityExceeded);
        }

        let index = self.allocate(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        Ok(self.handle(index))
    }

    /// Prepend a value at the front and return its handle
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when the deque is full.
    pub fn push_front_node(&mut self, value: T) -> Result<NodeId> {
        if self.is_full() {
            return Err(Error::CapacityExceeded);
        }

        let index = self.allocate(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.node_mut(head)) {
            Some(old_head) => old_head.prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        Ok(self.handle(index))
    }

    /// Borrow the value behind `node`, if it is still linked
    pub fn get(&self, node: NodeId) -> Option<&T> {
        match self.entries.get(node.index) {
            Some(Entry {
                generation,
                slot: Slot::Occupied(n),
            }) if *generation == node.generation => Some(&n.value),
            _ => None,
        }
    }

    /// Unlink `node` and return its value; stale handles return `None`
    pub fn remove(&mut self, node: NodeId) -> Option<T> {
        self.get(node)?;
        self.unlink(node.index)
    }

    /// Unlink every node in `nodes`, returning the removed values in the order given
    ///
    /// Stale or duplicate handles are skipped.
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) -> Vec<T> {
        nodes.iter().filter_map(|&node| self.remove(node)).collect()
    }

    /// Visit live nodes front-to-back until `visitor` returns `false`
    pub fn scan_from_front<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.node(index) else { return };
            if !visitor(self.handle(index), &node.value) {
                return;
            }
            cursor = node.next;
        }
    }

    /// Visit live nodes back-to-front until `visitor` returns `false`
    pub fn scan_from_back<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &T) -> bool,
    {
        let mut cursor = self.tail;
        while let Some(index) = cursor {
            let Some(node) = self.node(index) else { return };
            if !visitor(self.handle(index), &node.value) {
                return;
            }
            cursor = node.prev;
        }
    }

    /// Iterate values front-to-back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Front value without removing it
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|index| self.node(index)).map(|n| &n.value)
    }

    /// Back value without removing it
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|index| self.node(index)).map(|n| &n.value)
    }

    /// Drop every value
    ///
    /// Slots stay allocated so handles issued before the call remain stale afterwards.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.entries[index].generation,
        }
    }

    fn node(&self, index: usize) -> Option<&Node<T>> {
        match self.entries.get(index) {
            Some(Entry {
                slot: Slot::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        match self.entries.get_mut(index) {
            Some(Entry {
                slot: Slot::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
        let Some(index) = self.free_head else {
            self.entries.push(Entry {
                generation: 0,
                slot: Slot::Occupied(node),
            });
            return self.entries.len() - 1;
        };

        let entry = &mut self.entries[index];
        if let Slot::Vacant { next_free } = &entry.slot {
            self.free_head = *next_free;
        }
        entry.slot = Slot::Occupied(node);
        index
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        let entry = self.entries.get_mut(index)?;
        if !matches!(entry.slot, Slot::Occupied(_)) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(node) = mem::replace(&mut entry.slot, vacant) else {
            return None;
        };
        entry.generation = entry.generation.wrapping_add(1);
        self.free_head = Some(index);

        match node.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        Some(node.value)
    }
}

impl<T> DequeLike<T> for LinkedDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.capacity >= 0 && self.len >= self.capacity as usize
    }

    #[inline]
    fn available_capacity(&self) -> isize {
        if self.capacity < 0 {
            return -1;
        }
        self.capacity - self.len as isize
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.push_back_node(value).map(|_| ())
    }

    fn push_front(&mut self, value: T) -> Result<()> {
        self.push_front_node(value).map(|_| ())
    }

    fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(head)
    }

    fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.unlink(tail)
    }
}

impl<T> Default for LinkedDeque<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedDeque")
            .field("capacity", &self.capacity)
            .field("values", &DebugValues(self))
            .finish()
    }
}

struct DebugValues<'a, T>(&'a LinkedDeque<T>);

impl<T: fmt::Debug> fmt::Debug for DebugValues<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a LinkedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a [`LinkedDeque`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    deque: &'a LinkedDeque<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.deque.node(self.front?)?;
        self.remaining -= 1;
        self.front = node.next;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.deque.node(self.back?)?;
        self.remaining -= 1;
        self.back = node.prev;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
