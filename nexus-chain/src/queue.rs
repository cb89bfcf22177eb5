//! FIFO queue over a singly-linked chain.

use core::fmt;
use std::marker::PhantomData;

use crate::{Key, SinglyNode, Storage, VecStorage};

/// Default arena for [`Queue`].
pub type QueueStorage<T, K = u32> = VecStorage<SinglyNode<T, K>, K>;

/// [`Queue`] backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabQueue<T> = Queue<T, usize, slab::Slab<SinglyNode<T, usize>>>;

/// A first-in first-out queue.
///
/// Values enter at the tail and leave from the head. Nodes carry only a
/// `next` link, which is all either end needs.
///
/// # Example
///
/// ```
/// use nexus_chain::Queue;
///
/// let mut queue: Queue<u64> = Queue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
///
/// assert_eq!(queue.peek(), Some(&1));
/// assert_eq!(queue.dequeue(), Some(1));
/// assert_eq!(queue.dequeue(), Some(2));
/// assert_eq!(queue.dequeue(), None);
/// ```
#[derive(Clone)]
pub struct Queue<T, K: Key = u32, S = QueueStorage<T, K>>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> Queue<T, K, QueueStorage<T, K>> {
    /// Creates an empty queue with room for `capacity` values before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(VecStorage::with_capacity(capacity))
    }
}

impl<T, K: Key, S> Queue<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K> + Default,
{
    /// Creates an empty queue.
    #[inline]
    pub fn new() -> Self {
        Self::from_storage(S::default())
    }
}

impl<T, K: Key, S> Default for Queue<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key, S> Queue<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    /// Creates an empty queue on top of the given arena, clearing it first.
    pub fn from_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of queued values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a value at the tail.
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        let key = self.storage.insert(SinglyNode::new(value, K::NONE));

        if self.tail.is_some() {
            // Safety: tail is live when is_some()
            unsafe { self.storage.get_unchecked_mut(self.tail) }.next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    /// Removes and returns the oldest value.
    ///
    /// Returns `None` if the queue is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }

        // Safety: head is live when is_some()
        let node = unsafe { self.storage.remove_unchecked(self.head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = K::NONE;
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Returns a reference to the oldest value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is live when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.head).value })
        }
    }

    /// Returns a mutable reference to the oldest value without removing it.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is live when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.head).value })
        }
    }

    /// Removes every value.
    ///
    /// The queue is empty before any value is dropped, so a panicking `Drop`
    /// leaves it empty rather than linked to freed slots.
    pub fn clear(&mut self) {
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
        self.storage.clear();
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for Queue<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_list();
        let mut key = self.head;
        while key.is_some() {
            // Safety: key came from walking live links
            let node = unsafe { self.storage.get_unchecked(key) };
            entries.entry(&node.value);
            key = node.next;
        }
        entries.finish()
    }
}

#[cfg(test)]
impl<T, K: Key, S> Queue<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.len == 0, self.tail.is_none());
        assert_eq!(self.storage.len(), self.len);

        let mut last = K::NONE;
        let mut key = self.head;
        let mut count = 0;
        while key.is_some() {
            let node = self.storage.get(key).expect("link to vacant slot");
            last = key;
            key = node.next;
            count += 1;
            assert!(count <= self.len, "walk overran len");
        }
        assert_eq!(count, self.len);
        assert!(last == self.tail, "walk did not end at tail");
    }
}
