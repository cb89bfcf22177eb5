//! Doubly-linked sequence with queue, stack and positional access.
//!
//! [`DoublyLinked`] owns an arena of [`Node`]s and threads a chain through
//! them with key links. Both ends are O(1) to mutate; positional access walks
//! from whichever end is nearer, so it costs at most `len / 2` hops.
//!
//! # Growth and shrink points
//!
//! There is a single growth point at the tail. `enqueue` and `push` both
//! append there; the shrink side picks the discipline:
//!
//! ```text
//! dequeue <- [head] <-> ... <-> [tail] <- enqueue / push
//!                                 |
//!                                 +-> pop
//! ```
//!
//! # Example
//!
//! ```
//! use nexus_chain::DoublyLinked;
//!
//! let mut list: DoublyLinked<&str> = DoublyLinked::new();
//!
//! list.enqueue("a");
//! list.push("b");
//! list.push("c");
//!
//! assert_eq!(list.get_at(1), Some(&"b"));
//!
//! list.insert_at(1, "x").unwrap();
//! assert_eq!(list.remove_at(2), Some("b"));
//!
//! assert_eq!(list.dequeue(), Some("a"));
//! assert_eq!(list.pop(), Some("c"));
//! assert_eq!(list.pop(), Some("x"));
//! assert_eq!(list.pop(), None);
//! ```
//!
//! # Out-of-range indices
//!
//! Reads and removals return `None`. A rejected insertion returns
//! [`OutOfBounds`] holding the value. In both cases the list is untouched.
//!
//! ```
//! use nexus_chain::DoublyLinked;
//!
//! let mut list: DoublyLinked<u64> = DoublyLinked::new();
//! list.push(1);
//!
//! assert_eq!(list.get_at(5), None);
//! assert_eq!(list.remove_at(5), None);
//!
//! let err = list.insert_at(5, 99).unwrap_err();
//! assert_eq!(err.into_inner(), 99);
//! assert_eq!(list.len(), 1);
//! ```

use core::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::{Key, Node, OutOfBounds, Storage, VecStorage};

/// Default arena for [`DoublyLinked`].
pub type ChainStorage<T, K = u32> = VecStorage<Node<T, K>, K>;

/// [`DoublyLinked`] backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabDoublyLinked<T> = DoublyLinked<T, usize, slab::Slab<Node<T, usize>>>;

/// A doubly-linked list that owns its node arena.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `K`: Link key type (default `u32`)
/// - `S`: Arena type (default [`ChainStorage<T, K>`])
#[derive(Clone)]
pub struct DoublyLinked<T, K: Key = u32, S = ChainStorage<T, K>>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> DoublyLinked<T, K, ChainStorage<T, K>> {
    /// Creates an empty list whose arena holds `capacity` nodes before
    /// reallocating.
    ///
    /// This is a sizing hint, not a limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(VecStorage::with_capacity(capacity))
    }
}

impl<T, K: Key, S> DoublyLinked<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self::from_storage(S::default())
    }
}

impl<T, K: Key, S> Default for DoublyLinked<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key, S> DoublyLinked<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list on top of the given arena.
    ///
    /// Anything already in `storage` is dropped, since the list must be the
    /// only thing referencing its slots.
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

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // End operations
    // ========================================================================

    /// Appends a value at the tail.
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        let key = self.storage.insert(Node::new(value, self.tail, K::NONE));

        if self.tail.is_some() {
            // Safety: tail is live when is_some()
            unsafe { self.storage.get_unchecked_mut(self.tail) }.next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    /// Removes and returns the value at the head.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }

        // Safety: head is live when is_some()
        Some(unsafe { self.detach(self.head) })
    }

    /// Appends a value at the tail.
    ///
    /// Same growth point as [`enqueue`](Self::enqueue); pair with
    /// [`pop`](Self::pop) for LIFO order.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.enqueue(value);
    }

    /// Removes and returns the value at the tail.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.tail.is_none() {
            return None;
        }

        // Safety: tail is live when is_some()
        Some(unsafe { self.detach(self.tail) })
    }

    /// Returns a reference to the head value.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is live when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.head).value })
        }
    }

    /// Returns a mutable reference to the head value.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is live when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.head).value })
        }
    }

    /// Returns a reference to the tail value.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_none() {
            None
        } else {
            // Safety: tail is live when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.tail).value })
        }
    }

    /// Returns a mutable reference to the tail value.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail.is_none() {
            None
        } else {
            // Safety: tail is live when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.tail).value })
        }
    }

    // ========================================================================
    // Positional operations
    // ========================================================================

    /// Returns a reference to the value at `index`.
    ///
    /// Returns `None` if `index >= len()`.
    pub fn get_at(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            trace!(index, len = self.len, "get_at index out of range");
            return None;
        }

        let key = self.key_at(index);
        // Safety: key_at yields a live node for in-range indices
        Some(unsafe { &self.storage.get_unchecked(key).value })
    }

    /// Returns a mutable reference to the value at `index`.
    ///
    /// Returns `None` if `index >= len()`.
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            trace!(index, len = self.len, "get_at_mut index out of range");
            return None;
        }

        let key = self.key_at(index);
        // Safety: key_at yields a live node for in-range indices
        Some(unsafe { &mut self.storage.get_unchecked_mut(key).value })
    }

    /// Inserts `value` so that it ends up at `index`, shifting later
    /// elements back by one.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns `Err(OutOfBounds)` carrying the value if `index > len()`.
    /// The list is left unchanged.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), OutOfBounds<T>> {
        if index > self.len {
            trace!(index, len = self.len, "insert_at index out of range");
            return Err(OutOfBounds {
                index,
                len: self.len,
                value,
            });
        }

        if index == self.len {
            self.enqueue(value);
            return Ok(());
        }

        let right = self.key_at(index);
        // Safety: key_at yields a live node for in-range indices
        let left = unsafe { self.storage.get_unchecked(right) }.prev;
        let key = self.storage.insert(Node::new(value, left, right));

        // Safety: right is still live, inserting never frees a slot
        unsafe { self.storage.get_unchecked_mut(right) }.prev = key;

        if left.is_some() {
            // Safety: prev links of live nodes are live (list invariant)
            unsafe { self.storage.get_unchecked_mut(left) }.next = key;
        } else {
            self.head = key;
        }

        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value at `index`.
    ///
    /// Returns `None` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            trace!(index, len = self.len, "remove_at index out of range");
            return None;
        }

        let key = self.key_at(index);
        // Safety: key_at yields a live node for in-range indices
        Some(unsafe { self.detach(key) })
    }

    // ========================================================================
    // Bulk
    // ========================================================================

    /// Removes every element.
    ///
    /// The list is empty before any value is dropped, so a panicking `Drop`
    /// leaves it empty rather than linked to freed slots.
    pub fn clear(&mut self) {
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
        self.storage.clear();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Walks to the node at `index` from the nearer end.
    ///
    /// `index` must be below `len`.
    #[inline]
    fn key_at(&self, index: usize) -> K {
        debug_assert!(index < self.len);

        if index < self.len / 2 {
            let mut key = self.head;
            for _ in 0..index {
                // Safety: fewer than len hops from head stay on live nodes
                key = unsafe { self.storage.get_unchecked(key) }.next;
            }
            key
        } else {
            let mut key = self.tail;
            for _ in 0..self.len - 1 - index {
                // Safety: fewer than len hops from tail stay on live nodes
                key = unsafe { self.storage.get_unchecked(key) }.prev;
            }
            key
        }
    }

    /// Unlinks `key`, releases its slot and returns the value.
    ///
    /// # Safety
    ///
    /// `key` must be a live node of this list.
    #[inline]
    unsafe fn detach(&mut self, key: K) -> T {
        let node = unsafe { self.storage.remove_unchecked(key) };

        if node.prev.is_some() {
            // Safety: prev links of live nodes are live (list invariant)
            unsafe { self.storage.get_unchecked_mut(node.prev) }.next = node.next;
        } else {
            self.head = node.next;
        }

        if node.next.is_some() {
            // Safety: next links of live nodes are live (list invariant)
            unsafe { self.storage.get_unchecked_mut(node.next) }.prev = node.prev;
        } else {
            self.tail = node.prev;
        }

        self.len -= 1;
        node.value
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for DoublyLinked<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
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
impl<T, K: Key, S> DoublyLinked<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Walks the chain in both directions and checks every link.
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len == 0, self.head.is_none(), "len/head disagree");
        assert_eq!(self.len == 0, self.tail.is_none(), "len/tail disagree");
        assert_eq!(self.storage.len(), self.len, "arena holds stray nodes");

        if self.len == 1 {
            assert!(self.head == self.tail, "single node must be head and tail");
        }

        let mut prev = K::NONE;
        let mut key = self.head;
        let mut forward = 0;
        while key.is_some() {
            let node = self.storage.get(key).expect("forward link to vacant slot");
            assert!(node.prev == prev, "broken prev link at position {forward}");
            prev = key;
            key = node.next;
            forward += 1;
            assert!(forward <= self.len, "forward walk overran len");
        }
        assert_eq!(forward, self.len);
        assert!(prev == self.tail, "forward walk did not end at tail");

        let mut next = K::NONE;
        let mut key = self.tail;
        let mut backward = 0;
        while key.is_some() {
            let node = self.storage.get(key).expect("backward link to vacant slot");
            assert!(node.next == next, "broken next link");
            next = key;
            key = node.prev;
            backward += 1;
            assert!(backward <= self.len, "backward walk overran len");
        }
        assert_eq!(backward, self.len);
        assert!(next == self.head, "backward walk did not end at head");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    type List = DoublyLinked<u64>;

    fn filled(n: u64) -> List {
        let mut list = List::new();
        for i in 0..n {
            list.push(i);
        }
        list
    }

    fn contents(list: &List) -> Vec<u64> {
        (0..list.len()).map(|i| *list.get_at(i).unwrap()).collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        list.assert_invariants();
    }

    #[test]
    fn enqueue_then_dequeue_single() {
        let mut list = List::new();

        list.enqueue(1);
        assert_eq!(list.len(), 1);
        list.assert_invariants();

        assert_eq!(list.dequeue(), Some(1));
        assert_eq!(list.len(), 0);
        list.assert_invariants();
    }

    #[test]
    fn enqueue_dequeue_is_fifo() {
        let mut list = List::new();
        for i in 0..10 {
            list.enqueue(i);
        }
        assert_eq!(list.len(), 10);

        for i in 0..10 {
            assert_eq!(list.dequeue(), Some(i));
            list.assert_invariants();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut list = filled(10);
        assert_eq!(list.len(), 10);

        for i in (0..10).rev() {
            assert_eq!(list.pop(), Some(i));
            list.assert_invariants();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn removals_on_empty_return_none() {
        let mut list = List::new();

        assert_eq!(list.dequeue(), None);
        assert_eq!(list.pop(), None);
        assert_eq!(list.remove_at(0), None);
        assert_eq!(list.get_at(0), None);
        assert_eq!(list.len(), 0);
        list.assert_invariants();
    }

    #[test]
    fn pop_last_clears_head() {
        let mut list = List::new();
        list.push(7);

        assert_eq!(list.pop(), Some(7));
        assert!(list.front().is_none());
        list.assert_invariants();

        // Chain is reusable from the empty state.
        list.enqueue(8);
        assert_eq!(list.front(), Some(&8));
        assert_eq!(list.back(), Some(&8));
        list.assert_invariants();
    }

    #[test]
    fn dequeue_last_clears_tail() {
        let mut list = List::new();
        list.enqueue(7);

        assert_eq!(list.dequeue(), Some(7));
        assert!(list.back().is_none());
        list.assert_invariants();

        list.push(9);
        assert_eq!(list.pop(), Some(9));
        list.assert_invariants();
    }

    #[test]
    fn both_ends_interleaved() {
        let mut list = filled(5);

        assert_eq!(list.dequeue(), Some(0));
        assert_eq!(list.pop(), Some(4));
        list.enqueue(5);
        assert_eq!(contents(&list), vec![1, 2, 3, 5]);
        list.assert_invariants();
    }

    #[test]
    fn front_and_back_mut() {
        let mut list = filled(3);

        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 20;

        assert_eq!(list.front(), Some(&10));
        assert_eq!(list.back(), Some(&20));
        assert_eq!(contents(&list), vec![10, 1, 20]);
    }

    #[test]
    fn get_at_walks_from_either_end() {
        for n in [1, 2, 3, 10, 11] {
            let list = filled(n);
            for i in 0..n {
                assert_eq!(list.get_at(i as usize), Some(&i), "n={n} i={i}");
            }
        }
    }

    #[test]
    fn get_at_out_of_range() {
        let list = filled(100);

        assert_eq!(list.get_at(100), None);
        assert_eq!(list.get_at(150), None);
        assert_eq!(list.get_at(usize::MAX), None);
        assert_eq!(list.len(), 100);
    }

    #[test]
    fn get_at_mut_updates_in_place() {
        let mut list = filled(6);

        *list.get_at_mut(1).unwrap() = 100;
        *list.get_at_mut(4).unwrap() = 400;
        assert!(list.get_at_mut(6).is_none());

        assert_eq!(contents(&list), vec![0, 100, 2, 3, 400, 5]);
    }

    #[test]
    fn insert_at_head() {
        let mut list = filled(3);

        list.insert_at(0, 99).unwrap();
        assert_eq!(list.front(), Some(&99));
        assert_eq!(contents(&list), vec![99, 0, 1, 2]);
        list.assert_invariants();
    }

    #[test]
    fn insert_at_middle() {
        let mut list = filled(4);

        list.insert_at(2, 99).unwrap();
        assert_eq!(contents(&list), vec![0, 1, 99, 2, 3]);
        list.assert_invariants();
    }

    #[test]
    fn insert_at_len_appends() {
        let mut list = filled(3);

        list.insert_at(3, 99).unwrap();
        assert_eq!(list.back(), Some(&99));
        assert_eq!(contents(&list), vec![0, 1, 2, 99]);
        list.assert_invariants();
    }

    #[test]
    fn insert_at_zero_on_empty() {
        let mut list = List::new();

        list.insert_at(0, 5).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.front(), Some(&5));
        list.assert_invariants();
    }

    #[test]
    fn insert_at_out_of_range_is_rejected() {
        let mut list = filled(3);

        let err = list.insert_at(4, 99).unwrap_err();
        assert_eq!(err.index, 4);
        assert_eq!(err.len, 3);
        assert_eq!(err.into_inner(), 99);

        assert_eq!(contents(&list), vec![0, 1, 2]);
        list.assert_invariants();

        let mut empty = List::new();
        assert!(empty.insert_at(1, 1).is_err());
        assert!(empty.is_empty());
        empty.assert_invariants();
    }

    #[test]
    fn insert_then_get_roundtrip_at_every_position() {
        const K: u64 = 9;
        for i in 0..=K as usize {
            let mut list = filled(K);
            list.insert_at(i, 1000).unwrap();
            assert_eq!(list.get_at(i), Some(&1000), "position {i}");
            assert_eq!(list.len(), K as usize + 1);
            list.assert_invariants();
        }
    }

    #[test]
    fn remove_at_head_middle_tail() {
        let mut list = filled(5);

        assert_eq!(list.remove_at(0), Some(0));
        list.assert_invariants();
        assert_eq!(list.remove_at(3), Some(4));
        list.assert_invariants();
        assert_eq!(list.remove_at(1), Some(2));
        list.assert_invariants();

        assert_eq!(contents(&list), vec![1, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn remove_at_only_element() {
        let mut list = filled(1);

        assert_eq!(list.remove_at(0), Some(0));
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn remove_at_out_of_range_leaves_list_alone() {
        let mut list = filled(4);

        assert_eq!(list.remove_at(4), None);
        assert_eq!(list.remove_at(usize::MAX), None);
        assert_eq!(contents(&list), vec![0, 1, 2, 3]);
        list.assert_invariants();
    }

    #[test]
    fn insert_and_remove_same_position() {
        let mut list = filled(100);

        list.insert_at(5, 500).unwrap();
        assert_eq!(list.get_at(5), Some(&500));
        assert_eq!(list.get_at(4), Some(&4));
        assert_eq!(list.get_at(6), Some(&5));

        assert_eq!(list.remove_at(5), Some(500));
        assert_eq!(list.get_at(5), Some(&5));
        assert_eq!(list.len(), 100);
        list.assert_invariants();
    }

    #[test]
    fn clear_then_reuse() {
        let mut list = filled(10);

        list.clear();
        assert!(list.is_empty());
        list.assert_invariants();

        list.push(1);
        list.push(2);
        assert_eq!(contents(&list), vec![1, 2]);
        list.assert_invariants();
    }

    #[test]
    fn clear_survives_panicking_drop() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        struct Bomb(bool);

        impl Drop for Bomb {
            fn drop(&mut self) {
                if self.0 {
                    panic!("bomb");
                }
            }
        }

        let mut list: DoublyLinked<Bomb> = DoublyLinked::new();
        list.push(Bomb(false));
        list.push(Bomb(true));
        list.push(Bomb(false));

        assert!(catch_unwind(AssertUnwindSafe(|| list.clear())).is_err());

        assert!(list.is_empty());
        list.assert_invariants();
        assert!(list.get_at(0).is_none());
        assert!(list.pop().is_none());
        assert!(list.dequeue().is_none());

        list.push(Bomb(false));
        assert!(list.insert_at(0, Bomb(false)).is_ok());
        assert_eq!(list.len(), 2);
        list.assert_invariants();
    }

    #[test]
    fn rejected_indices_emit_trace_events() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut list = filled(3);
            assert_eq!(list.get_at(7), None);
            assert_eq!(list.get_at_mut(3), None);
            assert!(list.insert_at(4, 9).is_err());
            assert_eq!(list.remove_at(5), None);

            // Accepted operations stay quiet.
            list.insert_at(3, 9).unwrap();
            assert_eq!(list.get_at(0), Some(&0));
        });

        let output = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4, "{output}");

        assert!(lines[0].contains("get_at index out of range"));
        assert!(lines[0].contains("index=7"));
        assert!(lines[0].contains("len=3"));

        assert!(lines[1].contains("get_at_mut index out of range"));
        assert!(lines[1].contains("index=3"));

        assert!(lines[2].contains("insert_at index out of range"));
        assert!(lines[2].contains("index=4"));
        assert!(lines[2].contains("len=3"));

        assert!(lines[3].contains("remove_at index out of range"));
        assert!(lines[3].contains("index=5"));

        assert!(lines.iter().all(|line| line.contains("TRACE")));
    }

    #[test]
    fn from_storage_discards_existing_slots() {
        let mut storage: ChainStorage<u64> = ChainStorage::new();
        storage.insert(Node::new(1, u32::NONE, u32::NONE));

        let list = DoublyLinked::from_storage(storage);
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn with_capacity_starts_empty() {
        let mut list: DoublyLinked<u64> = DoublyLinked::with_capacity(64);
        assert!(list.is_empty());

        list.push(1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn debug_lists_values_in_order() {
        let list = filled(3);
        assert_eq!(format!("{:?}", list), "[0, 1, 2]");

        let empty = List::new();
        assert_eq!(format!("{:?}", empty), "[]");
    }

    #[test]
    fn clone_is_independent() {
        let mut list = filled(3);
        let copy = list.clone();

        list.pop();
        assert_eq!(contents(&copy), vec![0, 1, 2]);
        copy.assert_invariants();
    }

    #[test]
    fn u16_keys() {
        let mut list: DoublyLinked<u64, u16> = DoublyLinked::new();

        for i in 0..1000 {
            list.push(i);
        }
        list.insert_at(500, 9999).unwrap();
        assert_eq!(list.get_at(500), Some(&9999));
        assert_eq!(list.remove_at(0), Some(0));
        list.assert_invariants();
    }

    #[test]
    fn drop_releases_values() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut list: DoublyLinked<Rc<()>> = DoublyLinked::new();
            for _ in 0..5 {
                list.push(Rc::clone(&tracker));
            }
            list.remove_at(2);
            assert_eq!(Rc::strong_count(&tracker), 5);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn send_and_sync_follow_value_type() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DoublyLinked<u64>>();
        assert_send_sync::<DoublyLinked<String, usize>>();
    }

    // ========================================================================
    // Stress tests
    // ========================================================================

    #[test]
    fn stress_random_operations() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut list = List::new();
        let mut reference: VecDeque<u64> = VecDeque::new();

        for step in 0..5000u64 {
            let op = rng.random_range(0..100);
            // Occasionally probe one past the end to hit rejection paths.
            let index = rng.random_range(0..=reference.len() + 1);

            if op < 20 {
                list.enqueue(step);
                reference.push_back(step);
            } else if op < 30 {
                list.push(step);
                reference.push_back(step);
            } else if op < 40 {
                assert_eq!(list.dequeue(), reference.pop_front());
            } else if op < 50 {
                assert_eq!(list.pop(), reference.pop_back());
            } else if op < 70 {
                let result = list.insert_at(index, step);
                if index <= reference.len() {
                    assert!(result.is_ok());
                    reference.insert(index, step);
                } else {
                    assert_eq!(result.unwrap_err().into_inner(), step);
                }
            } else if op < 85 {
                assert_eq!(list.remove_at(index), reference.remove(index));
            } else {
                assert_eq!(list.get_at(index), reference.get(index));
            }

            assert_eq!(list.len(), reference.len());
            list.assert_invariants();
        }

        let values: Vec<_> = reference.iter().copied().collect();
        assert_eq!(contents(&list), values);
    }

    #[test]
    fn stress_grow_and_drain() {
        let mut list = List::new();

        for round in 0..5 {
            for i in 0..200 {
                list.insert_at(list.len() / 2, round * 1000 + i).unwrap();
            }
            list.assert_invariants();

            while list.len() > 50 {
                list.remove_at(list.len() / 3);
            }
            list.assert_invariants();
        }

        while list.pop().is_some() {}
        list.assert_invariants();
    }

    #[cfg(feature = "slab")]
    mod slab_tests {
        use super::*;

        #[test]
        fn slab_backed_positional_ops() {
            let mut list: SlabDoublyLinked<u64> = SlabDoublyLinked::new();

            for i in 0..10 {
                list.push(i);
            }
            list.insert_at(3, 99).unwrap();
            assert_eq!(list.get_at(3), Some(&99));
            assert_eq!(list.remove_at(3), Some(99));
            assert_eq!(list.dequeue(), Some(0));
            assert_eq!(list.pop(), Some(9));
            list.assert_invariants();
        }
    }
}
