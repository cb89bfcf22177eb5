//! LIFO stack over a singly-linked chain.

use core::fmt;
use std::marker::PhantomData;

use crate::{Key, SinglyNode, Storage, VecStorage};

/// Default arena for [`Stack`].
pub type StackStorage<T, K = u32> = VecStorage<SinglyNode<T, K>, K>;

/// [`Stack`] backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabStack<T> = Stack<T, usize, slab::Slab<SinglyNode<T, usize>>>;

/// A last-in first-out stack.
///
/// The chain has one mutable end, the top. Each node links toward the value
/// pushed before it.
///
/// # Example
///
/// ```
/// use nexus_chain::Stack;
///
/// let mut stack: Stack<u64> = Stack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.peek(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Clone)]
pub struct Stack<T, K: Key = u32, S = StackStorage<T, K>>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    storage: S,
    top: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> Stack<T, K, StackStorage<T, K>> {
    /// Creates an empty stack with room for `capacity` values before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(VecStorage::with_capacity(capacity))
    }
}

impl<T, K: Key, S> Stack<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K> + Default,
{
    /// Creates an empty stack.
    #[inline]
    pub fn new() -> Self {
        Self::from_storage(S::default())
    }
}

impl<T, K: Key, S> Default for Stack<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key, S> Stack<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    /// Creates an empty stack on top of the given arena, clearing it first.
    pub fn from_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            top: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of stacked values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pushes a value onto the top.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.top = self.storage.insert(SinglyNode::new(value, self.top));
        self.len += 1;
    }

    /// Removes and returns the most recently pushed value.
    ///
    /// Returns `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.top.is_none() {
            return None;
        }

        // Safety: top is live when is_some()
        let node = unsafe { self.storage.remove_unchecked(self.top) };
        self.top = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Returns a reference to the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        if self.top.is_none() {
            None
        } else {
            // Safety: top is live when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.top).value })
        }
    }

    /// Returns a mutable reference to the top value without removing it.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        if self.top.is_none() {
            None
        } else {
            // Safety: top is live when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.top).value })
        }
    }

    /// Removes every value.
    ///
    /// The stack is empty before any value is dropped, so a panicking `Drop`
    /// leaves it empty rather than linked to freed slots.
    pub fn clear(&mut self) {
        self.top = K::NONE;
        self.len = 0;
        self.storage.clear();
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for Stack<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    /// Formats top first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_list();
        let mut key = self.top;
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
impl<T, K: Key, S> Stack<T, K, S>
where
    S: Storage<SinglyNode<T, K>, Key = K>,
{
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len == 0, self.top.is_none());
        assert_eq!(self.storage.len(), self.len);

        let mut key = self.top;
        let mut count = 0;
        while key.is_some() {
            key = self.storage.get(key).expect("link to vacant slot").next;
            count += 1;
            assert!(count <= self.len, "walk overran len");
        }
        assert_eq!(count, self.len);
    }
}
