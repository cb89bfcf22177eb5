//! Chain nodes.
//!
//! Nodes are an implementation detail: callers only ever see `&T`, `&mut T`
//! or `T`. They are public so storage types can be named in type aliases.

use crate::Key;

/// A node in a doubly-linked chain.
///
/// `next` and `prev` are keys into the arena that owns the node, with
/// `K::NONE` marking the end of the chain in that direction.
#[derive(Debug, Clone)]
pub struct Node<T, K: Key = u32> {
    pub(crate) value: T,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<T, K: Key> Node<T, K> {
    /// Creates a node already pointing at its future neighbors.
    #[inline]
    pub(crate) fn new(value: T, prev: K, next: K) -> Self {
        Self { value, prev, next }
    }
}

/// A node in a singly-linked chain, used by [`Queue`](crate::Queue) and
/// [`Stack`](crate::Stack).
#[derive(Debug, Clone)]
pub struct SinglyNode<T, K: Key = u32> {
    pub(crate) value: T,
    pub(crate) next: K,
}

impl<T, K: Key> SinglyNode<T, K> {
    #[inline]
    pub(crate) fn new(value: T, next: K) -> Self {
        Self { value, next }
    }
}
