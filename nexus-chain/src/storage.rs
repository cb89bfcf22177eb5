//! Arena storage for chain nodes.
//!
//! Every container in this crate owns one arena. Nodes are inserted into it
//! when a value enters the container and removed from it in the same
//! operation that unlinks them, so the arena never holds a node the
//! container cannot reach.
//!
//! Links are [`Key`]s into the arena. The arena is the only owner of a node;
//! neither `next` nor `prev` owns anything, which rules out double-free on
//! teardown and leaks through back-references.

use crate::Key;

use core::hint::unreachable_unchecked;
use core::mem;

/// Slab-like storage with stable keys and no capacity limit.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key stays valid until its value is removed
/// - **O(1)** insert, remove, get
/// - **Slot reuse**: removed slots are handed out again by later inserts
///
/// # Safety
///
/// Containers call the unchecked accessors on keys they got from `insert`
/// and have not yet removed, so implementations must guarantee that:
/// - `insert` never returns [`Key::NONE`] and never returns a key that is
///   still occupied
/// - a key returned by `insert` stays occupied, and keeps addressing the
///   same value, until it is passed to `remove`, `remove_unchecked` or
///   `clear`
/// - `get`, `get_mut` and `remove` return `Some` exactly for occupied keys
///
/// # Implementations
///
/// - [`VecStorage<T, K>`] - growable `Vec` of slots with an intrusive free list
/// - `slab::Slab<T>` - the `slab` crate, `usize` keys (feature `slab`)
pub unsafe trait Storage<T> {
    /// Key type handed out by this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must refer to an occupied slot.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must refer to an occupied slot.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Removes a value without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must refer to an occupied slot.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored value and forgets all keys.
    fn clear(&mut self);
}

// =============================================================================
// VecStorage - growable slot vector, free list threaded through vacant slots
// =============================================================================

#[derive(Debug, Clone)]
enum Slot<T, K> {
    Occupied(T),
    Vacant { next_free: K },
}

/// Growable arena backed by a `Vec` of slots.
///
/// Vacant slots form a singly-linked free list (LIFO), so a removal followed
/// by an insert reuses the same key. The arena only grows; `clear` releases
/// every slot but keeps the allocation.
///
/// Keys are `u32` by default, which halves link size compared to `usize` on
/// 64-bit targets. Inserting past the key type's range panics; use `usize`
/// keys when more than `u32::MAX - 1` live nodes are needed.
///
/// # Example
///
/// ```
/// use nexus_chain::{Storage, VecStorage};
///
/// let mut storage: VecStorage<&str> = VecStorage::with_capacity(8);
///
/// let a = storage.insert("a");
/// assert_eq!(storage.get(a), Some(&"a"));
///
/// assert_eq!(storage.remove(a), Some("a"));
/// assert_eq!(storage.get(a), None);
///
/// // The freed slot comes back first.
/// assert_eq!(storage.insert("b"), a);
/// ```
#[derive(Debug, Clone)]
pub struct VecStorage<T, K: Key = u32> {
    slots: Vec<Slot<T, K>>,
    /// Most recently freed slot, or `K::NONE`.
    free_head: K,
    len: usize,
}

impl<T, K: Key> VecStorage<T, K> {
    /// Creates an empty arena without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` nodes before growing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Returns the number of slots the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Reserves room for at least `additional` more slots.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }
}

impl<T, K: Key> Default for VecStorage<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: keys are slot positions below K::NONE, a slot is only handed out
// while vacant, and it stays occupied until removed or cleared.
unsafe impl<T, K: Key> Storage<T> for VecStorage<T, K> {
    type Key = K;

    #[inline]
    fn insert(&mut self, value: T) -> K {
        if self.free_head.is_some() {
            let key = self.free_head;
            let slot = &mut self.slots[key.as_usize()];
            match mem::replace(slot, Slot::Occupied(value)) {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            }
            self.len += 1;
            return key;
        }

        let pos = self.slots.len();
        assert!(pos < K::NONE.as_usize(), "key space exhausted");
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        K::from_usize(pos)
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        if !matches!(self.slots.get(key.as_usize()), Some(Slot::Occupied(_))) {
            return None;
        }

        // Safety: occupancy checked above
        Some(unsafe { self.remove_unchecked(key) })
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        match unsafe { self.slots.get_unchecked(key.as_usize()) } {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees the slot is occupied
            Slot::Vacant { .. } => unsafe { unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        match unsafe { self.slots.get_unchecked_mut(key.as_usize()) } {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees the slot is occupied
            Slot::Vacant { .. } => unsafe { unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: K) -> T {
        let slot = unsafe { self.slots.get_unchecked_mut(key.as_usize()) };
        let old = mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = key;
        self.len -= 1;

        match old {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees the slot was occupied
            Slot::Vacant { .. } => unsafe { unreachable_unchecked() },
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.free_head = K::NONE;
        self.len = 0;
        // Vec::clear empties the vector even if a value's Drop panics.
        self.slots.clear();
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
// Safety: slab keys are entry indices below usize::MAX and stay occupied
// until removed or cleared.
unsafe impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: usize) -> T {
        slab::Slab::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    fn clear(&mut self) {
        slab::Slab::clear(self);
    }
}
