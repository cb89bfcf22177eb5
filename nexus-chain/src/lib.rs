//! Linked sequences over an owned node arena.
//!
//! This crate provides one doubly-linked container and two singly-linked
//! adapters that share a node vocabulary and a storage model:
//!
//! | Type | Chain | Operations |
//! |------|-------|------------|
//! | [`DoublyLinked`] | `prev` + `next` | O(1) enqueue/dequeue/push/pop, O(n/2) positional get/insert/remove |
//! | [`Queue`] | `next` | O(1) FIFO enqueue/dequeue/peek |
//! | [`Stack`] | `next` | O(1) LIFO push/pop/peek |
//!
//! # Storage Model
//!
//! Nodes do not point at each other. Each container owns an arena
//! ([`Storage`]) and links nodes by [`Key`]:
//!
//! ```text
//! Arena (VecStorage)   - owns every node, hands out stable keys
//! DoublyLinked / ...   - head, tail, len; links are keys into the arena
//! ```
//!
//! The arena is the single owner of each node, so back-links cannot cause a
//! double free or a leak, and the containers are `Send`/`Sync` whenever the
//! element type is. Freed slots are recycled, so a steady-state workload
//! stops allocating once the arena has grown to its high-water mark.
//!
//! # Quick Start
//!
//! ```
//! use nexus_chain::{DoublyLinked, Queue, Stack};
//!
//! let mut list: DoublyLinked<u64> = DoublyLinked::new();
//! for i in 0..100 {
//!     list.push(i);
//! }
//! assert_eq!(list.get_at(50), Some(&50));
//! assert_eq!(list.get_at(150), None);
//!
//! let mut queue: Queue<&str> = Queue::new();
//! queue.enqueue("first");
//! queue.enqueue("second");
//! assert_eq!(queue.dequeue(), Some("first"));
//!
//! let mut stack: Stack<&str> = Stack::new();
//! stack.push("bottom");
//! stack.push("top");
//! assert_eq!(stack.pop(), Some("top"));
//! ```
//!
//! # Missing Values
//!
//! Reads and removals that have nothing to return (empty container, index out
//! of range) return `None` and leave the container untouched. A rejected
//! positional insert returns [`OutOfBounds`] with the value inside.
//!
//! # Key Width
//!
//! Links default to `u32` keys, so a doubly-linked node spends 8 bytes on
//! links on any target. Choose a wider key if more than `u32::MAX - 1`
//! elements may be live at once:
//!
//! ```
//! use nexus_chain::DoublyLinked;
//!
//! let mut list: DoublyLinked<u64, usize> = DoublyLinked::new();
//! list.enqueue(1);
//! ```
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab` and the
//!   `SlabDoublyLinked`, `SlabQueue` and `SlabStack` aliases

#![warn(missing_docs)]

pub mod doubly;
pub mod error;
pub mod key;
pub mod node;
pub mod queue;
pub mod stack;
pub mod storage;

pub use doubly::{ChainStorage, DoublyLinked};
pub use error::OutOfBounds;
pub use key::Key;
pub use node::{Node, SinglyNode};
pub use queue::{Queue, QueueStorage};
pub use stack::{Stack, StackStorage};
pub use storage::{Storage, VecStorage};

#[cfg(feature = "slab")]
pub use doubly::SlabDoublyLinked;
#[cfg(feature = "slab")]
pub use queue::SlabQueue;
#[cfg(feature = "slab")]
pub use stack::SlabStack;
