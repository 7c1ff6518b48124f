//! Arena storage for heap nodes
//!
//! Nodes are stored in a [`SlotMap`] and addressed by [`NodeHandle`], a small
//! copyable generational key. Sibling, parent and child links are handles into
//! the same arena, so the cyclic node graph of a Fibonacci heap never needs
//! shared ownership or raw pointers.
//!
//! # Handle validity
//!
//! Removing a node frees its slot. The slot may be reused by a later insert,
//! but its generation changes, so a stale handle never resolves to the new
//! occupant: [`NodeArena::get`] returns `None` and [`NodeArena::contains`]
//! returns `false` for it.
//!
//! # Example
//!
//! ```rust
//! use frequency_heap::storage::{Links, NodeArena, RingNode};
//!
//! struct Item {
//!     links: Links,
//!     value: u32,
//! }
//!
//! impl RingNode for Item {
//!     fn links(&self) -> &Links { &self.links }
//!     fn links_mut(&mut self) -> &mut Links { &mut self.links }
//! }
//!
//! let mut arena = NodeArena::new();
//! let h = arena.insert_with(|h| Item { links: Links::singleton(h), value: 7 });
//! assert_eq!(arena.get(h).map(|item| item.value), Some(7));
//!
//! arena.remove(h);
//! assert!(!arena.contains(h));
//! ```

use arena_ring::RingLinks;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Stable handle to a node in a [`NodeArena`]
    pub struct NodeHandle;
}

impl crate::traits::Handle for NodeHandle {}

/// Sibling links of a node in a circular ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links {
    /// Next sibling in the ring
    pub next: NodeHandle,
    /// Previous sibling in the ring
    pub prev: NodeHandle,
}

impl Links {
    /// Links of a node that forms a ring of one
    #[inline]
    pub fn singleton(h: NodeHandle) -> Self {
        Links { next: h, prev: h }
    }
}

/// A node type that carries ring [`Links`]
pub trait RingNode {
    /// The node's sibling links
    fn links(&self) -> &Links;

    /// Mutable access to the node's sibling links
    fn links_mut(&mut self) -> &mut Links;
}

/// SlotMap-based arena of nodes
///
/// # Characteristics
/// - Contiguous memory allocation (better cache locality)
/// - Generational keys detect stale references
/// - Explicit removal (no automatic cleanup of unreachable nodes)
///
/// Indexing with `arena[h]` panics on a stale handle; it is meant for handles
/// the owning structure knows to be live. Use [`NodeArena::get`] for handles
/// that come from outside.
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeHandle, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Inserts a node built from its own handle, returning that handle
    ///
    /// Building from the handle lets a node start out as its own singleton
    /// ring.
    pub fn insert_with<F>(&mut self, f: F) -> NodeHandle
    where
        F: FnOnce(NodeHandle) -> N,
    {
        self.nodes.insert_with_key(f)
    }

    /// Removes a node, returning it if the handle was live
    pub fn remove(&mut self, h: NodeHandle) -> Option<N> {
        self.nodes.remove(h)
    }

    /// Gets a node if the handle is live
    pub fn get(&self, h: NodeHandle) -> Option<&N> {
        self.nodes.get(h)
    }

    /// Gets a node mutably if the handle is live
    pub fn get_mut(&mut self, h: NodeHandle) -> Option<&mut N> {
        self.nodes.get_mut(h)
    }

    /// Checks whether the handle refers to a live node
    pub fn contains(&self, h: NodeHandle) -> bool {
        self.nodes.contains_key(h)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is live
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every node
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Removes and yields every node with its (now stale) handle
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeHandle, N)> + '_ {
        self.nodes.drain()
    }
}

impl<N> Index<NodeHandle> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, h: NodeHandle) -> &N {
        &self.nodes[h]
    }
}

impl<N> IndexMut<NodeHandle> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, h: NodeHandle) -> &mut N {
        &mut self.nodes[h]
    }
}

impl<N: RingNode> RingLinks for NodeArena<N> {
    type Handle = NodeHandle;

    #[inline]
    fn next(&self, h: NodeHandle) -> NodeHandle {
        self.nodes[h].links().next
    }

    #[inline]
    fn prev(&self, h: NodeHandle) -> NodeHandle {
        self.nodes[h].links().prev
    }

    #[inline]
    fn set_next(&mut self, h: NodeHandle, next: NodeHandle) {
        self.nodes[h].links_mut().next = next;
    }

    #[inline]
    fn set_prev(&mut self, h: NodeHandle, prev: NodeHandle) {
        self.nodes[h].links_mut().prev = prev;
    }
}
