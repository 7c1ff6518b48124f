//! Circular doubly-linked rings over handle-addressed storage.
//!
//! This crate provides the ring primitives used by Fibonacci-style heaps where
//! nodes live in an arena and refer to each other by small copyable handles
//! rather than by pointer.
//!
//! # Circular vs Linear Lists
//!
//! In a circular ring:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any member can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! Storage only needs to expose the `next`/`prev` fields of each node through
//! [`RingLinks`]; every operation here is a handful of field reads and writes.
//!
//! # Example
//!
//! ```rust
//! use arena_ring::{RingLinks, RingOps};
//!
//! struct Links(Vec<(usize, usize)>);
//!
//! impl RingLinks for Links {
//!     type Handle = usize;
//!     fn next(&self, h: usize) -> usize { self.0[h].0 }
//!     fn prev(&self, h: usize) -> usize { self.0[h].1 }
//!     fn set_next(&mut self, h: usize, next: usize) { self.0[h].0 = next; }
//!     fn set_prev(&mut self, h: usize, prev: usize) { self.0[h].1 = prev; }
//! }
//!
//! let mut links = Links(vec![(0, 0), (1, 1)]);
//! let ops = RingOps::new();
//!
//! ops.make_circular(&mut links, 0);
//! ops.make_circular(&mut links, 1);
//! ops.splice(&mut links, Some(0), Some(1));
//!
//! assert_eq!(links.next(0), 1);
//! assert_eq!(links.next(1), 0);
//! ```

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::marker::PhantomData;

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the sibling links of nodes stored behind handles.
///
/// Every handle passed to the ring operations must refer to a live node.
/// Implementations are free to panic on a dangling handle; the ring code never
/// produces one on its own.
pub trait RingLinks {
    /// Handle type addressing a node.
    type Handle: Copy + Eq;

    /// Gets the next handle in the node's ring.
    fn next(&self, h: Self::Handle) -> Self::Handle;

    /// Gets the previous handle in the node's ring.
    fn prev(&self, h: Self::Handle) -> Self::Handle;

    /// Sets the next handle.
    fn set_next(&mut self, h: Self::Handle, next: Self::Handle);

    /// Sets the previous handle.
    fn set_prev(&mut self, h: Self::Handle, prev: Self::Handle);
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked rings.
///
/// All operations except [`RingOps::count`], [`RingOps::collect`] and
/// iteration are O(1).
#[derive(Clone, Copy, Default, Debug)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Makes a single node into a ring of one element.
    ///
    /// After this, `h.next == h` and `h.prev == h`. Any previous links of `h`
    /// are overwritten without touching former neighbours.
    #[inline]
    pub fn make_circular<S: RingLinks>(&self, links: &mut S, h: S::Handle) {
        links.set_next(h, h);
        links.set_prev(h, h);
    }

    /// Checks whether `h` is the only member of its ring.
    #[inline]
    pub fn is_singleton<S: RingLinks>(&self, links: &S, h: S::Handle) -> bool {
        links.next(h) == h
    }

    /// Inserts the singleton `new` after `at` in `at`'s ring.
    #[inline]
    pub fn insert_after<S: RingLinks>(&self, links: &mut S, at: S::Handle, new: S::Handle) {
        debug_assert!(self.is_singleton(links, new), "new is already in a ring");

        let next = links.next(at);

        links.set_next(at, new);
        links.set_prev(new, at);
        links.set_next(new, next);
        links.set_prev(next, new);
    }

    /// Removes a node from its ring and leaves it as a singleton.
    ///
    /// Returns a surviving member of the old ring, or `None` if the node was
    /// the only element (the ring is now empty).
    #[inline]
    pub fn remove<S: RingLinks>(&self, links: &mut S, h: S::Handle) -> Option<S::Handle> {
        let next = links.next(h);
        let prev = links.prev(h);

        if next == h {
            return None;
        }

        links.set_next(prev, next);
        links.set_prev(next, prev);
        self.make_circular(links, h);
        Some(next)
    }

    /// Splices two rings together.
    ///
    /// After this operation, both rings are merged into one circular ring.
    /// Returns an entry point into the merged ring (`a` when both are present),
    /// or `None` if both were empty. If either is `None`, returns the other
    /// unchanged.
    ///
    /// The merge is O(1) - it just reconnects the endpoints.
    #[inline]
    pub fn splice<S: RingLinks>(
        &self,
        links: &mut S,
        a: Option<S::Handle>,
        b: Option<S::Handle>,
    ) -> Option<S::Handle> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                // Before:
                //   Ring A: ... <-> a_prev <-> a <-> a_next <-> ...
                //   Ring B: ... <-> b_prev <-> b <-> b_next <-> ...
                //
                // After:
                //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> a_next <-> ...
                let a_prev = links.prev(a);
                let b_prev = links.prev(b);

                links.set_next(a_prev, b);
                links.set_prev(b, a_prev);

                links.set_next(b_prev, a);
                links.set_prev(a, b_prev);

                Some(a)
            }
        }
    }

    /// Collects the members of the ring into a vector, starting at `start`.
    ///
    /// Use this when the ring is going to be mutated while its former members
    /// are visited.
    pub fn collect<S: RingLinks>(&self, links: &S, start: S::Handle) -> Vec<S::Handle> {
        self.iter(links, start).collect()
    }

    /// Iterates the ring once, starting at `start` and following `next`.
    pub fn iter<'a, S: RingLinks>(&self, links: &'a S, start: S::Handle) -> RingIter<'a, S> {
        RingIter {
            links,
            start,
            current: Some(start),
            _ops: PhantomData,
        }
    }
}

/// Iterator over one lap of a ring. See [`RingOps::iter`].
pub struct RingIter<'a, S: RingLinks> {
    links: &'a S,
    start: S::Handle,
    current: Option<S::Handle>,
    _ops: PhantomData<RingOps>,
}

impl<S: RingLinks> Iterator for RingIter<'_, S> {
    type Item = S::Handle;

    fn next(&mut self) -> Option<S::Handle> {
        let current = self.current?;
        let next = self.links.next(current);
        self.current = if next == self.start { None } else { Some(next) };
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================
