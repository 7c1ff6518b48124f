//! Fibonacci Heap implementation (max-ordered)
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and increase_key
//! - O(log n) amortized extract_max
//! - O(1) root ring splice on merge, after moving the smaller heap's nodes
//!   into the larger heap's arena
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked ring and the heap keeps a handle to the root with
//! the largest counter. Nodes live in a [`NodeArena`] and refer to each other by
//! [`NodeHandle`], so parent, child and sibling links are plain handles.
//!
//! Each node carries a key (an opaque identifier used for reporting) and a
//! counter value. Counters only ever grow through the public API.
//!
//! # Tie-breaking
//!
//! Equal counters are broken deterministically:
//! - `insert`, cuts and `merge` prefer the node being added over the current max
//! - consolidation keeps the root that was already in the degree table on top
//! - the post-consolidation scan keeps the first maximum met walking the ring
//!
//! # Handles and top-k reports
//!
//! [`FibonacciHeap::report_top_k`] has to extract the reported elements and
//! insert them again, which gives them new handles. The old handles become
//! stale and every operation rejects them with [`HeapError::InvalidHandle`].
//! The returned [`TopK`] carries the new handle of every reported key.

use crate::storage::{Links, NodeArena, NodeHandle, RingNode};
use crate::tracing_helpers::{debug_log, trace_log};
use crate::traits::{Counter, Heap, HeapError, IncreaseKeyHeap};
use arena_ring::{RingLinks, RingOps};
use slotmap::SecondaryMap;
use smallvec::SmallVec;
use std::fmt;

const RING: RingOps = RingOps::new();

/// Handle/key pairs for nodes that were re-created under a new handle
///
/// Produced by [`FibonacciHeap::merge`] and [`FibonacciHeap::append`]. An
/// external index applies these to stay in sync with the heap.
pub type Remap<K> = Vec<(K, NodeHandle)>;

struct Node<K, V> {
    key: K,
    value: V,
    links: Links,
    parent: Option<NodeHandle>,
    child: Option<NodeHandle>,
    degree: usize,
    marked: bool,
}

impl<K, V> Node<K, V> {
    fn new(handle: NodeHandle, key: K, value: V) -> Self {
        Node {
            key,
            value,
            links: Links::singleton(handle),
            parent: None,
            child: None,
            degree: 0,
            marked: false,
        }
    }
}

impl<K, V> RingNode for Node<K, V> {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// Result of [`FibonacciHeap::report_top_k`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopK<K, V> {
    /// Reported `(key, value)` pairs, largest first
    pub entries: Vec<(K, V)>,
    /// New handle of `entries[i]`, one per entry
    pub handles: Vec<NodeHandle>,
}

impl<K, V> TopK<K, V> {
    /// `(key, new handle)` pairs an external index must apply
    pub fn remap(&self) -> impl Iterator<Item = (&K, NodeHandle)> + '_ {
        self.entries
            .iter()
            .zip(&self.handles)
            .map(|((key, _), &handle)| (key, handle))
    }

    /// Number of reported entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use frequency_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.insert("a", 5);
/// heap.insert("b", 3);
/// heap.increase_key(a, 10).unwrap();
/// assert_eq!(heap.peek_max(), Ok((&"a", &15)));
///
/// let top = heap.report_top_k(2).unwrap();
/// assert_eq!(top.entries, vec![("a", 15), ("b", 3)]);
/// assert_eq!(heap.len(), 2);
/// ```
pub struct FibonacciHeap<K, V> {
    nodes: NodeArena<Node<K, V>>,
    max: Option<NodeHandle>,
    len: usize,
}

impl<K, V> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::new(),
            max: None,
            len: 0,
        }
    }
}

impl<K, V: Counter> Heap<K, V> for FibonacciHeap<K, V> {
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.max.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn peek(&self) -> Option<(&K, &V)> {
        self.peek_max().ok()
    }

    fn pop(&mut self) -> Option<(K, V)> {
        self.extract_max().ok()
    }
}

impl<K, V: Counter> IncreaseKeyHeap<K, V> for FibonacciHeap<K, V> {
    type Handle = NodeHandle;

    fn push_with_handle(&mut self, key: K, value: V) -> NodeHandle {
        self.insert(key, value)
    }

    fn increase_key(&mut self, handle: NodeHandle, delta: V) -> Result<(), HeapError> {
        FibonacciHeap::increase_key(self, handle, delta)
    }
}

impl<K, V> FibonacciHeap<K, V> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            max: None,
            len: 0,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.max.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes every element. All handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.max = None;
        self.len = 0;
    }

    /// Handle of the current maximum, if any
    pub fn max_handle(&self) -> Option<NodeHandle> {
        self.max
    }

    /// Checks whether the handle refers to an element of this heap
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains(handle)
    }

    /// Key and value of the element behind `handle`
    pub fn get(&self, handle: NodeHandle) -> Option<(&K, &V)> {
        self.nodes.get(handle).map(|node| (&node.key, &node.value))
    }

    /// Key of the element behind `handle`
    pub fn key(&self, handle: NodeHandle) -> Option<&K> {
        self.nodes.get(handle).map(|node| &node.key)
    }

    /// Returns the key and value of the maximum without removing it
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap is empty.
    pub fn peek_max(&self) -> Result<(&K, &V), HeapError> {
        let max = self.max.ok_or(HeapError::EmptyHeap)?;
        let node = &self.nodes[max];
        Ok((&node.key, &node.value))
    }
}

impl<K, V: Counter> FibonacciHeap<K, V> {
    /// Counter value of the element behind `handle`
    pub fn value(&self, handle: NodeHandle) -> Option<V> {
        self.nodes.get(handle).map(|node| node.value)
    }

    /// Inserts a key with an initial counter value, returning its handle
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K, value: V) -> NodeHandle {
        let handle = self.nodes.insert_with(|h| Node::new(h, key, value));
        self.max = self.splice(self.max, Some(handle));
        self.len += 1;
        handle
    }

    /// Removes and returns the key and value of the maximum
    ///
    /// The children of the removed root join the root ring, then roots of
    /// equal degree are linked until every degree occurs at most once.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_max(&mut self) -> Result<(K, V), HeapError> {
        let max = self.max.ok_or(HeapError::EmptyHeap)?;

        let rest = RING.remove(&mut self.nodes, max);

        let children = self.nodes[max].child.take();
        if let Some(first) = children {
            let mut current = first;
            loop {
                self.nodes[current].parent = None;
                current = self.nodes.next(current);
                if current == first {
                    break;
                }
            }
        }

        match RING.splice(&mut self.nodes, rest, children) {
            Some(start) => self.consolidate(start),
            None => self.max = None,
        }

        self.len -= 1;
        let node = self.nodes.remove(max).ok_or(HeapError::InvalidHandle)?;
        Ok((node.key, node.value))
    }

    /// Adds `delta` to the counter behind `handle`
    ///
    /// If the node now ties or beats its parent it is cut to the root ring,
    /// followed by cascading cuts through marked ancestors.
    ///
    /// # Errors
    /// - `HeapError::InvalidArgument` if `delta` is negative or the sum
    ///   overflows `V`; the counter is left unchanged
    /// - `HeapError::InvalidHandle` if the handle is stale
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn increase_key(&mut self, handle: NodeHandle, delta: V) -> Result<(), HeapError> {
        if delta < V::default() {
            return Err(HeapError::InvalidArgument);
        }

        let node = self
            .nodes
            .get_mut(handle)
            .ok_or(HeapError::InvalidHandle)?;
        let value = node
            .value
            .checked_add(delta)
            .ok_or(HeapError::InvalidArgument)?;
        node.value = value;

        if let Some(parent) = node.parent {
            if value >= self.nodes[parent].value {
                self.cut(handle);
            }
        }

        if let Some(max) = self.max {
            if value >= self.nodes[max].value {
                self.max = Some(handle);
            }
        }

        Ok(())
    }

    /// Merges two heaps into a new one, leaving both inputs empty
    ///
    /// The nodes of the smaller input are moved into the larger input's arena
    /// and get new handles, reported in the returned [`Remap`]. Handles of the
    /// larger input stay valid. On equal sizes `b` is the one that moves.
    ///
    /// # Time Complexity
    /// O(min(|a|, |b|)) to relocate nodes, then an O(1) root ring splice
    pub fn merge(a: &mut Self, b: &mut Self) -> (Self, Remap<K>)
    where
        K: Clone,
    {
        let mut into = std::mem::take(a);
        let mut from = std::mem::take(b);
        if from.len > into.len {
            std::mem::swap(&mut into, &mut from);
        }
        let remap = into.append(&mut from);
        (into, remap)
    }

    /// Moves every element of `other` into this heap, leaving `other` empty
    ///
    /// Moved elements get new handles, reported in the returned [`Remap`].
    /// Tree shapes, degrees and marks are preserved, so no consolidation
    /// happens here.
    pub fn append(&mut self, other: &mut Self) -> Remap<K>
    where
        K: Clone,
    {
        let mut moved: SecondaryMap<NodeHandle, NodeHandle> =
            SecondaryMap::with_capacity(other.nodes.len());
        let mut staged = Vec::with_capacity(other.nodes.len());

        for (old, node) in other.nodes.drain() {
            let Node {
                key,
                value,
                links,
                parent,
                child,
                degree,
                marked,
            } = node;
            let new = self.nodes.insert_with(|h| Node {
                degree,
                marked,
                ..Node::new(h, key, value)
            });
            moved.insert(old, new);
            staged.push((new, links, parent, child));
        }

        let mut remap = Vec::with_capacity(staged.len());
        for (new, links, parent, child) in staged {
            let node = &mut self.nodes[new];
            node.links = Links {
                next: moved[links.next],
                prev: moved[links.prev],
            };
            node.parent = parent.map(|p| moved[p]);
            node.child = child.map(|c| moved[c]);
            remap.push((node.key.clone(), new));
        }

        let other_max = other.max.take().map(|m| moved[m]);
        self.max = self.splice(self.max, other_max);
        self.len += std::mem::take(&mut other.len);

        debug_log!(moved = remap.len(), len = self.len, "appended heap");
        remap
    }

    /// Reports the `n` largest elements, largest first
    ///
    /// The elements are extracted and then inserted again, so the heap keeps
    /// all of its elements but every reported key gets a new handle. The new
    /// handles are in [`TopK::handles`]; the old ones are stale.
    ///
    /// `n == 0` reports nothing and leaves the heap untouched.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap runs out before `n` elements were
    /// extracted. Nothing is reinserted in that case: the elements extracted
    /// by the failed call are gone.
    ///
    /// # Time Complexity
    /// O(n log n) amortized
    pub fn report_top_k(&mut self, n: usize) -> Result<TopK<K, V>, HeapError>
    where
        K: Clone,
    {
        let mut entries = Vec::with_capacity(n.min(self.len));
        for _ in 0..n {
            entries.push(self.extract_max()?);
        }

        let handles = entries
            .iter()
            .map(|(key, value)| self.insert(key.clone(), *value))
            .collect();

        debug_log!(n, len = self.len, "reported top elements");
        Ok(TopK { entries, handles })
    }

    /// Splices two rings and returns whichever entry point holds the larger
    /// counter (`b` on ties).
    fn splice(&mut self, a: Option<NodeHandle>, b: Option<NodeHandle>) -> Option<NodeHandle> {
        let entry = RING.splice(&mut self.nodes, a, b);
        match (a, b) {
            (Some(a), Some(b)) if self.nodes[a].value > self.nodes[b].value => Some(a),
            (Some(_), Some(b)) => Some(b),
            _ => entry,
        }
    }

    /// Links roots of equal degree until all root degrees are distinct, then
    /// recomputes the max
    fn consolidate(&mut self, start: NodeHandle) {
        // The ring changes while linking, so walk a snapshot of it
        let roots = RING.collect(&self.nodes, start);
        let mut table: SmallVec<[Option<NodeHandle>; 32]> = SmallVec::new();
        let mut last = start;

        for root in roots.iter().copied() {
            let mut current = root;
            loop {
                let degree = self.nodes[current].degree;
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                match table[degree].take() {
                    None => {
                        table[degree] = Some(current);
                        break;
                    }
                    Some(other) => {
                        let (hi, lo) = if self.nodes[other].value < self.nodes[current].value {
                            (current, other)
                        } else {
                            (other, current)
                        };
                        self.link(lo, hi);
                        current = hi;
                    }
                }
            }
            last = current;
        }

        debug_log!(
            before = roots.len(),
            after = table.iter().flatten().count(),
            "consolidated root ring"
        );

        self.max = Some(self.scan_max(last));
    }

    /// Makes root `lo` a child of root `hi`
    fn link(&mut self, lo: NodeHandle, hi: NodeHandle) {
        RING.remove(&mut self.nodes, lo);

        let child = self.nodes[hi].child;
        match child {
            Some(child) => RING.insert_after(&mut self.nodes, child, lo),
            None => self.nodes[hi].child = Some(lo),
        }
        self.nodes[hi].degree += 1;

        let node = &mut self.nodes[lo];
        node.parent = Some(hi);
        node.marked = false;
    }

    /// Root with the largest counter; the first one met wins ties
    fn scan_max(&self, start: NodeHandle) -> NodeHandle {
        RING.iter(&self.nodes, start).fold(start, |best, h| {
            if self.nodes[h].value > self.nodes[best].value {
                h
            } else {
                best
            }
        })
    }

    /// Cuts `node` from its parent onto the root ring, continuing up through
    /// marked ancestors
    fn cut(&mut self, node: NodeHandle) {
        let mut current = node;
        loop {
            self.nodes[current].marked = false;
            let Some(parent) = self.nodes[current].parent.take() else {
                return;
            };

            let survivor = RING.remove(&mut self.nodes, current);
            let p = &mut self.nodes[parent];
            if p.child == Some(current) {
                p.child = survivor;
            }
            p.degree -= 1;

            self.max = self.splice(self.max, Some(current));
            trace_log!(degree = self.nodes[parent].degree, "cut node to root ring");

            if self.nodes[parent].marked {
                current = parent;
            } else {
                self.nodes[parent].marked = true;
                return;
            }
        }
    }

    /// Verifies the structural invariants of the heap
    ///
    /// Checks that every ring is doubly consistent, that degrees match child
    /// ring sizes, that parents never hold smaller counters than their
    /// children, that `max` is a root holding the largest root counter, and
    /// that the element count matches. Intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(max) = self.max else {
            if self.len != 0 || !self.nodes.is_empty() {
                return Err(format!("no max but len is {}", self.len));
            }
            return Ok(());
        };

        if !self.nodes.contains(max) {
            return Err("max handle is stale".to_string());
        }
        if self.nodes[max].parent.is_some() {
            return Err("max is not a root".to_string());
        }

        let limit = self.nodes.len();
        let mut seen = 0;
        let mut stack = vec![(max, None::<NodeHandle>)];

        while let Some((start, parent)) = stack.pop() {
            let mut members = 0;
            for h in RING.iter(&self.nodes, start).take(limit + 1) {
                seen += 1;
                members += 1;
                if seen > limit {
                    return Err("ring walk visits more nodes than the arena holds".to_string());
                }

                let node = &self.nodes[h];
                if self.nodes.prev(node.links.next) != h || self.nodes.next(node.links.prev) != h {
                    return Err("ring links are not doubly consistent".to_string());
                }
                if node.parent != parent {
                    return Err("node's parent link does not match its ring".to_string());
                }
                match parent {
                    Some(p) if self.nodes[p].value < node.value => {
                        return Err("child counter exceeds parent counter".to_string());
                    }
                    None if node.value > self.nodes[max].value => {
                        return Err("a root counter exceeds the max".to_string());
                    }
                    _ => {}
                }

                match node.child {
                    Some(child) => stack.push((child, Some(h))),
                    None if node.degree != 0 => {
                        return Err(format!("degree is {} but node has no child", node.degree));
                    }
                    None => {}
                }
            }

            if let Some(p) = parent {
                if members != self.nodes[p].degree {
                    return Err(format!(
                        "degree is {} but child ring holds {}",
                        self.nodes[p].degree, members
                    ));
                }
            }
        }

        if seen != self.len || self.len != self.nodes.len() {
            return Err(format!(
                "len is {} but {} nodes are reachable and {} are stored",
                self.len,
                seen,
                self.nodes.len()
            ));
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> FibonacciHeap<K, V> {
    fn fmt_ring(&self, f: &mut fmt::Formatter<'_>, start: NodeHandle) -> fmt::Result {
        for (i, h) in RING.iter(&self.nodes, start).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let node = &self.nodes[h];
            write!(f, "{:?}:{:?}", node.key, node.value)?;
            if let Some(child) = node.child {
                write!(f, " [")?;
                self.fmt_ring(f, child)?;
                write!(f, "]")?;
            }
        }
        Ok(())
    }
}

/// Renders the forest starting at the max root, children in brackets:
/// `FibonacciHeap { len: 3, roots: ["c":10, "a":5 ["b":3]] }`
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FibonacciHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FibonacciHeap {{ len: {}, roots: [", self.len)?;
        if let Some(max) = self.max {
            self.fmt_ring(f, max)?;
        }
        write!(f, "] }}")
    }
}
