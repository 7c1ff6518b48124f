//! Common traits for max-heap data structures
//!
//! This module provides a two-tier trait hierarchy for counter heaps:
//!
//! - [`Heap`]: Base trait for simple max-heaps without `increase_key` support
//! - [`IncreaseKeyHeap`]: Extended trait adding `increase_key` and handle-based operations
//!
//! Unlike `BinaryHeap`, these heaps store (key, value) pairs: the value is the
//! counter that orders the heap and the key is an opaque identifier that is
//! carried along for reporting.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds fewer elements than the operation needs
    EmptyHeap,
    /// An argument was out of range (a negative increment, or one that
    /// overflows the counter)
    InvalidArgument,
    /// The handle is no longer valid (element was extracted or replaced)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidArgument => {
                write!(f, "invalid argument (increments must be non-negative and fit the counter)")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was extracted or replaced)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for increase_key operations
///
/// This is an opaque type that identifies a specific node in the heap.
pub trait Handle: Copy + PartialEq + Eq + fmt::Debug {}

/// Base trait for max-heap data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the maximum
/// - `peek` returns the maximum without removing it
///
/// # Example
///
/// ```rust
/// use frequency_heap::Heap;
/// use frequency_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push("three", 3);
/// heap.push("one", 1);
/// heap.push("two", 2);
///
/// assert_eq!(heap.peek(), Some((&"three", &3)));
/// assert_eq!(heap.pop(), Some(("three", 3)));
/// ```
pub trait Heap<K, V: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key with the given counter value
    fn push(&mut self, key: K, value: V);

    /// Returns the key and value of the maximum without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&K, &V)>;

    /// Removes and returns the key and value of the maximum
    fn pop(&mut self) -> Option<(K, V)>;
}

/// Extended heap trait with `increase_key` support
///
/// - `push_with_handle` returns a handle that can be used with `increase_key`
/// - `increase_key` adds a non-negative amount to an element's counter
///
/// # Example
///
/// ```rust
/// use frequency_heap::{Heap, IncreaseKeyHeap};
/// use frequency_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push("a", 10);
/// let handle = heap.push_with_handle("b", 4);
/// heap.increase_key(handle, 7).unwrap();
/// assert_eq!(heap.peek(), Some((&"b", &11)));
/// ```
pub trait IncreaseKeyHeap<K, V: Ord>: Heap<K, V> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element, returning a handle to its node
    ///
    /// # Time Complexity
    /// O(1)
    fn push_with_handle(&mut self, key: K, value: V) -> Self::Handle;

    /// Adds `delta` to the counter of the element identified by the handle
    ///
    /// # Errors
    /// - `HeapError::InvalidArgument` if `delta` is negative
    /// - `HeapError::InvalidHandle` if the handle no longer refers to a node
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn increase_key(&mut self, handle: Self::Handle, delta: V) -> Result<(), HeapError>;
}

/// Counter values a heap can order and increment
///
/// `V::default()` is the zero increment; a delta that compares below it is
/// negative and rejected by `increase_key`. Implemented for all primitive
/// integers.
pub trait Counter: Ord + Copy + Default {
    /// `self + rhs`, or `None` if the sum does not fit
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_counter {
    ($($t:ty),* $(,)?) => {
        $(
            impl Counter for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_counter!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
