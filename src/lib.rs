//! Frequency counting on a max Fibonacci heap
//!
//! This crate provides a max-ordered Fibonacci heap specialised for dynamic
//! frequency counters: every element is a key with a counter that can only
//! grow, and the heap answers repeated "top k" queries without losing any
//! element.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, increase_key, and root merge;
//!   O(log n) amortized extract_max
//! - **Top-k reports**: extract the k largest, then reinsert them, returning
//!   the new node handles so an index can follow
//! - **Arena storage**: nodes addressed by generational handles; stale handles
//!   are detected instead of dangling
//! - **Frequency counter**: heap plus key index kept consistent for you
//!
//! # Example
//!
//! ```rust
//! use frequency_heap::fibonacci::FibonacciHeap;
//! use frequency_heap::index::KeyIndex;
//!
//! let mut heap = FibonacciHeap::new();
//! let mut index = KeyIndex::new();
//!
//! for (key, count) in [("a", 5), ("b", 3), ("c", 10)] {
//!     index.insert_or_update(key, heap.insert(key, count));
//! }
//! heap.increase_key(index.lookup("b").unwrap(), 20).unwrap();
//!
//! let top = heap.report_top_k(2).unwrap();
//! assert_eq!(top.entries, vec![("b", 23), ("c", 10)]);
//! index.apply_top_k(&top);
//! assert_eq!(heap.len(), 3);
//! ```

pub mod counter;
pub mod fibonacci;
pub mod index;
pub mod storage;
pub mod traits;

mod tracing_helpers;

// Re-export the main traits for convenience
pub use traits::{Counter, Heap, HeapError, IncreaseKeyHeap};
