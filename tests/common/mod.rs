//! Common test utilities with tracing setup.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code
//! }
//! ```
//!
//! Events from the heap are only emitted when the crate is built with the
//! `tracing` feature. Filter them with `RUST_LOG`, e.g.
//! `RUST_LOG=frequency_heap=trace cargo test --features tracing`.

#![allow(dead_code)]

use std::sync::Once;

use frequency_heap::fibonacci::FibonacciHeap;
use frequency_heap::Counter;
use tracing_subscriber::EnvFilter;

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize a console subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Panics with the heap's forest if any structural invariant is broken.
pub fn assert_invariants<K: std::fmt::Debug, V: Counter + std::fmt::Debug>(
    heap: &FibonacciHeap<K, V>,
) {
    if let Err(msg) = heap.check_invariants() {
        panic!("invariant violated: {msg}\n{heap:?}");
    }
}
