//! Logging macros for heap events
//!
//! With the `tracing` feature the macros forward to the `tracing` crate;
//! without it they expand to nothing and their arguments are not evaluated.
//!
//! Events emitted by the heap:
//!
//! | Level | Event | Fields |
//! |-------|-------|--------|
//! | debug | `consolidated root ring` | `before`, `after` root counts |
//! | trace | `cut node to root ring` | `degree` of the former parent |
//! | debug | `reported top elements` | `n`, `len` |
//! | debug | `appended heap` (merge and append) | `moved`, `len` |
//!
//! ```bash
//! RUST_LOG=frequency_heap=trace cargo test --features tracing
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level logging (most verbose). Compiles to no-op without `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level logging. Compiles to no-op without `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

// Export macros for use within crate
pub(crate) use debug_log;
pub(crate) use trace_log;
