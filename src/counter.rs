//! Frequency counter built on the Fibonacci heap
//!
//! [`FrequencyCounter`] owns a heap together with its [`KeyIndex`] and keeps the
//! two consistent: recording an occurrence either bumps the key's node or
//! inserts a new one, and top-k reports rebind the index to the re-created
//! nodes before returning.
//!
//! Reading commands and writing reports are left to the caller;
//! [`format_report`] only builds the comma-separated line for a report.
//!
//! # Example
//!
//! ```rust
//! use frequency_heap::counter::{format_report, FrequencyCounter};
//!
//! let mut counter = FrequencyCounter::new();
//! counter.record("rust", 3).unwrap();
//! counter.record("heap", 5).unwrap();
//! counter.record("rust", 4).unwrap();
//!
//! let top = counter.top(2).unwrap();
//! assert_eq!(format_report(&top), "rust,heap");
//! assert_eq!(counter.count("rust"), Some(7));
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::index::KeyIndex;
use crate::traits::{Counter, HeapError};
use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;

/// Counts occurrences per key and reports the most frequent ones
#[derive(Debug)]
pub struct FrequencyCounter<K, V> {
    heap: FibonacciHeap<K, V>,
    index: KeyIndex<K>,
}

impl<K, V> Default for FrequencyCounter<K, V> {
    fn default() -> Self {
        FrequencyCounter {
            heap: FibonacciHeap::default(),
            index: KeyIndex::default(),
        }
    }
}

impl<K, V> FrequencyCounter<K, V>
where
    K: Hash + Eq + Clone,
    V: Counter,
{
    /// Creates an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `key`
    ///
    /// A key seen for the first time starts at `count`.
    ///
    /// # Errors
    /// `HeapError::InvalidArgument` if `count` is negative or would overflow
    /// the key's total; nothing is recorded in that case.
    pub fn record(&mut self, key: K, count: V) -> Result<(), HeapError> {
        if count < V::default() {
            return Err(HeapError::InvalidArgument);
        }
        match self.index.lookup(&key) {
            Some(handle) => self.heap.increase_key(handle, count),
            None => {
                let handle = self.heap.insert(key.clone(), count);
                self.index.insert_or_update(key, handle);
                Ok(())
            }
        }
    }

    /// The `n` most frequent keys with their counts, most frequent first
    ///
    /// Counts are unchanged by the call.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if fewer than `n` keys are known. The keys
    /// extracted before running out are dropped from the counter.
    pub fn top(&mut self, n: usize) -> Result<Vec<(K, V)>, HeapError> {
        match self.heap.report_top_k(n) {
            Ok(top) => {
                self.index.apply_top_k(&top);
                Ok(top.entries)
            }
            Err(err) => {
                self.prune_index();
                Err(err)
            }
        }
    }

    /// Current count of `key`
    pub fn count<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .lookup(key)
            .and_then(|handle| self.heap.value(handle))
    }

    /// The most frequent key and its count
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.heap.peek_max().ok()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no key has been recorded
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The underlying heap
    pub fn heap(&self) -> &FibonacciHeap<K, V> {
        &self.heap
    }

    /// Drops index entries whose nodes no longer exist
    fn prune_index(&mut self) {
        let heap = &self.heap;
        self.index.retain(|_, handle| heap.contains(handle));
    }
}

/// Joins the reported keys with commas, e.g. `"a,b,c"`
pub fn format_report<K: Display, V>(entries: &[(K, V)]) -> String {
    entries
        .iter()
        .map(|(key, _)| key.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_inserts_then_increments() {
        let mut counter = FrequencyCounter::new();
        counter.record("a", 5).unwrap();
        counter.record("b", 3).unwrap();
        counter.record("a", 2).unwrap();

        assert_eq!(counter.len(), 2);
        assert_eq!(counter.count("a"), Some(7));
        assert_eq!(counter.count("b"), Some(3));
        assert_eq!(counter.count("c"), None);
        assert_eq!(counter.peek(), Some((&"a", &7)));
    }

    #[test]
    fn test_record_rejects_negative_count() {
        let mut counter = FrequencyCounter::new();
        assert_eq!(counter.record("a", -1), Err(HeapError::InvalidArgument));
        assert!(counter.is_empty());
    }

    #[test]
    fn test_record_rejects_overflowing_total() {
        let mut counter = FrequencyCounter::new();
        counter.record("a", u8::MAX - 2).unwrap();
        counter.record("b", 1u8).unwrap();

        assert_eq!(counter.record("a", 3), Err(HeapError::InvalidArgument));
        assert_eq!(counter.count("a"), Some(u8::MAX - 2));

        counter.record("a", 2).unwrap();
        assert_eq!(counter.top(2).unwrap(), vec![("a", u8::MAX), ("b", 1)]);
    }

    #[test]
    fn test_top_keeps_counting() {
        let mut counter = FrequencyCounter::new();
        for (key, count) in [("a", 5), ("b", 3), ("c", 10), ("d", 1)] {
            counter.record(key, count).unwrap();
        }

        assert_eq!(counter.top(2).unwrap(), vec![("c", 10), ("a", 5)]);

        // Reported keys were re-created; the index must follow
        counter.record("a", 6).unwrap();
        counter.record("d", 20).unwrap();
        assert_eq!(counter.top(3).unwrap(), vec![("d", 21), ("a", 11), ("c", 10)]);
        assert_eq!(counter.len(), 4);
        counter.heap().check_invariants().unwrap();
    }

    #[test]
    fn test_top_past_end_drops_extracted() {
        let mut counter = FrequencyCounter::new();
        counter.record("a", 1).unwrap();
        counter.record("b", 2).unwrap();

        assert_eq!(counter.top(3), Err(HeapError::EmptyHeap));
        assert!(counter.is_empty());
        assert_eq!(counter.count("a"), None);

        // Dropped keys start over
        counter.record("a", 4).unwrap();
        assert_eq!(counter.count("a"), Some(4));
    }

    #[test]
    fn test_format_report() {
        assert_eq!(format_report(&[("x", 1), ("y", 2)]), "x,y");
        assert_eq!(format_report::<&str, i32>(&[]), "");
    }
}
