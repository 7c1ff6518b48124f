//! Stress tests that push the heap through long operation sequences
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases in consolidation and cascading cuts.

mod common;

use common::assert_invariants;
use frequency_heap::counter::FrequencyCounter;
use frequency_heap::fibonacci::FibonacciHeap;
use frequency_heap::storage::NodeHandle;

/// Test massive numbers of inserts and extractions
#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();

    for i in 0..1000 {
        heap.insert(i, i);
    }
    assert_eq!(heap.len(), 1000);

    for i in (0..1000).rev() {
        assert_eq!(heap.extract_max(), Ok((i, i)));
    }
    assert!(heap.is_empty());
    assert_invariants(&heap);
}

/// Test many increase_key operations on a consolidated heap
#[test]
fn test_many_increase_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<NodeHandle> = (0..500).map(|i| heap.insert(i, i)).collect();

    // Force consolidation so most nodes sit deep inside trees
    heap.insert(-1, 1_000_000);
    heap.extract_max().unwrap();
    assert_invariants(&heap);

    // Reverse the order: the smallest counter ends up the largest
    for (i, &h) in handles.iter().enumerate() {
        heap.increase_key(h, 1000 - 2 * i as i64).unwrap();
    }
    assert_invariants(&heap);

    for i in 0..500 {
        assert_eq!(heap.extract_max(), Ok((i, 1000 - i)));
    }
}

/// Test alternating insert, increase and extraction
#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();
    let mut live: Vec<NodeHandle> = Vec::new();

    for i in 0..300u64 {
        live.push(heap.insert(i, i * 3 % 97));
        live.push(heap.insert(i + 1000, i * 7 % 89));

        if i % 3 == 0 {
            let (_, max) = heap.extract_max().unwrap();
            assert!(heap.peek_max().map(|(_, v)| *v <= max).unwrap_or(true));
        }

        live.retain(|&h| heap.contains(h));
        let target = live[(i as usize * 31) % live.len()];
        heap.increase_key(target, i % 11).unwrap();

        if i % 25 == 0 {
            assert_invariants(&heap);
        }
    }

    let mut last = u64::MAX;
    while let Ok((_, value)) = heap.extract_max() {
        assert!(value <= last);
        last = value;
    }
}

/// Test that repeated reports keep the heap whole
#[test]
fn test_repeated_reports() {
    let mut heap = FibonacciHeap::new();
    let mut handles: Vec<NodeHandle> = (0..200).map(|i| heap.insert(i, (i * 37) % 101)).collect();

    for round in 0..50 {
        let top = heap.report_top_k(10).unwrap();
        assert_eq!(heap.len(), 200);

        let values: Vec<_> = top.entries.iter().map(|(_, v)| *v).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));

        for (key, handle) in top.remap() {
            handles[*key as usize] = handle;
        }
        let bumped = handles[(round * 13) % 200];
        heap.increase_key(bumped, round as i32).unwrap();
        assert_invariants(&heap);
    }
}

/// Test merging large heaps
#[test]
fn test_large_merge() {
    let mut heap1 = FibonacciHeap::new();
    let mut heap2 = FibonacciHeap::new();

    for i in 0..500 {
        heap1.insert(i, i * 2);
        heap2.insert(i + 1000, i * 2 + 1);
    }
    heap1.extract_max().unwrap();
    heap2.extract_max().unwrap();

    let (mut merged, remap) = FibonacciHeap::merge(&mut heap1, &mut heap2);
    assert_eq!(merged.len(), 998);
    assert_eq!(remap.len(), 499);
    assert_invariants(&merged);

    let mut last = i32::MAX;
    while let Ok((_, value)) = merged.extract_max() {
        assert!(value <= last);
        last = value;
    }
}

/// Test a long hashtag-style stream through the counter
#[test]
fn test_counter_stream() {
    let mut counter = FrequencyCounter::new();
    let tags: Vec<String> = (0..64).map(|i| format!("tag{i}")).collect();
    let mut totals = vec![0u64; tags.len()];

    for step in 0..5000usize {
        let tag = (step * 17 + step / 7) % tags.len();
        let count = (step % 9) as u64 + 1;
        counter.record(tags[tag].clone(), count).unwrap();
        totals[tag] += count;

        if step % 500 == 499 {
            let top = counter.top(5).unwrap();
            let mut expected = totals.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            let reported: Vec<u64> = top.iter().map(|(_, v)| *v).collect();
            assert_eq!(reported, expected[..5].to_vec());
        }
    }

    // Tags the stream never picked were never recorded
    for (tag, total) in tags.iter().zip(&totals) {
        assert_eq!(counter.count(tag.as_str()), (*total > 0).then_some(*total));
    }
    assert_eq!(counter.len(), totals.iter().filter(|&&t| t > 0).count());
    assert_invariants(counter.heap());
}
