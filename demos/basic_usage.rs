//! Basic usage example for safequeue
//!
//! This example walks through the ring queue's sentinel slot, a bounded deque shared by
//! several producers, and composing operations atomically with `run_exclusive`.

use safequeue::metrics::MetricsCollector;
use safequeue::{DequeLike, Error, LinkedDeque, SafeDeque, SafeRingQueue};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("safequeue Usage Example");
    println!("=======================");

    // A ring queue with 5 slots holds 4 values
    println!("\n1. Ring Queue Capacity:");
    let queue = SafeRingQueue::with_ring(5);
    queue.push_all(vec![10, 20, 30, 40])?;
    match queue.push(50) {
        Err(Error::CapacityExceeded) => println!("   Fifth push rejected: queue is full"),
        other => println!("   Unexpected result: {:?}", other),
    }
    let (value, remaining) = queue.pop_and_len();
    println!("   Popped {:?}, {} left", value, remaining);

    // Several producers sharing one bounded deque
    println!("\n2. Shared Bounded Deque:");
    let deque = Arc::new(SafeDeque::<u32>::new(|| {
        Some(Box::new(LinkedDeque::bounded(64)))
    })?);
    let producer_handles: Vec<_> = (0..4u32)
        .map(|producer| {
            let deque = Arc::clone(&deque);
            thread::spawn(move || {
                let mut rejected = 0;
                for i in 0..20 {
                    if deque.push_back(producer * 100 + i).is_err() {
                        rejected += 1;
                    }
                }
                rejected
            })
        })
        .collect();

    let rejected: u32 = producer_handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(0))
        .sum();
    println!(
        "   Stored {} values, {} rejected at capacity",
        deque.len(),
        rejected
    );

    // Pop a batch and read the remaining length under one lock acquisition
    println!("\n3. Atomic Composition:");
    let (batch, left) = deque.run_exclusive(|inner| {
        let batch = inner.pop_front_n(8);
        (batch, inner.len())
    });
    println!("   Took {:?}, {} left", batch, left);

    // Drain the rest with a predicate that stops at the first large value
    let mut drained = Vec::new();
    let popped = deque.pop_front_while(Some(&mut |value: u32| {
        drained.push(value);
        value < 300
    }))?;
    println!("   Drained {} values, last {:?}", popped, drained.last());

    // Metrics
    println!("\n4. Metrics:");
    let metrics = deque.metrics();
    println!("   Operations: {}", metrics.total_operations);
    println!("   Success rate: {:.1}%", metrics.success_rate());
    println!("   Contention rate: {:.1}%", metrics.contention_rate());
    println!("   Peak bytes stored: {}", metrics.peak_memory_usage_bytes);

    println!("\nDone.");
    Ok(())
}
