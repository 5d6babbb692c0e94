//! Loom-based model checking of the ring queue behind a reader/writer lock
//!
//! These tests use the Loom library to explore the interleavings of a few threads sharing one
//! `RingQueue` through the same locking discipline as `SafeRingQueue`: shared lock for
//! queries, exclusive lock for every push and pop. Loom's model keeps thread counts small.

use super::*;
use loom::sync::{Arc, RwLock};
use loom::thread;
use std::vec;
use std::vec::Vec;

#[test]
fn loom_concurrent_push_pop() {
    loom::model(|| {
        let queue = Arc::new(RwLock::new(RingQueue::new(3)));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                queue.write().unwrap().push(1).unwrap();
                queue.write().unwrap().push(2).unwrap();
            })
        };

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut popped = Vec::new();
                for _ in 0..2 {
                    if let Some(value) = queue.write().unwrap().pop() {
                        popped.push(value);
                    }
                }
                popped
            })
        };

        producer.join().unwrap();
        let mut popped = consumer.join().unwrap();
        while let Some(value) = queue.write().unwrap().pop() {
            popped.push(value);
        }

        // a single producer's values always come out in push order
        assert_eq!(popped, vec![1, 2]);
    });
}

#[test]
fn loom_competing_producers_respect_capacity() {
    loom::model(|| {
        // two usable slots, three pushes
        let queue = Arc::new(RwLock::new(RingQueue::new(3)));

        let handles: Vec<_> = (0..3)
            .map(|value| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.write().unwrap().push(value).is_ok())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&ok| ok)
            .count();

        let guard = queue.read().unwrap();
        assert_eq!(accepted, 2);
        assert_eq!(guard.len(), 2);
        assert!(guard.is_full());
    });
}

#[test]
fn loom_batch_push_is_atomic_for_readers() {
    loom::model(|| {
        let queue = Arc::new(RwLock::new(RingQueue::new(5)));

        let writer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                queue.write().unwrap().push_all(vec![1, 2, 3]).unwrap();
            })
        };

        // a reader sees either none or all of the batch
        let observed = queue.read().unwrap().len();
        assert!(observed == 0 || observed == 3);

        writer.join().unwrap();
        assert_eq!(queue.read().unwrap().len(), 3);
    });
}
