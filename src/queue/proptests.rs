//! Property-based tests for the ring queue using proptest
//!
//! These tests check the cursor arithmetic against a `VecDeque` model over random
//! push/pop sequences, which exercises every wraparound position.

use super::{RingQueue, RingQueueLike};
use proptest::prelude::*;
use std::collections::VecDeque;
use std::vec::Vec;

#[derive(Debug, Clone)]
enum Op {
    Push(u16),
    PushAll(Vec<u16>),
    Pop,
    PopN(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u16>().prop_map(Op::Push),
        1 => prop::collection::vec(any::<u16>(), 0..5).prop_map(Op::PushAll),
        2 => Just(Op::Pop),
        1 => (0usize..4).prop_map(Op::PopN),
    ]
}

/// Property: FIFO behavior and capacity accounting match a bounded model
mod fifo_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_matches_bounded_model(
            capacity in 1usize..10,
            ops in prop::collection::vec(op_strategy(), 0..80)
        ) {
            let mut queue = RingQueue::new(capacity);
            let mut model: VecDeque<u16> = VecDeque::new();
            let usable = capacity - 1;

            for op in ops {
                match op {
                    Op::Push(value) => {
                        let fits = model.len() < usable;
                        prop_assert_eq!(queue.push(value).is_ok(), fits);
                        if fits {
                            model.push_back(value);
                        }
                    }
                    Op::PushAll(values) => {
                        let fits = values.is_empty() || model.len() + values.len() <= usable;
                        prop_assert_eq!(queue.push_all(values.clone()).is_ok(), fits);
                        if fits {
                            model.extend(values);
                        }
                    }
                    Op::Pop => {
                        prop_assert_eq!(queue.pop(), model.pop_front());
                    }
                    Op::PopN(count) => {
                        let expected: Vec<u16> =
                            (0..count).filter_map(|_| model.pop_front()).collect();
                        prop_assert_eq!(queue.pop_n(count), expected);
                    }
                }

                prop_assert!(queue.len() <= usable);
                prop_assert_eq!(queue.len(), model.len());
                prop_assert_eq!(queue.is_full(), model.len() == usable);
                prop_assert_eq!(queue.is_empty(), model.is_empty());
                prop_assert_eq!(queue.available_capacity(), capacity - model.len());
                prop_assert_eq!(queue.peek(), model.front());
            }
        }

        #[test]
        fn test_wraparound_round_trip(
            capacity in 2usize..16,
            offset in 0usize..16,
            values in prop::collection::vec(any::<u16>(), 0..16)
        ) {
            let usable = capacity - 1;
            let values: Vec<u16> = values.into_iter().take(usable).collect();

            // rotate the cursors before filling
            let mut queue = RingQueue::new(capacity);
            for _ in 0..offset {
                queue.push(0).unwrap();
                queue.pop();
            }

            queue.push_all(values.clone()).unwrap();
            prop_assert_eq!(queue.iter().copied().collect::<Vec<_>>(), values.clone());
            prop_assert_eq!(queue.pop_n(usable), values);
            prop_assert!(queue.is_empty());

            let mut occupied = 0;
            queue.scan(Some(&mut |slot: Option<&u16>| {
                if slot.is_some() {
                    occupied += 1;
                }
            })).unwrap();
            prop_assert_eq!(occupied, 0);
        }
    }
}
