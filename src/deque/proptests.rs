//! Property-based tests for the linked deque using proptest
//!
//! Random operation sequences are replayed against both a `LinkedDeque` and a
//! `std::collections::VecDeque` model; the two must never disagree.

use super::{DequeLike, LinkedDeque, NodeId};
use proptest::prelude::*;
use std::collections::VecDeque;
use std::vec::Vec;

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    PushBackAll(Vec<i32>),
    PushFrontAll(Vec<i32>),
    PopFrontN(usize),
    PopBackN(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushBack),
        any::<i32>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        prop::collection::vec(any::<i32>(), 0..6).prop_map(Op::PushBackAll),
        prop::collection::vec(any::<i32>(), 0..6).prop_map(Op::PushFrontAll),
        (0usize..5).prop_map(Op::PopFrontN),
        (0usize..5).prop_map(Op::PopBackN),
    ]
}

/// Property: a bounded deque behaves like a `VecDeque` that refuses to grow past capacity
mod model_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_matches_vecdeque_model(
            capacity in 0usize..12,
            ops in prop::collection::vec(op_strategy(), 0..64)
        ) {
            let mut deque = LinkedDeque::bounded(capacity);
            let mut model: VecDeque<i32> = VecDeque::new();

            for op in ops {
                match op {
                    Op::PushBack(value) => {
                        let fits = model.len() < capacity;
                        prop_assert_eq!(deque.push_back(value).is_ok(), fits);
                        if fits {
                            model.push_back(value);
                        }
                    }
                    Op::PushFront(value) => {
                        let fits = model.len() < capacity;
                        prop_assert_eq!(deque.push_front(value).is_ok(), fits);
                        if fits {
                            model.push_front(value);
                        }
                    }
                    Op::PopBack => {
                        prop_assert_eq!(deque.pop_back(), model.pop_back());
                    }
                    Op::PopFront => {
                        prop_assert_eq!(deque.pop_front(), model.pop_front());
                    }
                    Op::PushBackAll(values) => {
                        let fits = model.len() + values.len() <= capacity;
                        prop_assert_eq!(deque.push_back_all(values.clone()).is_ok(), fits);
                        if fits {
                            model.extend(values);
                        }
                    }
                    Op::PushFrontAll(values) => {
                        let fits = model.len() + values.len() <= capacity;
                        prop_assert_eq!(deque.push_front_all(values.clone()).is_ok(), fits);
                        if fits {
                            for value in values {
                                model.push_front(value);
                            }
                        }
                    }
                    Op::PopFrontN(count) => {
                        let expected: Vec<i32> =
                            (0..count).filter_map(|_| model.pop_front()).collect();
                        prop_assert_eq!(deque.pop_front_n(count), expected);
                    }
                    Op::PopBackN(count) => {
                        let expected: Vec<i32> =
                            (0..count).filter_map(|_| model.pop_back()).collect();
                        prop_assert_eq!(deque.pop_back_n(count), expected);
                    }
                }

                prop_assert!(deque.len() <= capacity);
                prop_assert_eq!(deque.len(), model.len());
                prop_assert_eq!(deque.is_full(), deque.available_capacity() == 0);
                prop_assert_eq!(
                    deque.available_capacity(),
                    capacity as isize - model.len() as isize
                );
                let values: Vec<i32> = deque.iter().copied().collect();
                let expected: Vec<i32> = model.iter().copied().collect();
                prop_assert_eq!(values, expected);
            }
        }

        #[test]
        fn test_unbounded_never_fills(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut deque = LinkedDeque::unbounded();
            for op in ops {
                match op {
                    Op::PushBack(value) => {
                        prop_assert!(deque.push_back(value).is_ok());
                    }
                    Op::PushFront(value) => {
                        prop_assert!(deque.push_front(value).is_ok());
                    }
                    Op::PushBackAll(values) => {
                        prop_assert!(deque.push_back_all(values).is_ok());
                    }
                    Op::PushFrontAll(values) => {
                        prop_assert!(deque.push_front_all(values).is_ok());
                    }
                    Op::PopBack => {
                        deque.pop_back();
                    }
                    Op::PopFront => {
                        deque.pop_front();
                    }
                    Op::PopFrontN(count) => {
                        deque.pop_front_n(count);
                    }
                    Op::PopBackN(count) => {
                        deque.pop_back_n(count);
                    }
                }
                prop_assert!(!deque.is_full());
                prop_assert_eq!(deque.available_capacity(), -1);
            }
        }
    }
}

/// Property: ordering guarantees of single-ended use
mod ordering_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_back_push_front_pop_is_fifo(values in prop::collection::vec(any::<i32>(), 0..100)) {
            let mut deque = LinkedDeque::unbounded();
            deque.push_back_all(values.clone()).unwrap();
            let popped = deque.pop_front_n(values.len());
            prop_assert_eq!(popped, values);
        }

        #[test]
        fn test_back_push_back_pop_is_lifo(values in prop::collection::vec(any::<i32>(), 0..100)) {
            let mut deque = LinkedDeque::unbounded();
            for &value in &values {
                deque.push_back(value).unwrap();
            }
            let mut expected = values.clone();
            expected.reverse();
            prop_assert_eq!(deque.pop_back_n(values.len()), expected);
        }

        #[test]
        fn test_front_push_back_pop_keeps_arrival_order(
            values in prop::collection::vec(any::<i32>(), 0..100)
        ) {
            let mut deque = LinkedDeque::unbounded();
            deque.push_front_all(values.clone()).unwrap();
            prop_assert_eq!(deque.pop_back_n(values.len()), values);
        }

        #[test]
        fn test_removed_handles_stay_stale(
            values in prop::collection::vec(any::<i32>(), 1..30),
            mask in prop::collection::vec(any::<bool>(), 30)
        ) {
            let mut deque = LinkedDeque::unbounded();
            let nodes: Vec<NodeId> = values
                .iter()
                .map(|&value| deque.push_back_node(value).unwrap())
                .collect();

            let chosen: Vec<NodeId> = nodes
                .iter()
                .zip(&mask)
                .filter(|(_, remove)| **remove)
                .map(|(&node, _)| node)
                .collect();
            let removed = deque.remove_nodes(&chosen);
            prop_assert_eq!(removed.len(), chosen.len());

            // refill so removed slots are reused
            deque.push_back_all_unchecked(values.clone());
            for node in &chosen {
                prop_assert!(deque.get(*node).is_none());
            }
            prop_assert_eq!(deque.len(), 2 * values.len() - chosen.len());
        }
    }
}
