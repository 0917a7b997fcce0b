//! Integration tests for the red-black ordered tree.
//!
//! Checks ordering, the red-black invariants after mixed operations and
//! the enumerator protocol.

use pdfgen_core::collections::OrderedTree;
use pdfgen_core::Error;
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// BASIC OPERATIONS
// =============================================================================

mod basic_tests {
    use super::*;

    #[test]
    fn test_empty_tree_queries() {
        let mut tree: OrderedTree<i32, &str> = OrderedTree::new();
        assert!(tree.is_empty());
        assert!(matches!(tree.min_key(), Err(Error::EmptyContainer)));
        assert!(matches!(tree.max_value(), Err(Error::EmptyContainer)));
        assert!(matches!(tree.remove_min(), Err(Error::EmptyContainer)));
        assert_eq!(tree.remove(&1), None);
        assert_eq!(tree.verify().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_add_leaves_tree_unchanged() {
        let mut tree = OrderedTree::new();
        tree.add("b", 2).unwrap();
        tree.add("a", 1).unwrap();
        let err = tree.add("a", 10).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&"a"), Some(&1));
    }

    #[test]
    fn test_set_replaces_value() {
        let mut tree = OrderedTree::new();
        assert_eq!(tree.set(5, "five"), None);
        assert_eq!(tree.set(5, "FIVE"), Some("five"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&5), Some(&"FIVE"));
    }

    #[test]
    fn test_min_max_and_removal() {
        let mut tree: OrderedTree<u32, u32> = (1..=10).map(|k| (k, k * k)).collect();
        assert_eq!(tree.min_key().unwrap(), &1);
        assert_eq!(tree.max_value().unwrap(), &100);
        assert_eq!(tree.remove_max().unwrap(), (10, 100));
        assert_eq!(tree.remove_min().unwrap(), (1, 1));
        assert_eq!(tree.len(), 8);
        tree.verify().unwrap();
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut tree: OrderedTree<&str, Vec<u32>> = OrderedTree::new();
        tree.add("glyphs", vec![]).unwrap();
        tree.get_mut(&"glyphs").unwrap().push(3);
        assert_eq!(tree.get(&"glyphs"), Some(&vec![3]));
    }

    #[test]
    fn test_clear() {
        let mut tree: OrderedTree<i32, i32> = (0..50).map(|k| (k, k)).collect();
        tree.clear();
        assert!(tree.is_empty());
        tree.add(1, 1).unwrap();
        assert_eq!(tree.len(), 1);
    }
}

// =============================================================================
// ENUMERATION
// =============================================================================

mod enumeration_tests {
    use super::*;

    fn sample() -> OrderedTree<i32, char> {
        [(3, 'c'), (1, 'a'), (4, 'd'), (2, 'b')].into_iter().collect()
    }

    #[test]
    fn test_ascending_and_descending() {
        let tree = sample();
        let asc: Vec<i32> = tree.keys().copied().collect();
        let desc: Vec<i32> = tree.iter_desc().map(|(k, _)| *k).collect();
        assert_eq!(asc, vec![1, 2, 3, 4]);
        assert_eq!(desc, vec![4, 3, 2, 1]);
        let values: String = tree.values().rev().collect();
        assert_eq!(values, "dcba");
    }

    #[test]
    fn test_cursor_protocol() {
        let tree = sample();
        let mut entries = tree.entries(true);
        assert!(matches!(entries.current(), Err(Error::InvalidState(_))));
        assert!(entries.has_more());

        let mut seen = Vec::new();
        while entries.move_next() {
            seen.push(*entries.current().unwrap().1);
        }
        assert_eq!(seen, vec!['a', 'b', 'c', 'd']);
        assert!(!entries.has_more());
        assert!(entries.current().is_err());

        entries.reset();
        assert!(entries.move_next());
        assert_eq!(entries.current().unwrap(), (&1, &'a'));
    }

    #[test]
    fn test_exact_size() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let tree = sample();
        let mut total = 0;
        for (k, _) in &tree {
            total += k;
        }
        assert_eq!(total, 10);
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Set(u16, u16),
    Remove(u16),
    RemoveMin,
    RemoveMax,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u16..512, any::<u16>()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => (0u16..512).prop_map(Op::Remove),
        1 => Just(Op::RemoveMin),
        1 => Just(Op::RemoveMax),
    ]
}

proptest! {
    #[test]
    fn prop_matches_btreemap(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        let mut tree = OrderedTree::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Set(k, v) => {
                    prop_assert_eq!(tree.set(k, v), model.insert(k, v));
                },
                Op::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), model.remove(&k));
                },
                Op::RemoveMin => {
                    let expected = model.pop_first();
                    prop_assert_eq!(tree.remove_min().ok(), expected);
                },
                Op::RemoveMax => {
                    let expected = model.pop_last();
                    prop_assert_eq!(tree.remove_max().ok(), expected);
                },
            }
            prop_assert!(tree.verify().is_ok());
        }
        prop_assert_eq!(tree.len(), model.len());
        let entries: Vec<(u16, u16)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u16)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn prop_black_height_bounded(keys in proptest::collection::btree_set(any::<i32>(), 1..500)) {
        let tree: OrderedTree<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        let black_height = tree.verify().unwrap();
        let bound = 2 * (usize::BITS - (keys.len() + 1).leading_zeros()) as usize + 1;
        prop_assert!(black_height <= bound);
        prop_assert_eq!(tree.min_key().unwrap(), keys.iter().next().unwrap());
        prop_assert_eq!(tree.max_key().unwrap(), keys.iter().next_back().unwrap());
    }
}
