use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
    Contains(i16),
}

// A narrow key range makes duplicate inserts and hits on remove common.
fn key_strategy() -> impl Strategy<Value = i16> + Clone {
    -64i16..=64
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        30 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Contains),
    ];
    prop::collection::vec(op, 0..=500)
}

fn preorder_shape(tree: &AvlTree<i16>) -> Vec<(i16, usize)> {
    let mut shape = Vec::new();
    tree.preorder(|record, height| shape.push((*record, height)));
    shape
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: AvlTree<i16> = AvlTree::new();
        let mut m: BTreeSet<i16> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(t.insert(key), m.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::Contains(key) => {
                    prop_assert_eq!(t.contains(&key), m.contains(&key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
            t.check_consistency();
        }

        let got: Vec<i16> = t.iter().copied().collect();
        let expected: Vec<i16> = m.iter().copied().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_reverse_order(keys in prop::collection::vec(key_strategy(), 0..=300)) {
        let mut t = AvlTree::with_comparator(|a: &i16, b: &i16| b.cmp(a));
        for key in &keys {
            t.insert(*key);
        }
        t.check_consistency();

        let got: Vec<i16> = t.iter().copied().collect();
        let mut expected = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.dedup();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_duplicate_insert_is_idempotent(keys in prop::collection::vec(key_strategy(), 1..=300)) {
        let mut t = AvlTree::new();
        for key in &keys {
            t.insert(*key);
        }
        let shape = preorder_shape(&t);
        for key in &keys {
            prop_assert!(!t.insert(*key));
        }
        prop_assert_eq!(preorder_shape(&t), shape);
    }

    #[test]
    fn prop_remove_absent_keeps_shape(
        keys in prop::collection::vec(key_strategy(), 0..=300),
        absent in 65i16..=1000,
    ) {
        let mut t = AvlTree::new();
        for key in &keys {
            t.insert(*key);
        }
        let shape = preorder_shape(&t);
        prop_assert!(!t.remove(&absent));
        prop_assert_eq!(preorder_shape(&t), shape);
    }

    #[test]
    fn prop_height_is_logarithmic(keys in prop::collection::vec(any::<i16>(), 1..=2000)) {
        let mut t = AvlTree::new();
        for key in &keys {
            t.insert(*key);
        }
        let bound = 1.45 * ((t.len() + 2) as f64).log2();
        prop_assert!((t.height().unwrap() as f64) < bound);
    }
}
