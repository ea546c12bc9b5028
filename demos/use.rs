use std::cmp::Ordering;

use avl_by::{AvlTree, RecordTree};

fn by_id(lhs: &[u8], rhs: &[u8]) -> Ordering {
    lhs[..4].cmp(&rhs[..4])
}

fn main() {
    let mut tree = AvlTree::new();
    for x in [4, 2, 6, 1, 3, 5, 7] {
        tree.insert(x);
    }
    assert!(!tree.insert(4));
    assert!(tree.contains(&1));
    tree.remove(&1);
    assert!(!tree.contains(&1));

    print!("{{ ");
    tree.traverse_in_order(|x| print!("{x}, "));
    println!("}}");

    // Records of 8 bytes: a big-endian id followed by a payload
    let mut records = RecordTree::create(8, by_id).unwrap();
    for (id, payload) in [(3u32, 30u32), (1, 10), (2, 20), (1, 11)] {
        let mut record = [0u8; 8];
        record[..4].copy_from_slice(&id.to_be_bytes());
        record[4..].copy_from_slice(&payload.to_be_bytes());
        records.insert(&record).unwrap();
    }
    println!("{} records of {} bytes", records.size(), records.record_size());
    records.traverse_in_order(|record| println!("{record:?}"));

    records.destroy(|record| println!("released {record:?}"));
}
