//! An ordered record set implemented with an AVL tree.
//!
//! [`AvlTree`] keeps its records sorted under a comparator supplied when the
//! tree is created, and stays height-balanced after every insert and remove,
//! so lookups, inserts and removes take logarithmic time.
//!
//! [`RecordTree`] offers the same tree for opaque byte records of a fixed
//! size, with the comparator being the only code that interprets them.
//!
//! ```
//! use avl_by::AvlTree;
//! let mut tree = AvlTree::with_comparator(|a: &String, b: &String| a.len().cmp(&b.len()));
//! tree.insert(String::from("three"));
//! tree.insert(String::from("one"));
//! tree.insert(String::from("two"));
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.iter().collect::<Vec<_>>(), ["one", "three"]);
//! ```

mod compare;
mod error;
mod node;
mod records;
mod rotate;
mod tree;

pub use compare::{Compare, Natural};
pub use error::RecordError;
pub use records::RecordTree;
pub use tree::{AvlTree, Iter};

#[cfg(test)]
mod proptests;
