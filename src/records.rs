//! A tree of opaque, fixed-size byte records.
//!
//! [`RecordTree`] stores private copies of byte records that all have the
//! same length, ordered by a caller-supplied comparator over byte slices.
//! The comparator is the only code that looks inside a record.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::compare::Compare;
use crate::error::RecordError;
use crate::tree::AvlTree;

/// An ordered set of fixed-size byte records.
///
/// ```
/// use avl_by::RecordTree;
/// let mut tree = RecordTree::create(4, |a: &[u8], b: &[u8]| a.cmp(b)).unwrap();
/// tree.insert(&7u32.to_be_bytes()).unwrap();
/// assert!(tree.contains(&7u32.to_be_bytes()).unwrap());
/// assert!(tree.insert(&[1, 2, 3]).is_err());
/// ```
pub struct RecordTree<C> {
    tree: AvlTree<Box<[u8]>, ByteOrder<C>>,
    record_size: usize,
}

// Lifts a comparator over byte slices to the boxed copies held by the tree.
struct ByteOrder<C>(C);

impl<C> Compare<Box<[u8]>> for ByteOrder<C>
where
    C: Fn(&[u8], &[u8]) -> Ordering,
{
    fn compare(&self, lhs: &Box<[u8]>, rhs: &Box<[u8]>) -> Ordering {
        (self.0)(&lhs[..], &rhs[..])
    }
}

impl<C> RecordTree<C>
where
    C: Fn(&[u8], &[u8]) -> Ordering,
{
    /// Creates an empty tree for records of exactly `record_size` bytes.
    pub fn create(record_size: usize, compare: C) -> Result<Self, RecordError> {
        if record_size == 0 {
            return Err(RecordError::ZeroRecordSize);
        }
        debug!(record_size, "created record tree");
        Ok(Self {
            tree: AvlTree::with_comparator(ByteOrder(compare)),
            record_size,
        })
    }

    /// Inserts a copy of `record`.
    /// Returns false if an equal record is already present.
    pub fn insert(&mut self, record: &[u8]) -> Result<bool, RecordError> {
        self.check_size(record)?;
        Ok(self.tree.insert(record.into()))
    }

    /// Removes the record equal to `record`, handing the stored copy to `destroy`.
    /// Returns false, without calling `destroy`, if no such record is present.
    pub fn remove<D>(&mut self, record: &[u8], destroy: D) -> Result<bool, RecordError>
    where
        D: FnOnce(Box<[u8]>),
    {
        self.check_size(record)?;
        match self.tree.take(&Box::from(record)) {
            Some(stored) => {
                destroy(stored);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns true if a record equal to `record` is present.
    pub fn contains(&self, record: &[u8]) -> Result<bool, RecordError> {
        self.check_size(record)?;
        Ok(self.tree.contains(&Box::from(record)))
    }

    /// Calls `visit` once for every stored record, in ascending order.
    pub fn traverse_in_order<F: FnMut(&[u8])>(&self, mut visit: F) {
        self.tree.traverse_in_order(|record| visit(&record[..]));
    }

    /// Tears down the tree, handing every stored record to `destroy` exactly once.
    pub fn destroy<D: FnMut(Box<[u8]>)>(self, destroy: D) {
        self.tree.destroy(destroy);
    }

    fn check_size(&self, record: &[u8]) -> Result<(), RecordError> {
        if record.len() != self.record_size {
            return Err(RecordError::SizeMismatch {
                expected: self.record_size,
                actual: record.len(),
            });
        }
        Ok(())
    }
}

impl<C> RecordTree<C> {
    /// Returns the number of stored records.
    pub fn size(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the size in bytes of every record in this tree.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Returns the height of the underlying tree, `None` if empty.
    pub fn height(&self) -> Option<usize> {
        self.tree.height()
    }
}

impl<C> fmt::Debug for RecordTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordTree")
            .field("record_size", &self.record_size)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_u32(lhs: &[u8], rhs: &[u8]) -> Ordering {
        let lhs = u32::from_le_bytes(lhs.try_into().unwrap());
        let rhs = u32::from_le_bytes(rhs.try_into().unwrap());
        lhs.cmp(&rhs)
    }

    fn record(value: u32) -> [u8; 4] {
        value.to_le_bytes()
    }

    #[test]
    fn test_create() {
        let tree = RecordTree::create(4, by_u32).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.record_size(), 4);
        assert_eq!(tree.height(), None);

        let err = RecordTree::create(0, by_u32).unwrap_err();
        assert_eq!(err, RecordError::ZeroRecordSize);
        assert_eq!(err.to_string(), "record size must be at least one byte");
    }

    #[test]
    fn test_size_mismatch() {
        let mut tree = RecordTree::create(4, by_u32).unwrap();
        let expected = Err(RecordError::SizeMismatch {
            expected: 4,
            actual: 3,
        });
        assert_eq!(tree.insert(&[1, 2, 3]), expected);
        assert_eq!(tree.contains(&[1, 2, 3]), expected);
        assert_eq!(tree.remove(&[1, 2, 3], drop), expected);
        assert!(tree.is_empty());

        let err = tree.insert(&[0; 8]).unwrap_err();
        assert_eq!(err.to_string(), "record is 8 bytes, expected 4");
    }

    #[test]
    fn test_insert_copies_record() {
        let mut tree = RecordTree::create(4, by_u32).unwrap();
        let mut buffer = record(42);
        assert_eq!(tree.insert(&buffer), Ok(true));
        buffer.copy_from_slice(&record(7));
        assert_eq!(tree.contains(&record(42)), Ok(true));
        assert_eq!(tree.contains(&record(7)), Ok(false));
        assert_eq!(tree.insert(&record(42)), Ok(false));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn test_ascending_insert_and_root_removal() {
        let mut tree = RecordTree::create(4, by_u32).unwrap();
        for value in 1..=7 {
            assert_eq!(tree.insert(&record(value)), Ok(true));
        }
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.height(), Some(2));

        let mut destroyed = Vec::new();
        assert_eq!(tree.remove(&record(4), |r| destroyed.push(r)), Ok(true));
        let expected: Box<[u8]> = Box::from(&record(4)[..]);
        assert_eq!(destroyed, vec![expected]);
        assert_eq!(tree.remove(&record(4), |_| panic!("absent record destroyed")), Ok(false));
        assert_eq!(tree.size(), 6);

        let mut visited = Vec::new();
        tree.traverse_in_order(|r| visited.push(u32::from_le_bytes(r.try_into().unwrap())));
        assert_eq!(visited, vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_destroy() {
        let mut tree = RecordTree::create(4, by_u32).unwrap();
        for value in [5, 3, 8, 1, 4] {
            tree.insert(&record(value)).unwrap();
        }
        let mut destroyed = 0;
        tree.destroy(|r| {
            assert_eq!(r.len(), 4);
            destroyed += 1;
        });
        assert_eq!(destroyed, 5);
    }
}
