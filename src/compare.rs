//! Comparators that define the total order of a tree.

use std::cmp::Ordering;

/// A three-way comparison over records of type `T`.
///
/// Implementations must describe a total order. A comparator that is not
/// a total order does not cause memory unsafety, but the resulting tree
/// shape and lookup results are unspecified.
///
/// Any closure `Fn(&T, &T) -> Ordering` is a comparator:
///
/// ```
/// use avl_by::AvlTree;
/// let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// tree.insert(1);
/// tree.insert(2);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares `lhs` against `rhs`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// The natural order of `T`, as given by its [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}
