use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::debug;

use crate::compare::{Compare, Natural};
use crate::node::{Link, Node};
use crate::rotate;

/// An ordered set of records implemented with an AVL tree.
///
/// Records are ordered by a comparator `C`, which defaults to the natural
/// order of `T`. Records comparing equal are duplicates: only the first one
/// inserted is kept.
///
/// ```
/// use avl_by::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(2);
/// assert_eq!(tree.len(), 2);
/// assert!(tree.contains(&1));
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
#[derive(Clone)]
pub struct AvlTree<T, C = Natural> {
    root: Link<T>,
    num_nodes: usize,
    compare: C,
}

/// An iterator over the records of a tree, in ascending order.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree ordered by the natural order of `T`.
    /// No memory is allocated until the first record is inserted.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> AvlTree<T, C> {
    /// Creates an empty tree ordered by `compare`.
    /// The comparator is fixed for the lifetime of the tree.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            compare,
        }
    }

    /// Returns true if the tree contains no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of records in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: `None` if empty, `Some(0)` for a single record.
    pub fn height(&self) -> Option<usize> {
        Node::height_of(&self.root)
    }

    /// Returns the comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Clears the tree, dropping all records and deallocating all nodes.
    pub fn clear(&mut self) {
        let num_nodes = mem::replace(&mut self.num_nodes, 0);
        self.root = None;
        debug!(num_nodes, "cleared tree");
    }

    /// Gets an iterator over the records of the tree, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Calls `visit` once for every record, in ascending order.
    pub fn traverse_in_order<F: FnMut(&T)>(&self, mut visit: F) {
        Self::inorder(&self.root, &mut visit);
    }

    /// Tears down the tree, handing every record to `destroy` exactly once.
    ///
    /// Nodes are released in post-order: both subtrees of a node are
    /// destroyed before the node's own record is passed on.
    pub fn destroy<F: FnMut(T)>(mut self, mut destroy: F) {
        let num_nodes = mem::replace(&mut self.num_nodes, 0);
        Self::postorder(self.root.take(), &mut destroy);
        debug!(num_nodes, "destroyed tree");
    }

    /// Visits every record with its cached height, in pre-order.
    /// Two trees with equal pre-order sequences have the same shape.
    #[cfg(test)]
    pub(crate) fn preorder<F: FnMut(&T, usize)>(&self, mut visit: F) {
        fn walk<T, F: FnMut(&T, usize)>(link: &Link<T>, visit: &mut F) {
            if let Some(node) = link {
                visit(&node.record, node.height);
                walk(&node.left, visit);
                walk(&node.right, visit);
            }
        }
        walk(&self.root, &mut visit);
    }

    fn inorder<F: FnMut(&T)>(link: &Link<T>, visit: &mut F) {
        if let Some(node) = link {
            Self::inorder(&node.left, visit);
            visit(&node.record);
            Self::inorder(&node.right, visit);
        }
    }

    fn postorder<F: FnMut(T)>(link: Link<T>, destroy: &mut F) {
        if let Some(node) = link {
            let Node {
                record,
                left,
                right,
                ..
            } = *node;
            Self::postorder(left, destroy);
            Self::postorder(right, destroy);
            destroy(record);
        }
    }
}

impl<T, C: Compare<T>> AvlTree<T, C> {
    /// Returns a reference to the record in the tree that is equal to `key`.
    pub fn get(&self, key: &T) -> Option<&T> {
        self.find(key).map(|node| &node.record)
    }

    /// Returns true if the tree contains a record equal to `key`.
    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// Inserts a record into the tree.
    /// Returns false, dropping `record`, if an equal record is already present.
    pub fn insert(&mut self, record: T) -> bool {
        let inserted = Self::insert_into(&mut self.root, record, &self.compare);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes the record equal to `key` from the tree.
    /// Returns whether such a record was present.
    pub fn remove(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    /// Removes the record equal to `key` from the tree.
    /// Returns the record if it was present.
    pub fn take(&mut self, key: &T) -> Option<T> {
        let removed = Self::remove_from(&mut self.root, key, &self.compare)?;
        debug_assert!(self.num_nodes >= 1);
        self.num_nodes -= 1;
        Some(removed)
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = Self::check_subtree(&self.root, None, None, &self.compare);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.root.is_none(), self.num_nodes == 0);
    }

    fn find(&self, key: &T) -> Option<&Node<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.compare.compare(key, &node.record) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    // Only a subtree that actually received a node can have become unbalanced.
    fn insert_into(link: &mut Link<T>, record: T, compare: &C) -> bool {
        let mut node = match link.take() {
            None => {
                *link = Some(Node::leaf(record));
                return true;
            }
            Some(node) => node,
        };
        let inserted = match compare.compare(&record, &node.record) {
            Ordering::Less => Self::insert_into(&mut node.left, record, compare),
            Ordering::Greater => Self::insert_into(&mut node.right, record, compare),
            Ordering::Equal => false,
        };
        *link = Some(if inserted { rotate::rebalance(node) } else { node });
        inserted
    }

    fn remove_from(link: &mut Link<T>, key: &T, compare: &C) -> Option<T> {
        let mut node = link.take()?;
        let removed = match compare.compare(key, &node.record) {
            Ordering::Less => Self::remove_from(&mut node.left, key, compare),
            Ordering::Greater => Self::remove_from(&mut node.right, key, compare),
            Ordering::Equal => {
                let (rest, record) = unlink(node);
                *link = rest;
                return Some(record);
            }
        };
        *link = Some(if removed.is_some() {
            rotate::rebalance(node)
        } else {
            node
        });
        removed
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn check_subtree(link: &Link<T>, lower: Option<&T>, upper: Option<&T>, compare: &C) -> usize {
        let node = match link {
            None => return 0,
            Some(node) => node,
        };

        // Check order against the bounds inherited from all ancestors
        if let Some(lower) = lower {
            assert_eq!(compare.compare(lower, &node.record), Ordering::Less);
        }
        if let Some(upper) = upper {
            assert_eq!(compare.compare(upper, &node.record), Ordering::Greater);
        }

        let num_left = Self::check_subtree(&node.left, lower, Some(&node.record), compare);
        let num_right = Self::check_subtree(&node.right, Some(&node.record), upper, compare);

        // Check height
        let left_levels = Node::levels(&node.left);
        let right_levels = Node::levels(&node.right);
        assert_eq!(node.height, left_levels.max(right_levels));

        // Check AVL condition (nearly balance)
        assert!(left_levels <= right_levels + 1);
        assert!(right_levels <= left_levels + 1);

        num_left + num_right + 1
    }
}

/// Detaches the record of `node` from its subtree.
/// Returns the remaining, rebalanced subtree and the detached record.
fn unlink<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match (node.left.take(), node.right.take()) {
        (Some(left), Some(right)) => {
            // Replace record by in-order predecessor, keeping the node in place
            let (rest, predecessor) = remove_max(left);
            node.left = rest;
            node.right = Some(right);
            let record = mem::replace(&mut node.record, predecessor);
            (Some(rotate::rebalance(node)), record)
        }
        (child, None) | (None, child) => {
            let Node { record, .. } = *node;
            (child, record)
        }
    }
}

/// Detaches the rightmost node of a subtree, rebalancing on the way back up.
/// Returns the remaining subtree and the maximum record.
fn remove_max<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.right.take() {
        Some(right) => {
            let (rest, max) = remove_max(right);
            node.right = rest;
            (Some(rotate::rebalance(node)), max)
        }
        None => {
            let Node { record, left, .. } = *node;
            (left, record)
        }
    }
}

impl<T, C: Default> Default for AvlTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>, len: usize) -> Self {
        let capacity = Node::levels(root);
        let mut iter = Self {
            stack: Vec::with_capacity(capacity),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
