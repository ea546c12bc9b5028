//! Rotation primitives and the rebalancing step built from them.
//!
//! All operations take a subtree by value and return the new subtree root,
//! so a rotation is a handful of moves between owned boxes.

use tracing::trace;

use crate::node::Node;

/// The four shapes an AVL subtree can be out of balance in,
/// named after the path from the unbalanced node towards its heavy grandchild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Imbalance {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

/// Rotates left at `node`: its right child becomes the subtree root.
///
/// ```text
///   x              y
///  / \            / \
/// a   y    ->    x   c
///    / \        / \
///   b   c      a   b
/// ```
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        Some(mut right) => {
            node.right = right.left.take();
            node.adjust_height();
            right.left = Some(node);
            right.adjust_height();
            right
        }
        None => node,
    }
}

/// Rotates right at `node`: its left child becomes the subtree root.
///
/// ```text
///     x          y
///    / \        / \
///   y   c  ->  a   x
///  / \            / \
/// a   b          b   c
/// ```
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        Some(mut left) => {
            node.left = left.right.take();
            node.adjust_height();
            left.right = Some(node);
            left.adjust_height();
            left
        }
        None => node,
    }
}

/// Classifies the imbalance at `node`, if any.
/// Children's cached heights must be up to date.
pub(crate) fn classify<T>(node: &Node<T>) -> Option<Imbalance> {
    let balance = node.balance();
    if balance < -1 {
        let left = node.left.as_ref()?;
        if left.balance() > 0 {
            Some(Imbalance::LeftRight)
        } else {
            Some(Imbalance::LeftLeft)
        }
    } else if balance > 1 {
        let right = node.right.as_ref()?;
        if right.balance() < 0 {
            Some(Imbalance::RightLeft)
        } else {
            Some(Imbalance::RightRight)
        }
    } else {
        None
    }
}

/// Restores the AVL condition at `node` and refreshes its height.
/// Both subtrees must already be balanced and differ in height by at most 2,
/// which holds after a single insert or remove below `node`.
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.adjust_height();
    let Some(shape) = classify(&node) else {
        return node;
    };
    trace!(?shape, height = node.height, "rotating unbalanced subtree");
    match shape {
        Imbalance::LeftLeft => rotate_right(node),
        Imbalance::LeftRight => {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        Imbalance::RightRight => rotate_left(node),
        Imbalance::RightLeft => {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    }
}
