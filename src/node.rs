use std::cmp;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) record: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    // Height of this subtree, a leaf being 0.
    pub(crate) height: usize,
}

impl<T> Node<T> {
    pub(crate) fn leaf(record: T) -> Box<Self> {
        Box::new(Node {
            record,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Height of a possibly absent subtree.
    /// An absent subtree sits one below a leaf and has no height.
    pub(crate) fn height_of(link: &Link<T>) -> Option<usize> {
        link.as_ref().map(|node| node.height)
    }

    /// Number of levels of a possibly absent subtree: 0 if absent, 1 for a leaf.
    pub(crate) fn levels(link: &Link<T>) -> usize {
        match link {
            None => 0,
            Some(node) => node.height + 1,
        }
    }

    /// Right levels minus left levels.
    /// Positive when the right subtree is higher, negative when the left one is.
    pub(crate) fn balance(&self) -> isize {
        Self::levels(&self.right) as isize - Self::levels(&self.left) as isize
    }

    pub(crate) fn adjust_height(&mut self) {
        self.height = cmp::max(Self::levels(&self.left), Self::levels(&self.right));
    }
}
