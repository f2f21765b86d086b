use crate::raw::Handle;

/// Identifies one item slot of a [`BTree`](crate::BTree): a node and an index inside it.
///
/// Positions are returned by [`find`](crate::BTree::find) and
/// [`insert`](crate::BTree::insert). A position is valid until the next
/// mutation of the tree that produced it: splits, rotations and merges move
/// items between nodes, so after an insert or remove an older position may
/// point at a different item or at nothing at all. Tree methods that take a
/// position check that it addresses a live item and report
/// [`Error::InvalidPosition`](crate::Error::InvalidPosition) (or `false`)
/// otherwise, but they cannot tell a stale position from a fresh one that
/// happens to address the same slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    node: Handle,
    index: usize,
}

impl Position {
    #[inline]
    pub(crate) const fn new(node: Handle, index: usize) -> Self {
        Self { node, index }
    }

    #[inline]
    pub(crate) const fn node(self) -> Handle {
        self.node
    }

    /// Index of the item inside its node.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, (), 5> = BTree::new();
    /// tree.insert(20, ());
    /// let (position, _) = tree.insert(10, ());
    /// assert_eq!(position.index(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}
