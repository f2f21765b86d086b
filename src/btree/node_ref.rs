use core::fmt;

use crate::raw::{Arena, Handle, Node};

/// A read-only view of one node of a [`BTree`](crate::BTree).
///
/// Obtained from [`BTree::root`](crate::BTree::root) and used to inspect the
/// shape of the tree: the items held by each node and the subtrees between
/// them.
///
/// # Examples
///
/// ```
/// use order_btree::BTree;
///
/// let tree: BTree<u32, (), 3> = (1..=3).map(|k| (k, ())).collect();
/// let root = tree.root();
///
/// assert_eq!(root.keys().copied().collect::<Vec<_>>(), [2]);
/// let leaves: Vec<Vec<u32>> = root.children().map(|c| c.keys().copied().collect()).collect();
/// assert_eq!(leaves, [vec![1], vec![3]]);
/// ```
pub struct NodeRef<'a, K, V, const M: usize> {
    nodes: &'a Arena<Node<K, V, M>>,
    handle: Handle,
}

impl<'a, K, V, const M: usize> NodeRef<'a, K, V, M> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, V, M>>, handle: Handle) -> Self {
        Self { nodes, handle }
    }

    fn node(self) -> &'a Node<K, V, M> {
        self.nodes.get(self.handle)
    }

    /// Returns the number of items in this node.
    #[must_use]
    pub fn len(self) -> usize {
        self.node().len()
    }

    /// Returns `true` if this node holds no items. Only an empty tree's root can.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.node().is_empty()
    }

    /// Returns `true` if this node has no subtrees.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        self.node().is_leaf()
    }

    /// Returns `true` if this node is the root of its tree.
    #[must_use]
    pub fn is_root(self) -> bool {
        self.node().is_root()
    }

    /// Returns the key-value pairs of this node in key order.
    #[must_use]
    pub fn items(self) -> &'a [(K, V)] {
        self.node().items()
    }

    /// Returns an iterator over the keys of this node in key order.
    pub fn keys(self) -> impl ExactSizeIterator<Item = &'a K> + 'a {
        self.node().items().iter().map(|(k, _)| k)
    }

    /// Returns the number of child slots. This is `len() + 1` for a non-empty
    /// node, whether or not it is a leaf, and zero for an empty one.
    #[must_use]
    pub fn child_slots(self) -> usize {
        self.node().children().len()
    }

    /// Returns the subtree in slot `index`, or `None` for a leaf slot or an out-of-range index.
    #[must_use]
    pub fn child(self, index: usize) -> Option<Self> {
        self.node().child(index).map(|handle| Self::new(self.nodes, handle))
    }

    /// Returns an iterator over the subtrees of this node, left to right. Empty for leaves.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a, K, V, M>> + 'a {
        let nodes = self.nodes;
        self.node().children().iter().flatten().map(move |&handle| NodeRef::new(nodes, handle))
    }

    /// Returns the parent of this node, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.node().parent().map(|handle| Self::new(self.nodes, handle))
    }
}

impl<K, V, const M: usize> Clone for NodeRef<'_, K, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, const M: usize> Copy for NodeRef<'_, K, V, M> {}

impl<K: fmt::Debug, V: fmt::Debug, const M: usize> fmt::Debug for NodeRef<'_, K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("items", &self.items())
            .field("leaf", &self.is_leaf())
            .finish()
    }
}
