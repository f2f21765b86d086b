use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Item, Node, SearchResult, Split};
use crate::comparator::Comparator;
use crate::position::Position;

/// The core B-tree implementation backing `BTree`.
#[derive(Clone)]
pub(crate) struct RawBTree<K, V, const M: usize, C> {
    /// Arena storing all tree nodes. Parent links and child slots are handles into it.
    nodes: Arena<Node<K, V, M>>,
    /// Handle to the root node. The root always exists; an empty tree has an empty root.
    root: Handle,
    /// Total number of key-value pairs in the tree.
    len: usize,
    comparator: C,
}

/// An adjacent node under the same parent, and the parent item separating the two.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sibling {
    pub(crate) node: Handle,
    pub(crate) separator: Position,
}

impl<K, V, const M: usize, C> RawBTree<K, V, M, C> {
    const ORDER_IS_VALID: () = assert!(M > 2, "B-tree order must be greater than 2");

    /// Creates a new, empty tree ordered by `comparator`.
    pub(crate) fn with_comparator(comparator: C) -> Self {
        let () = Self::ORDER_IS_VALID;
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(None));
        Self {
            nodes,
            root,
            len: 0,
            comparator,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the handle of the root node.
    pub(crate) fn root(&self) -> Handle {
        self.root
    }

    /// Returns the arena holding every node.
    pub(crate) fn nodes(&self) -> &Arena<Node<K, V, M>> {
        &self.nodes
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V, M> {
        self.nodes.get(handle)
    }

    /// Number of node levels; zero for an empty tree.
    pub(crate) fn height(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut height = 1;
        let mut current = self.root;
        while let Some(child) = self.nodes.get(current).first_child() {
            current = child;
            height += 1;
        }
        height
    }

    /// Drops every node and leaves a single empty root.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::new(None));
        self.len = 0;
    }

    /// Returns the item addressed by `position`, if it still exists.
    pub(crate) fn item(&self, position: Position) -> Option<&Item<K, V>> {
        self.nodes.try_get(position.node())?.items().get(position.index())
    }

    /// Returns the item addressed by `position` mutably, if it still exists.
    pub(crate) fn item_mut(&mut self, position: Position) -> Option<&mut Item<K, V>> {
        let node = self.nodes.try_get_mut(position.node())?;
        if position.index() < node.len() {
            Some(node.item_mut(position.index()))
        } else {
            None
        }
    }

    /// Returns the position of the smallest item.
    pub(crate) fn first(&self) -> Option<Position> {
        let mut current = self.root;
        while let Some(child) = self.nodes.get(current).first_child() {
            current = child;
        }
        (!self.nodes.get(current).is_empty()).then(|| Position::new(current, 0))
    }

    /// Returns the position of the largest item.
    pub(crate) fn last(&self) -> Option<Position> {
        let mut current = self.root;
        while let Some(child) = self.nodes.get(current).last_child() {
            current = child;
        }
        let len = self.nodes.get(current).len();
        len.checked_sub(1).map(|index| Position::new(current, index))
    }

    /// Rightmost leaf item in the subtree left of the item at `position`.
    pub(crate) fn in_order_predecessor(&self, position: Position) -> Option<Position> {
        let mut current = self.nodes.get(position.node()).child(position.index())?;
        while let Some(child) = self.nodes.get(current).last_child() {
            current = child;
        }
        let len = self.nodes.get(current).len();
        len.checked_sub(1).map(|index| Position::new(current, index))
    }

    /// Leftmost leaf item in the subtree right of the item at `position`.
    pub(crate) fn in_order_successor(&self, position: Position) -> Option<Position> {
        let mut current = self.nodes.get(position.node()).child(position.index() + 1)?;
        while let Some(child) = self.nodes.get(current).first_child() {
            current = child;
        }
        (!self.nodes.get(current).is_empty()).then(|| Position::new(current, 0))
    }

    /// Returns the sibling immediately left of `node`, found by scanning the parent's slots.
    pub(crate) fn left_sibling(&self, node: Handle) -> Option<Sibling> {
        let parent = self.nodes.get(node).parent()?;
        let parent_node = self.nodes.get(parent);
        let separator = parent_node.index_of_child(node).checked_sub(1)?;
        let sibling = parent_node.child(separator)?;
        Some(Sibling {
            node: sibling,
            separator: Position::new(parent, separator),
        })
    }

    /// Returns the sibling immediately right of `node`, found by scanning the parent's slots.
    pub(crate) fn right_sibling(&self, node: Handle) -> Option<Sibling> {
        let parent = self.nodes.get(node).parent()?;
        let parent_node = self.nodes.get(parent);
        let separator = parent_node.index_of_child(node);
        let sibling = parent_node.child(separator + 1)?;
        Some(Sibling {
            node: sibling,
            separator: Position::new(parent, separator),
        })
    }

    /// Points every child of `handle` back at it.
    fn adopt_children(&mut self, handle: Handle) {
        for slot in 0..self.nodes.get(handle).children().len() {
            if let Some(child) = self.nodes.get(handle).child(slot) {
                self.nodes.get_mut(child).set_parent(Some(handle));
            }
        }
    }

    /// Splits the overfull node `current` and propagates splits up the tree.
    ///
    /// `inserted` tracks the item that caused the overflow so the caller gets
    /// its final position back.
    fn split_and_propagate(&mut self, mut current: Handle, mut inserted: Position) -> Position {
        let mid = M / 2;
        loop {
            let node = self.nodes.get_mut(current);
            let Split { median, right } = node.split();
            let parent = node.parent();
            let right_handle = self.nodes.alloc(right);
            self.adopt_children(right_handle);
            trace!("split node {current:?} at index {mid}, right half in {right_handle:?}");

            // Track the inserted item through the split.
            let promoted = inserted.node() == current && inserted.index() == mid;
            if inserted.node() == current && inserted.index() > mid {
                inserted = Position::new(right_handle, inserted.index() - mid - 1);
            }

            let Some(parent) = parent else {
                let mut root = Node::new(None);
                root.insert_item(0, median.0, median.1);
                root.set_child(0, Some(current));
                root.set_child(1, Some(right_handle));
                let root_handle = self.nodes.alloc(root);
                self.nodes.get_mut(current).set_parent(Some(root_handle));
                self.nodes.get_mut(right_handle).set_parent(Some(root_handle));
                self.root = root_handle;
                debug!("root split; tree height is now {}", self.height());

                if promoted {
                    inserted = Position::new(root_handle, 0);
                }
                return inserted;
            };

            // `insert_item` opens a null slot at `slot`, shifting `current` one to the right.
            let parent_node = self.nodes.get_mut(parent);
            let slot = parent_node.index_of_child(current);
            parent_node.insert_item(slot, median.0, median.1);
            parent_node.set_child(slot, Some(current));
            parent_node.set_child(slot + 1, Some(right_handle));

            if promoted {
                inserted = Position::new(parent, slot);
            }
            if !parent_node.is_overfull() {
                return inserted;
            }
            current = parent;
        }
    }

    /// Restores minimum occupancy starting at `node`, rotating or merging up the tree.
    fn rebalance(&mut self, mut node: Handle) {
        loop {
            if !self.nodes.get(node).is_underfull() {
                return;
            }

            let left = self.left_sibling(node);
            let right = self.right_sibling(node);

            if let Some(left) = left
                && self.nodes.get(left.node).has_spare_item()
            {
                self.rotate_right(node, left);
                return;
            }

            if let Some(right) = right
                && self.nodes.get(right.node).has_spare_item()
            {
                self.rotate_left(node, right);
                return;
            }

            let (left_node, right_node, separator) = match (left, right) {
                (Some(left), _) => (left.node, node, left.separator),
                (None, Some(right)) => (node, right.node, right.separator),
                (None, None) => panic!("`RawBTree::rebalance()` - underfull node has no siblings!"),
            };
            let parent = separator.node();
            self.merge(left_node, right_node, separator);

            let parent_node = self.nodes.get(parent);
            if parent_node.is_root() && parent_node.is_empty() {
                self.nodes.free(parent);
                self.nodes.get_mut(left_node).set_parent(None);
                self.root = left_node;
                debug!("root emptied by merge; tree height is now {}", self.height());
                return;
            }
            node = parent;
        }
    }

    /// Moves the left sibling's last item up into the separator and the old
    /// separator down to the front of `node`.
    fn rotate_right(&mut self, node: Handle, left: Sibling) {
        trace!("rotate right into {node:?} from {:?}", left.node);
        let (item, child) = self.nodes.get_mut(left.node).pop_back();
        let separator = self.nodes.get_mut(left.separator.node()).item_mut(left.separator.index());
        let separator = core::mem::replace(separator, item);
        self.nodes.get_mut(node).push_front(separator, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(node));
        }
    }

    /// Moves the right sibling's first item up into the separator and the old
    /// separator down to the end of `node`.
    fn rotate_left(&mut self, node: Handle, right: Sibling) {
        trace!("rotate left into {node:?} from {:?}", right.node);
        let (item, child) = self.nodes.get_mut(right.node).pop_front();
        let separator = self.nodes.get_mut(right.separator.node()).item_mut(right.separator.index());
        let separator = core::mem::replace(separator, item);
        self.nodes.get_mut(node).push_back(separator, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(node));
        }
    }

    /// Folds `separator` and all of `right` into `left`, then frees `right`.
    fn merge(&mut self, left: Handle, right: Handle, separator: Position) {
        trace!("merge {right:?} into {left:?}");
        let right_node = self.nodes.take(right);
        let (item, removed) = self.nodes.get_mut(separator.node()).remove_separator(separator.index());
        assert_eq!(removed, Some(right), "`RawBTree::merge()` - separator does not flank `right`!");
        self.nodes.get_mut(left).absorb(item, right_node);
        self.adopt_children(left);
    }
}

impl<K, V, const M: usize, C: Comparator<K>> RawBTree<K, V, M, C> {
    /// Searches for a key and returns its position if found.
    pub(crate) fn find(&self, key: &K) -> Option<Position> {
        let mut current = self.root;
        loop {
            let node = self.nodes.get(current);
            match node.locate(key, &self.comparator) {
                SearchResult::Found(index) => return Some(Position::new(current, index)),
                SearchResult::NotFound(index) => current = node.child(index)?,
            }
        }
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns the position of the pair holding `key` and whether it was newly inserted.
    /// An existing pair is left untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let mut current = self.root;
        let index = loop {
            let node = self.nodes.get(current);
            match node.locate(&key, &self.comparator) {
                SearchResult::Found(index) => return (Position::new(current, index), false),
                SearchResult::NotFound(index) => match node.child(index) {
                    Some(child) => current = child,
                    None => break index,
                },
            }
        };

        self.len += 1;
        let leaf = self.nodes.get_mut(current);
        let was_full = leaf.is_full();
        // A full leaf becomes overfull here and is split right after.
        leaf.insert_item(index, key, value);
        let inserted = Position::new(current, index);

        if was_full {
            (self.split_and_propagate(current, inserted), true)
        } else {
            (inserted, true)
        }
    }

    /// Removes a key from the tree and returns the key-value pair.
    pub(crate) fn remove(&mut self, key: &K) -> Option<Item<K, V>> {
        let position = self.find(key)?;
        self.remove_at(position)
    }

    /// Removes the item at `position`, returning it, or `None` if the position
    /// does not address an item.
    ///
    /// # Panics
    ///
    /// Panics if an internal node holds an item with neither an in-order
    /// predecessor nor successor; the tree structure is broken at that point.
    pub(crate) fn remove_at(&mut self, position: Position) -> Option<Item<K, V>> {
        let node = self.nodes.try_get(position.node())?;
        if position.index() >= node.len() {
            return None;
        }

        let (removed, deficient) = if node.is_leaf() {
            (self.nodes.get_mut(position.node()).remove_item(position.index()), position.node())
        } else {
            let replacement = self
                .in_order_predecessor(position)
                .or_else(|| self.in_order_successor(position))
                .expect("`RawBTree::remove_at()` - internal item has no in-order predecessor or successor!");
            let item = self.nodes.get_mut(replacement.node()).remove_item(replacement.index());
            let slot = self.nodes.get_mut(position.node()).item_mut(position.index());
            (core::mem::replace(slot, item), replacement.node())
        };

        self.len -= 1;
        self.rebalance(deficient);
        Some(removed)
    }
}
