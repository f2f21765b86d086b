use alloc::vec::Vec;

use super::handle::Handle;
use crate::comparator::Comparator;

/// A key/value pair stored in a node.
pub(crate) type Item<K, V> = (K, V);

/// Result of searching for a key in a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is both the insertion point and the child to descend into.
    NotFound(usize),
}

/// Output of [`Node::split`]: the node itself keeps the left half.
pub(crate) struct Split<K, V, const M: usize> {
    /// Item promoted into the parent.
    pub(crate) median: Item<K, V>,
    /// Items and children that followed the median.
    pub(crate) right: Node<K, V, M>,
}

/// A B-tree node of order `M`.
///
/// `children` always holds `items.len() + 1` slots, except for an empty node
/// which holds none. A node whose slots are all `None` is a leaf.
#[derive(Clone)]
pub(crate) struct Node<K, V, const M: usize> {
    parent: Option<Handle>,
    items: Vec<Item<K, V>>,
    children: Vec<Option<Handle>>,
}

impl<K, V, const M: usize> Node<K, V, M> {
    pub(crate) const MAX_ITEMS: usize = M - 1;
    pub(crate) const MIN_ITEMS: usize = M.div_ceil(2) - 1;

    /// Creates an empty node attached to `parent`.
    pub(crate) fn new(parent: Option<Handle>) -> Self {
        Self {
            parent,
            // One spare slot each for the transient overfull state.
            items: Vec::with_capacity(M),
            children: Vec::with_capacity(M + 1),
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= Self::MAX_ITEMS
    }

    pub(crate) fn is_overfull(&self) -> bool {
        self.items.len() > Self::MAX_ITEMS
    }

    /// The root is never underfull, even when empty.
    pub(crate) fn is_underfull(&self) -> bool {
        !self.is_root() && self.items.len() < Self::MIN_ITEMS
    }

    /// Returns true if this node can give an item to a sibling and stay at or above the minimum.
    pub(crate) fn has_spare_item(&self) -> bool {
        self.items.len() > Self::MIN_ITEMS
    }

    #[inline]
    pub(crate) fn items(&self) -> &[Item<K, V>] {
        &self.items
    }

    #[inline]
    pub(crate) fn item(&self, index: usize) -> &Item<K, V> {
        &self.items[index]
    }

    #[inline]
    pub(crate) fn item_mut(&mut self, index: usize) -> &mut Item<K, V> {
        &mut self.items[index]
    }

    #[inline]
    pub(crate) fn children(&self) -> &[Option<Handle>] {
        &self.children
    }

    /// Returns the child in slot `index`, or `None` for a null or missing slot.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<Handle> {
        self.children.get(index).copied().flatten()
    }

    pub(crate) fn set_child(&mut self, index: usize, child: Option<Handle>) {
        self.children[index] = child;
    }

    pub(crate) fn first_child(&self) -> Option<Handle> {
        self.children.first().copied().flatten()
    }

    pub(crate) fn last_child(&self) -> Option<Handle> {
        self.children.last().copied().flatten()
    }

    /// Returns the slot index holding `child`.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not wired into this node.
    pub(crate) fn index_of_child(&self, child: Handle) -> usize {
        self.children
            .iter()
            .position(|&slot| slot == Some(child))
            .expect("`Node::index_of_child()` - `child` is not a child of this node!")
    }

    /// Binary search for `key` among this node's items.
    pub(crate) fn locate<C>(&self, key: &K, comparator: &C) -> SearchResult
    where
        C: Comparator<K> + ?Sized,
    {
        match self.items.binary_search_by(|(k, _)| comparator.compare(k, key)) {
            Ok(idx) => SearchResult::Found(idx),
            Err(idx) => SearchResult::NotFound(idx),
        }
    }

    /// Inserts `item` at `index` together with a null child slot at the same position.
    ///
    /// Inserting into a full node is allowed once; it leaves the node overfull
    /// until it is split.
    pub(crate) fn insert_item(&mut self, index: usize, key: K, value: V) {
        assert!(!self.is_overfull(), "`Node::insert_item()` - node is already overfull!");
        if self.items.is_empty() {
            self.items.push((key, value));
            self.children.push(None);
            self.children.push(None);
        } else {
            self.items.insert(index, (key, value));
            self.children.insert(index, None);
        }
    }

    /// Removes the item at `index` along with whichever flanking child slot is null.
    ///
    /// # Panics
    ///
    /// Panics if both flanking slots hold children, or if this is the only item
    /// and either flanking slot holds a child.
    pub(crate) fn remove_item(&mut self, index: usize) -> Item<K, V> {
        assert!(index < self.items.len(), "`Node::remove_item()` - `index` out of bounds!");
        if self.items.len() == 1 {
            assert!(
                self.children[0].is_none() && self.children[1].is_none(),
                "`Node::remove_item()` - last item still has children!"
            );
            self.children.clear();
        } else if self.children[index].is_none() {
            self.children.remove(index);
        } else if self.children[index + 1].is_none() {
            self.children.remove(index + 1);
        } else {
            panic!("`Node::remove_item()` - both flanking children are present!");
        }
        self.items.remove(index)
    }

    /// Removes the separator at `index` and the child slot to its right.
    ///
    /// Used by merges: the right child has already been folded into the left
    /// one. Unlike [`remove_item`](Self::remove_item) the left slot is kept
    /// even when this empties the node.
    pub(crate) fn remove_separator(&mut self, index: usize) -> (Item<K, V>, Option<Handle>) {
        let item = self.items.remove(index);
        let child = self.children.remove(index + 1);
        (item, child)
    }

    /// Pushes an item and the child slot before it to the front.
    pub(crate) fn push_front(&mut self, item: Item<K, V>, child: Option<Handle>) {
        self.ensure_child_slot();
        self.items.insert(0, item);
        self.children.insert(0, child);
    }

    /// Pushes an item and the child slot after it to the end.
    pub(crate) fn push_back(&mut self, item: Item<K, V>, child: Option<Handle>) {
        self.ensure_child_slot();
        self.items.push(item);
        self.children.push(child);
    }

    /// Pops the first item and the child slot before it.
    pub(crate) fn pop_front(&mut self) -> (Item<K, V>, Option<Handle>) {
        assert!(self.items.len() > 1, "`Node::pop_front()` - node would be left empty!");
        (self.items.remove(0), self.children.remove(0))
    }

    /// Pops the last item and the child slot after it.
    pub(crate) fn pop_back(&mut self) -> (Item<K, V>, Option<Handle>) {
        assert!(self.items.len() > 1, "`Node::pop_back()` - node would be left empty!");
        match (self.items.pop(), self.children.pop()) {
            (Some(item), Some(child)) => (item, child),
            _ => unreachable!(),
        }
    }

    /// Appends `separator` and then every item and child of `right`.
    pub(crate) fn absorb(&mut self, separator: Item<K, V>, right: Node<K, V, M>) {
        let Node {
            items: right_items,
            children: mut right_children,
            ..
        } = right;
        if right_children.is_empty() {
            right_children.push(None);
        }
        self.ensure_child_slot();
        self.items.push(separator);
        self.items.extend(right_items);
        self.children.extend(right_children);
    }

    /// Splits an overfull node at `M / 2`. This node keeps the items and
    /// children before the median; the rest move into the returned right node.
    ///
    /// # Panics
    ///
    /// Panics if the node does not hold exactly `M` items.
    pub(crate) fn split(&mut self) -> Split<K, V, M> {
        assert!(self.items.len() == M, "`Node::split()` - node is not overfull!");
        let mid = M / 2;

        let mut right = Node::new(self.parent);
        right.items.extend(self.items.drain(mid + 1..));
        right.children.extend(self.children.drain(mid + 1..));

        let median = match self.items.pop() {
            Some(item) => item,
            None => unreachable!(),
        };

        Split { median, right }
    }

    /// Inserts an empty child slot if the node has none, so that slot-pairing
    /// pushes work on a node that was drained to zero items.
    fn ensure_child_slot(&mut self) {
        if self.children.is_empty() {
            self.children.push(None);
        }
    }
}
