use core::fmt;
use core::ops::Index;

use crate::comparator::{Comparator, Natural};
use crate::error::{Error, Result};
use crate::position::Position;
use crate::raw::RawBTree;

mod dump;
mod node_ref;

pub use dump::Dump;
pub use node_ref::NodeRef;

/// An ordered map based on a [B-Tree] of order `M`.
///
/// Every node holds at most `M - 1` key-value pairs and, when it is not the
/// root, at least `ceil(M / 2) - 1`. Inserting into a full leaf splits it
/// around its median and pushes the median into the parent, which may split
/// in turn; removing from a node that drops below the minimum borrows an item
/// from a sibling through the parent (a rotation) or merges with a sibling.
/// The tree therefore stays perfectly balanced: all leaves are at the same
/// depth and `find`, `insert` and `remove` all take O(log<sub>M</sub>(n) ·
/// log(M)) time, using binary search inside each node.
///
/// Keys are ordered by the comparator `C`, which defaults to the key's
/// [`Ord`] implementation. It is a logic error for a key to be modified in
/// such a way that its ordering relative to any other key changes while it is
/// in the tree. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `BTree` that observed it and not
/// result in undefined behavior.
///
/// The order must be greater than 2; smaller orders fail to compile when the
/// tree is constructed.
///
/// # Examples
///
/// ```
/// use order_btree::BTree;
///
/// let mut tree: BTree<u32, &str, 5> = BTree::new();
///
/// let (_, inserted) = tree.insert(1, "one");
/// assert!(inserted);
/// tree.insert(8, "eight");
/// tree.insert(2, "two");
///
/// // An existing key is never overwritten by `insert`.
/// let (position, inserted) = tree.insert(2, "deux");
/// assert!(!inserted);
/// assert_eq!(tree.entry_at(position), Ok((&2, &"two")));
///
/// assert_eq!(tree.at(&8), Ok(&"eight"));
/// assert!(tree.at(&3).is_err());
///
/// // Index-style access inserts a default value for a missing key.
/// let mut counts: BTree<&str, u32, 4> = BTree::new();
/// *counts.get_or_insert_default("apples") += 3;
/// *counts.get_or_insert_default("apples") += 1;
/// assert_eq!(counts[&"apples"], 4);
///
/// assert!(tree.remove(&1));
/// assert!(!tree.remove(&1));
/// assert_eq!(tree.len(), 2);
/// ```
///
/// [B-Tree]: https://en.wikipedia.org/wiki/B-tree
#[derive(Clone)]
pub struct BTree<K, V, const M: usize, C = Natural> {
    raw: RawBTree<K, V, M, C>,
}

impl<K, V, const M: usize> BTree<K, V, M, Natural> {
    /// Makes a new, empty `BTree` ordered by the key's [`Ord`] implementation.
    ///
    /// Does not allocate nodes beyond the empty root.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, &str, 4> = BTree::new();
    /// tree.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, const M: usize, C> BTree<K, V, M, C> {
    /// The order of the tree: the maximum number of children of a node.
    pub const ORDER: usize = M;
    /// Maximum number of key-value pairs in a node.
    pub const MAX_ITEMS: usize = M - 1;
    /// Minimum number of key-value pairs in a node other than the root.
    pub const MIN_ITEMS: usize = M.div_ceil(2) - 1;
    /// Maximum number of children of an internal node.
    pub const MAX_CHILDREN: usize = M;
    /// Minimum number of children of an internal node other than the root.
    pub const MIN_CHILDREN: usize = M.div_ceil(2);

    /// Makes a new, empty `BTree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::{BTree, Reverse};
    ///
    /// let mut tree: BTree<u32, (), 3, Reverse> = BTree::with_comparator(Reverse);
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    /// assert_eq!(tree.first_key_value(), Some((&2, &())));
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        BTree {
            raw: RawBTree::with_comparator(comparator),
        }
    }

    /// Returns the comparator ordering this tree.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of key-value pairs in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no key-value pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of node levels, counting the root and the leaves. An
    /// empty tree has height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, (), 3> = BTree::new();
    /// assert_eq!(tree.height(), 0);
    /// tree.extend((1..=7).map(|k| (k, ())));
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n))
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes every key-value pair.
    ///
    /// Nodes are freed in one pass over the node storage, without recursion.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a read-only view of the root node, for inspecting the shape of the tree.
    ///
    /// An empty tree has an empty root with no child slots.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, K, V, M> {
        NodeRef::new(self.raw.nodes(), self.raw.root())
    }

    /// Returns the pair with the smallest key, according to the comparator.
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n))
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let (k, v) = self.raw.item(self.raw.first()?)?;
        Some((k, v))
    }

    /// Returns the pair with the largest key, according to the comparator.
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n))
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let (k, v) = self.raw.item(self.raw.last()?)?;
        Some((k, v))
    }

    /// Returns the pair addressed by `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `position` no longer addresses an item.
    pub fn entry_at(&self, position: Position) -> Result<(&K, &V)> {
        let (k, v) = self.raw.item(position).ok_or(Error::InvalidPosition)?;
        Ok((k, v))
    }

    /// Returns a mutable reference to the value addressed by `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `position` no longer addresses an item.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, u32, 4> = BTree::new();
    /// let (position, _) = tree.insert(1, 10);
    /// *tree.value_at_mut(position).unwrap() += 1;
    /// assert_eq!(tree.at(&1), Ok(&11));
    /// ```
    pub fn value_at_mut(&mut self, position: Position) -> Result<&mut V> {
        self.raw.item_mut(position).map(|(_, v)| v).ok_or(Error::InvalidPosition)
    }

    /// Returns a [`Display`](fmt::Display) adapter rendering the node structure.
    ///
    /// See [`Dump`] for the layout.
    #[must_use]
    pub fn dump(&self) -> Dump<'_, K, V, M, C> {
        Dump::new(&self.raw)
    }

    /// Writes the node structure to `out`, one node per line.
    ///
    /// See [`Dump`] for the layout.
    ///
    /// # Errors
    ///
    /// Returns any error reported by `out`.
    pub fn print<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        K: fmt::Display,
        V: fmt::Display,
    {
        dump::render(&self.raw, out, |out, k, v| write!(out, "({k}, {v})"))
    }
}

impl<K, V, const M: usize, C: Comparator<K>> BTree<K, V, M, C> {
    /// Searches for `key` and returns the position of its pair.
    ///
    /// Absence is not an error; it is reported as `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, &str, 3> = BTree::new();
    /// tree.insert(1, "a");
    /// let position = tree.find(&1).unwrap();
    /// assert_eq!(tree.entry_at(position), Ok((&1, &"a")));
    /// assert_eq!(tree.find(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n) · log(M))
    #[must_use]
    pub fn find(&self, key: &K) -> Option<Position> {
        self.raw.find(key)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns a reference to the value corresponding to `key`.
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n) · log(M))
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let position = self.raw.find(key)?;
        self.raw.item(position).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = self.raw.find(key)?;
        self.raw.item_mut(position).map(|(_, v)| v)
    }

    /// Returns a reference to the value corresponding to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the tree does not contain `key`.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value corresponding to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the tree does not contain `key`.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Inserts a key-value pair unless `key` is already present.
    ///
    /// Returns the position of the pair holding `key` and whether a new pair
    /// was inserted. When the key already exists the tree is not modified and
    /// `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, &str, 3> = BTree::new();
    /// let (position, inserted) = tree.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(tree.entry_at(position), Ok((&37, &"a")));
    ///
    /// let (position, inserted) = tree.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(tree.entry_at(position), Ok((&37, &"a")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n) · log(M))
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.raw.insert(key, value)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is missing.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let (position, _) = self.raw.insert(key, V::default());
        match self.raw.item_mut(position) {
            Some((_, value)) => value,
            None => unreachable!("`BTree::get_or_insert_default()` - insert returned a dangling position"),
        }
    }

    /// Removes `key` from the tree. Returns `true` if it was present.
    ///
    /// # Complexity
    ///
    /// O(log<sub>M</sub>(n) · log(M))
    pub fn remove(&mut self, key: &K) -> bool {
        self.raw.remove(key).is_some()
    }

    /// Removes `key` from the tree, returning the stored key and value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, &str, 3> = BTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(tree.remove_entry(&1), None);
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove(key)
    }

    /// Removes the pair addressed by `position`. Returns `false` if the
    /// position does not address an item.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_btree::BTree;
    ///
    /// let mut tree: BTree<u32, &str, 3> = BTree::new();
    /// let (position, _) = tree.insert(1, "a");
    /// assert!(tree.remove_at(position));
    /// assert!(!tree.remove_at(position));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove_at(&mut self, position: Position) -> bool {
        self.raw.remove_at(position).is_some()
    }
}

impl<K, V, const M: usize, C: Default> Default for BTree<K, V, M, C> {
    /// Creates an empty `BTree`.
    fn default() -> Self {
        BTree::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, const M: usize, C> fmt::Debug for BTree<K, V, M, C> {
    /// Shows the node structure, with keys and values in their `Debug` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump::render(&self.raw, f, |out, k, v| write!(out, "({k:?}, {v:?})"))
    }
}

impl<K, V, const M: usize, C: Comparator<K>> Index<&K> for BTree<K, V, M, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BTree`.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, const M: usize, C: Comparator<K> + Default> FromIterator<(K, V)> for BTree<K, V, M, C> {
    /// Builds a tree from the pairs in order; for a repeated key the first pair wins.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = BTree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, const M: usize, C: Comparator<K>> Extend<(K, V)> for BTree<K, V, M, C> {
    /// Inserts every pair; keys already in the tree keep their current value.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const M: usize, const N: usize> From<[(K, V); N]> for BTree<K, V, M, Natural>
where
    K: Ord,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}
