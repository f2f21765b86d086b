//! An order-configurable B-tree map for Rust.
//!
//! This crate provides [`BTree`], an ordered key-value map whose node capacity
//! is chosen at compile time through a const generic order `M`. Every node
//! holds at most `M - 1` items and every non-root node at least
//! `ceil(M / 2) - 1`, so all leaves sit at the same depth.
//!
//! # Example
//!
//! ```
//! use order_btree::BTree;
//!
//! let mut tree: BTree<u32, &str, 3> = BTree::new();
//! for (k, v) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
//!     tree.insert(k, v);
//! }
//!
//! assert_eq!(tree.at(&3), Ok(&"c"));
//! assert_eq!(tree.height(), 2);
//!
//! // The root holds the first promoted median.
//! let root = tree.root();
//! assert_eq!(root.keys().copied().collect::<Vec<_>>(), [2]);
//!
//! assert!(tree.remove(&2));
//! assert_eq!(tree.len(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Configurable order** - Node capacity is a const generic, checked at compile time
//! - **Custom ordering** - Keys are ordered by a [`Comparator`], [`Natural`] by default
//! - **Stable positions** - [`insert`](BTree::insert) and [`find`](BTree::find) return a
//!   [`Position`] addressing the item until the tree is next modified
//!
//! # Implementation
//!
//! Nodes live in a contiguous arena and refer to each other through compact
//! handles. Insertion splits full nodes around their median on the way back to
//! the root; removal refills an underfull node by rotating an item through the
//! parent from an adjacent sibling, or merges the node with a sibling and
//! repeats one level up. Internal items are removed by swapping in their
//! in-order predecessor (or successor) from a leaf.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod btree;
mod comparator;
mod error;
mod position;
mod raw;

pub use btree::{BTree, Dump, NodeRef};
pub use comparator::{Comparator, Natural, OrderBy, Reverse};
pub use error::{Error, Result};
pub use position::Position;
