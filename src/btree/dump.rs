use alloc::string::String;
use core::fmt::{self, Write};

use smallvec::SmallVec;

use crate::raw::{Handle, RawBTree};

/// Human-readable rendering of a [`BTree`](crate::BTree)'s node structure.
///
/// This `struct` is created by the [`dump`](crate::BTree::dump) method. Each
/// line shows one node's pairs in key order; subtrees follow their parent,
/// indented, with `` `-- `` marking a node's last child and `|-- ` the others.
/// The layout is a debugging aid and not a stable format.
///
/// # Examples
///
/// ```
/// use order_btree::BTree;
///
/// let tree: BTree<u32, char, 3> = [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')].into_iter().collect();
/// assert_eq!(
///     tree.dump().to_string(),
///     "(2, b)\n\
///      |-- (1, a)\n\
///      `-- (3, c) (4, d)\n"
/// );
/// ```
pub struct Dump<'a, K, V, const M: usize, C> {
    tree: &'a RawBTree<K, V, M, C>,
}

impl<'a, K, V, const M: usize, C> Dump<'a, K, V, M, C> {
    pub(crate) fn new(tree: &'a RawBTree<K, V, M, C>) -> Self {
        Self { tree }
    }
}

impl<K: fmt::Display, V: fmt::Display, const M: usize, C> fmt::Display for Dump<'_, K, V, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.tree, f, |out, k, v| write!(out, "({k}, {v})"))
    }
}

#[derive(Clone, Copy)]
enum Branch {
    Root,
    Middle,
    Last,
}

impl Branch {
    fn marker(self) -> &'static str {
        match self {
            Branch::Root => "",
            Branch::Middle => "|-- ",
            Branch::Last => "`-- ",
        }
    }

    /// Indentation inherited by this node's children.
    fn indent(self) -> &'static str {
        match self {
            Branch::Root => "",
            Branch::Middle => "|   ",
            Branch::Last => "    ",
        }
    }
}

struct Frame {
    handle: Handle,
    prefix: String,
    branch: Branch,
}

/// Writes the tree depth-first, pre-order, using an explicit stack. Nothing is
/// written for an empty tree.
pub(crate) fn render<K, V, const M: usize, C, W, F>(tree: &RawBTree<K, V, M, C>, out: &mut W, mut item: F) -> fmt::Result
where
    W: Write + ?Sized,
    F: FnMut(&mut W, &K, &V) -> fmt::Result,
{
    if tree.is_empty() {
        return Ok(());
    }

    let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();
    stack.push(Frame {
        handle: tree.root(),
        prefix: String::new(),
        branch: Branch::Root,
    });

    while let Some(Frame { handle, prefix, branch }) = stack.pop() {
        out.write_str(&prefix)?;
        out.write_str(branch.marker())?;

        let node = tree.node(handle);
        for (i, (k, v)) in node.items().iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            item(out, k, v)?;
        }
        out.write_char('\n')?;

        let children: SmallVec<[Handle; 16]> = node.children().iter().flatten().copied().collect();
        let child_prefix = prefix + branch.indent();
        // Pushed in reverse so the leftmost child is written first.
        for (i, &child) in children.iter().enumerate().rev() {
            stack.push(Frame {
                handle: child,
                prefix: child_prefix.clone(),
                branch: if i + 1 == children.len() { Branch::Last } else { Branch::Middle },
            });
        }
    }

    Ok(())
}
