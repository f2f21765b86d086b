use thiserror::Error;

/// Recoverable usage errors reported by [`BTree`](crate::BTree).
///
/// Broken structural invariants are not represented here; they panic, since
/// continuing would silently corrupt the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The requested key is not present in the tree.
    #[error("key not found")]
    KeyNotFound,
    /// The position does not address an item of the tree, usually because the
    /// tree was mutated after the position was produced.
    #[error("position does not refer to an item in the tree")]
    InvalidPosition,
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
