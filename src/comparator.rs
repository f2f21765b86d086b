//! Key ordering used by [`BTree`](crate::BTree).

use core::cmp::Ordering;

/// Orders the keys of a [`BTree`](crate::BTree).
///
/// Implementations must describe a strict total order: `less_than` is
/// irreflexive and transitive, and exactly one of `less_than(a, b)`,
/// `equal_to(a, b)` and `less_than(b, a)` holds for any two keys. A comparator
/// that breaks this is a logic error; the tree will not be corrupted in a
/// memory-unsafe way, but lookups may miss keys that are present.
pub trait Comparator<K: ?Sized> {
    /// Returns `true` if `a` sorts strictly before `b`.
    fn less_than(&self, a: &K, b: &K) -> bool;

    /// Returns `true` if `a` and `b` identify the same entry.
    fn equal_to(&self, a: &K, b: &K) -> bool;

    /// Three-way comparison derived from [`less_than`](Self::less_than) and
    /// [`equal_to`](Self::equal_to).
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less_than(a, b) {
            Ordering::Less
        } else if self.equal_to(a, b) {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

/// Ascending order given by the key's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn less_than(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn equal_to(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order, the mirror image of [`Natural`].
///
/// # Examples
///
/// ```
/// use order_btree::{BTree, Reverse};
///
/// let mut tree: BTree<i32, &str, 4, Reverse> = BTree::default();
/// tree.insert(1, "one");
/// tree.insert(3, "three");
/// tree.insert(2, "two");
///
/// assert_eq!(tree.first_key_value(), Some((&3, &"three")));
/// assert_eq!(tree.last_key_value(), Some((&1, &"one")));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    #[inline]
    fn less_than(&self, a: &K, b: &K) -> bool {
        a > b
    }

    #[inline]
    fn equal_to(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Adapts a three-way comparison function into a [`Comparator`].
///
/// # Examples
///
/// ```
/// use order_btree::{BTree, OrderBy};
///
/// // Keys that differ only in sign are the same entry.
/// let by_magnitude = OrderBy(|a: &i32, b: &i32| a.unsigned_abs().cmp(&b.unsigned_abs()));
/// let mut tree: BTree<i32, &str, 3, _> = BTree::with_comparator(by_magnitude);
/// tree.insert(-5, "first");
///
/// let (_, inserted) = tree.insert(5, "second");
/// assert!(!inserted);
/// assert_eq!(tree.at(&5), Ok(&"first"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderBy<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for OrderBy<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn less_than(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b) == Ordering::Less
    }

    #[inline]
    fn equal_to(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b) == Ordering::Equal
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Relies only on the two required methods.
    struct ByParity;

    impl Comparator<u8> for ByParity {
        fn less_than(&self, a: &u8, b: &u8) -> bool {
            (a % 2, a) < (b % 2, b)
        }

        fn equal_to(&self, a: &u8, b: &u8) -> bool {
            a == b
        }
    }

    #[test]
    fn default_compare_uses_less_than_and_equal_to() {
        assert_eq!(ByParity.compare(&2, &1), Ordering::Less);
        assert_eq!(ByParity.compare(&3, &3), Ordering::Equal);
        assert_eq!(ByParity.compare(&5, &4), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn natural_matches_ord(a in any::<i32>(), b in any::<i32>()) {
            prop_assert_eq!(Natural.compare(&a, &b), a.cmp(&b));
            prop_assert_eq!(Natural.less_than(&a, &b), a < b);
            prop_assert_eq!(Natural.equal_to(&a, &b), a == b);
        }

        #[test]
        fn reverse_mirrors_natural(a in any::<i32>(), b in any::<i32>()) {
            prop_assert_eq!(Reverse.compare(&a, &b), Natural.compare(&b, &a));
            prop_assert_eq!(Reverse.less_than(&a, &b), Natural.less_than(&b, &a));
        }

        #[test]
        fn order_by_matches_function(a in any::<i64>(), b in any::<i64>()) {
            let by_abs = OrderBy(|x: &i64, y: &i64| x.unsigned_abs().cmp(&y.unsigned_abs()));
            prop_assert_eq!(by_abs.compare(&a, &b), a.unsigned_abs().cmp(&b.unsigned_abs()));
            prop_assert_eq!(by_abs.equal_to(&a, &b), a.unsigned_abs() == b.unsigned_abs());
        }
    }
}
