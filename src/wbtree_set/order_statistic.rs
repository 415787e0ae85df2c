use core::borrow::Borrow;
use core::ops::Index;

use super::WbTreeSet;
use crate::Rank;

impl<T: Ord> WbTreeSet<T> {
    /// Returns the `i`-th smallest element, one-based: `get_ith(1)` is the
    /// minimum and `get_ith(len())` the maximum.
    ///
    /// Returns `None` whenever `i` is outside `[1, len()]` - in particular
    /// for every `i` on an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from_sorted_vec(vec![1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(set.get_ith(3), Some(&3));
    /// assert_eq!(set.get_ith(0), None);
    /// assert_eq!(set.get_ith(6), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height); the descent skips whole subtrees using the size fields.
    #[must_use]
    pub fn get_ith(&self, i: usize) -> Option<&T> {
        self.tree.get_ith(i)
    }

    /// Returns the one-based position `value` occupies in the sorted order
    /// of the set, or `None` if it is not present.
    ///
    /// This is the inverse of [`get_ith`](WbTreeSet::get_ith): for every
    /// `i` in `[1, len()]`, `set.position_of(set.get_ith(i).unwrap()) == Some(i)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([10, 20, 30]);
    ///
    /// assert_eq!(set.position_of(&10), Some(1));
    /// assert_eq!(set.position_of(&30), Some(3));
    /// assert_eq!(set.position_of(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn position_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.position_of(value)
    }
}

/// Indexes into the set by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is outside `[1, len()]`.
///
/// # Examples
///
/// ```
/// use wb_ostree::{Rank, WbTreeSet};
///
/// let set = WbTreeSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(2)], 20);
/// ```
impl<T: Ord> Index<Rank> for WbTreeSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_ith(rank.0).expect("rank out of bounds")
    }
}
