use alloc::vec::Vec;
use core::borrow::Borrow;

use super::WbTreeSet;

impl<T: Ord> WbTreeSet<T> {
    /// Counts the elements greater than or equal to `bound`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(set.num_geq(&3), 3);
    /// assert_eq!(set.num_geq(&6), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height); whenever a node's value clears the bound, its entire
    /// right subtree is counted through the size fields without visiting it.
    #[must_use]
    pub fn num_geq<Q>(&self, bound: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.num_geq(bound)
    }

    /// Counts the elements less than or equal to `bound`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(set.num_leq(&3), 3);
    /// assert_eq!(set.num_leq(&0), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn num_leq<Q>(&self, bound: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.num_leq(bound)
    }

    /// Counts the elements in the closed range `[lo, hi]`. Returns 0 when
    /// `lo > hi`.
    ///
    /// For any bounds, `set.num_range(lo, hi) == set.extract_range(lo, hi).len()`
    /// - but this runs in O(height) regardless of how many elements fall in
    /// the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([10, 20, 30, 40]);
    ///
    /// assert_eq!(set.num_range(&15, &35), 2);
    /// assert_eq!(set.num_range(&35, &15), 0);
    /// ```
    #[must_use]
    pub fn num_range<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.num_range(lo, hi)
    }
}

impl<T: Clone + Ord> WbTreeSet<T> {
    /// Collects the elements in the closed range `[lo, hi]` into a vector,
    /// in ascending order. The vector is empty (never absent) when nothing
    /// falls in the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(set.extract_range(&2, &4), [2, 3, 4]);
    /// assert!(set.extract_range(&6, &9).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height + k) for k extracted elements: only the two boundary paths
    /// and the in-range nodes are visited.
    #[must_use]
    pub fn extract_range<Q>(&self, lo: &Q, hi: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.extract_range(lo, hi).into_iter().cloned().collect()
    }
}
