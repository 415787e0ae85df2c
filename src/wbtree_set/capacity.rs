use super::WbTreeSet;
use crate::raw::RawWbTree;

impl<T> WbTreeSet<T> {
    /// Creates an empty set whose node arena has room for at least
    /// `capacity` elements before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set: WbTreeSet<i32> = WbTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WbTreeSet {
            tree: RawWbTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the node arena can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set: WbTreeSet<i32> = WbTreeSet::with_capacity(32);
    /// assert_eq!(set.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
