use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{InOrder, RawWbTree};

mod capacity;
mod order_statistic;
mod range;

/// An ordered set backed by a weight-balanced, size-augmented binary search
/// tree.
///
/// `WbTreeSet` stores unique values (a set, not a multiset - inserting an
/// element that is already present is a no-op). On top of the usual ordered
/// set operations it answers order-statistic queries in O(log n): the i-th
/// smallest element, the rank of a value, and counts of elements relative to
/// a bound or inside a closed range.
///
/// The tree rebalances lazily. A mutation walks back up the path it touched
/// and rebuilds the first subtree whose sibling sizes are more than roughly a
/// factor of two apart - and only that one. Height is therefore logarithmic
/// amortized rather than strictly per-operation, which keeps the common
/// mutation cheap: most inserts and removals rebuild nothing.
///
/// Nodes live in an index-based arena owned by the set; no element outlives
/// it and there is no unsafe code anywhere in the structure.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the [`Ord`]
/// trait, changes while it is in the set. The behavior resulting from such a
/// logic error is not specified but will not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use wb_ostree::WbTreeSet;
///
/// let mut ports = WbTreeSet::new();
///
/// ports.insert(443);
/// ports.insert(22);
/// ports.insert(8080);
///
/// assert!(ports.contains(&22));
/// assert_eq!(ports.min(), Some(&22));
///
/// // How many ports at or above 1024?
/// assert_eq!(ports.num_geq(&1024), 1);
///
/// ports.remove(&8080);
/// assert_eq!(ports.to_vec(), [22, 443]);
/// ```
#[derive(Clone)]
pub struct WbTreeSet<T> {
    tree: RawWbTree<T>,
}

impl<T> WbTreeSet<T> {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set: WbTreeSet<i32> = WbTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RawWbTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes all elements from the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let mut set = WbTreeSet::from([1, 2]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest element, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([3, 1, 2]);
    /// assert_eq!(set.min(), Some(&1));
    /// assert_eq!(WbTreeSet::<i32>::new().min(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the largest element, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([3, 1, 2]);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns the height of the tree in edges: 0 for a single element and,
    /// by convention, -1 for the empty set.
    ///
    /// Because rebalancing is lazy, the height is logarithmic amortized; it
    /// is not a strict per-operation bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// assert_eq!(WbTreeSet::<i32>::new().height(), -1);
    ///
    /// // Ascending inserts would build a height-6 spine without rebalancing.
    /// let set = WbTreeSet::from_sorted_vec((1..=7).collect());
    /// assert_eq!(set.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> isize {
        self.tree.height()
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }
}

impl<T: Ord> WbTreeSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned and the value is added.
    /// - If the set already contained an equal value, `false` is returned
    ///   and the set is left entirely unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let mut set = WbTreeSet::new();
    ///
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) amortized; a rebalancing insert additionally pays O(s) for
    /// the smallest out-of-balance subtree it repairs, of size s.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let mut set = WbTreeSet::from([1, 2, 3]);
    ///
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.to_vec(), [1, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) amortized, as for [`insert`](WbTreeSet::insert).
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let mut set = WbTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Returns true if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Builds a perfectly balanced set from a vector of values in one O(n)
    /// pass, with sibling subtree sizes differing by at most one everywhere.
    ///
    /// The caller guarantees that `values` is sorted ascending and free of
    /// duplicates; this is checked only by a debug assertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from_sorted_vec(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(set.to_vec(), [1, 2, 3, 4, 5]);
    /// assert_eq!(set.height(), 2);
    /// ```
    #[must_use]
    pub fn from_sorted_vec(values: Vec<T>) -> Self {
        debug_assert!(values.windows(2).all(|pair| pair[0] < pair[1]), "`WbTreeSet::from_sorted_vec()` - `values` must be ascending and unique!");
        Self {
            tree: RawWbTree::from_sorted_vec(values),
        }
    }
}

impl<T: Clone> WbTreeSet<T> {
    /// Returns the elements as a vector in ascending order; empty for the
    /// empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([2, 3, 1]);
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// assert!(WbTreeSet::<i32>::new().to_vec().is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.tree.iter().cloned().collect()
    }

    /// Returns the elements in preorder (each subtree root before its
    /// children). The layout exposes the internal shape left behind by the
    /// balancing rebuilds, which makes it useful for diagnostics and tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from_sorted_vec(vec![1, 2, 3]);
    /// assert_eq!(set.to_preorder_vec(), [2, 1, 3]);
    /// ```
    #[must_use]
    pub fn to_preorder_vec(&self) -> Vec<T> {
        self.tree.preorder().cloned().collect()
    }
}

impl<T> Default for WbTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for WbTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for WbTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for WbTreeSet<T> {}

impl<T: Ord> FromIterator<T> for WbTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for WbTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for WbTreeSet<T> {
    /// Converts a `[T; N]` into a `WbTreeSet<T>`. Duplicates collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use wb_ostree::WbTreeSet;
    ///
    /// let set = WbTreeSet::from([3, 1, 2, 1]);
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// ```
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a WbTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An iterator over the elements of a `WbTreeSet` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`WbTreeSet`].
///
/// [`iter`]: WbTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: InOrder<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
