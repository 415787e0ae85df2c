/// A one-based rank into the sorted order of a set.
///
/// `Rank(1)` is the smallest element and `Rank(n)` the largest, matching the
/// convention of [`get_ith`](crate::WbTreeSet::get_ith) and
/// [`position_of`](crate::WbTreeSet::position_of).
///
/// # Examples
///
/// ```
/// use wb_ostree::{Rank, WbTreeSet};
///
/// let set = WbTreeSet::from([30, 10, 20]);
///
/// assert_eq!(set[Rank(1)], 10);
/// assert_eq!(set[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
