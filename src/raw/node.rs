use core::mem;

use super::handle::Handle;
use super::size::Size;

/// A single tree vertex: one value, optional child links, an informational
/// parent back-link, and the size augmentation.
///
/// The parent handle exists so a rebuilt subtree can be spliced back into
/// place without re-searching from the root. It never owns anything and is
/// never used to free a node; getting it wrong can misroute a splice but
/// cannot double-free a slot.
#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    left_size: Size,
    right_size: Size,
    subtree_size: Size,
}

impl<T> Node<T> {
    /// Creates a detached leaf: no links, subtree of one.
    pub(crate) const fn new_leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
            left_size: Size::ZERO,
            right_size: Size::ZERO,
            subtree_size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    /// Swaps in a new value, returning the old one. Used when a two-child
    /// removal promotes the in-order successor's value.
    pub(crate) fn replace_value(&mut self, value: T) -> T {
        mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) const fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) const fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left_size(&self) -> Size {
        self.left_size
    }

    #[inline]
    pub(crate) const fn right_size(&self) -> Size {
        self.right_size
    }

    #[inline]
    pub(crate) const fn subtree_size(&self) -> Size {
        self.subtree_size
    }

    /// Records the child sizes and re-derives `subtree_size` from them, so
    /// the `left + right + 1` invariant cannot drift.
    pub(crate) fn set_sizes(&mut self, left_size: Size, right_size: Size) {
        self.left_size = left_size;
        self.right_size = right_size;
        self.subtree_size = Size::new(left_size.get() + right_size.get() + 1);
    }

    /// Returns true if the weight-balance bound is violated here:
    /// `max(left, right) > 2 * min(left, right) + 1`.
    pub(crate) fn is_overweight(&self) -> bool {
        let (l, r) = (self.left_size.get(), self.right_size.get());
        l.max(r) > 2 * l.min(r) + 1
    }

    /// Detaches the node for a rebuild: links cleared, sizes reset to a
    /// leaf's. The relink pass recomputes everything.
    pub(crate) fn reset_for_relink(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
        self.left_size = Size::ZERO;
        self.right_size = Size::ZERO;
        self.subtree_size = Size::ONE;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn leaf_defaults() {
        let node = Node::new_leaf(42);
        assert_eq!(*node.value(), 42);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.parent(), None);
        assert_eq!(node.subtree_size(), Size::ONE);
        assert!(!node.is_overweight());
    }

    #[test]
    fn set_sizes_rederives_total() {
        let mut node = Node::new_leaf(0);
        node.set_sizes(Size::new(3), Size::new(5));
        assert_eq!(node.subtree_size().get(), 9);
    }

    #[test]
    fn overweight_bound_is_tight() {
        let mut node = Node::new_leaf(0);

        // 2*0 + 1 = 1: a single-node sibling imbalance is tolerated...
        node.set_sizes(Size::ZERO, Size::ONE);
        assert!(!node.is_overweight());

        // ...but two against zero is not.
        node.set_sizes(Size::ZERO, Size::new(2));
        assert!(node.is_overweight());

        // 7 vs 3: 7 <= 2*3 + 1 holds exactly.
        node.set_sizes(Size::new(7), Size::new(3));
        assert!(!node.is_overweight());
        node.set_sizes(Size::new(8), Size::new(3));
        assert!(node.is_overweight());
    }

    #[test]
    fn replace_value_keeps_links() {
        let mut node = Node::new_leaf('a');
        node.set_left(Some(Handle::new(5)));
        assert_eq!(node.replace_value('b'), 'a');
        assert_eq!(*node.value(), 'b');
        assert_eq!(node.left(), Some(Handle::new(5)));
        assert_eq!(node.into_value(), 'b');
    }
}
