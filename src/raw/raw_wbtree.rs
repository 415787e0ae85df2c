use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::size::Size;

/// The core weight-balanced order-statistic tree backing `WbTreeSet`.
///
/// Structure and sizes are maintained by the mutation paths below; queries
/// only ever read. Rebalancing is relaxed: a mutation repairs at most one
/// overweight subtree (the one closest to the mutation point), so the weight
/// bound holds amortized rather than after every single call.
#[derive(Clone)]
pub(crate) struct RawWbTree<T> {
    /// Arena storing every node; handles are stable across rebuilds.
    nodes: Arena<Node<T>>,
    /// Handle of the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Ancestors visited by a mutation, in descent order (root first).
///
/// Sixteen inline slots cover trees of several thousand elements before the
/// path spills to the heap.
type Path = SmallVec<[Handle; 16]>;

impl<T> RawWbTree<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of elements; every live arena slot is a linked node.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Smallest element: leftmost node from the root.
    pub(crate) fn min(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        Some(self.nodes.get(current).value())
    }

    /// Largest element: rightmost node from the root.
    pub(crate) fn max(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        Some(self.nodes.get(current).value())
    }

    /// Height in edges; -1 for the empty tree by convention.
    pub(crate) fn height(&self) -> isize {
        let Some(root) = self.root else { return -1 };
        let mut height = 0;
        let mut stack: Vec<(Handle, isize)> = Vec::new();
        stack.push((root, 0));
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            if let Some(left) = node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Ascending traversal of the whole tree.
    pub(crate) fn iter(&self) -> InOrder<'_, T> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            next_subtree: self.root,
            remaining: self.len(),
        }
    }

    /// Root-first traversal; the layout mirrors the most recent rebuilds,
    /// which makes it useful for diagnostics and shape assertions.
    pub(crate) fn preorder(&self) -> Preorder<'_, T> {
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        Preorder { tree: self, stack }
    }
}

impl<T: Ord> RawWbTree<T> {
    /// Builds a perfectly balanced tree from ascending, duplicate-free
    /// values in O(n).
    pub(crate) fn from_sorted_vec(values: Vec<T>) -> Self {
        let mut tree = Self::with_capacity(values.len());
        let sorted: Vec<Handle> = values.into_iter().map(|value| tree.nodes.insert(Node::new_leaf(value))).collect();
        tree.root = tree.relink_balanced(&sorted);
        tree
    }

    fn find<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            current = match value.cmp(node.value().borrow()) {
                Equal => return Some(current),
                Less => node.left()?,
                Greater => node.right()?,
            };
        }
    }

    pub(crate) fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(value).is_some()
    }

    /// Inserts `value`, returning false (and leaving the tree untouched) if
    /// an equal element is already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.insert(Node::new_leaf(value)));
            return true;
        };

        // Descend to the attachment point, recording every ancestor.
        let mut path = Path::new();
        let mut current = root;
        loop {
            path.push(current);
            let node = self.nodes.get(current);
            match value.cmp(node.value()) {
                Equal => return false,
                Less => match node.left() {
                    Some(left) => current = left,
                    None => {
                        let leaf = self.attach_leaf(value, current);
                        self.nodes.get_mut(current).set_left(Some(leaf));
                        break;
                    }
                },
                Greater => match node.right() {
                    Some(right) => current = right,
                    None => {
                        let leaf = self.attach_leaf(value, current);
                        self.nodes.get_mut(current).set_right(Some(leaf));
                        break;
                    }
                },
            }
        }

        self.refresh_sizes(&path);
        self.restore_balance(&path);
        true
    }

    fn attach_leaf(&mut self, value: T, parent: Handle) -> Handle {
        let mut leaf = Node::new_leaf(value);
        leaf.set_parent(Some(parent));
        self.nodes.insert(leaf)
    }

    /// Removes the element equal to `value` and returns it; `None` (and no
    /// mutation) if absent.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // Descend to the target, recording proper ancestors only.
        let mut path = Path::new();
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            match value.cmp(node.value().borrow()) {
                Equal => break,
                Less => {
                    path.push(current);
                    current = node.left()?;
                }
                Greater => {
                    path.push(current);
                    current = node.right()?;
                }
            }
        }

        let target = current;
        let node = self.nodes.get(target);
        let removed = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                // Two children: the target keeps its node but takes the
                // in-order successor's value; the successor (which has no
                // left child) is the node actually spliced out.
                path.push(target);
                let mut succ_parent = target;
                let mut succ = right;
                while let Some(left) = self.nodes.get(succ).left() {
                    path.push(succ);
                    succ_parent = succ;
                    succ = left;
                }
                let orphan = self.nodes.get(succ).right();
                if succ_parent == target {
                    self.nodes.get_mut(succ_parent).set_right(orphan);
                } else {
                    self.nodes.get_mut(succ_parent).set_left(orphan);
                }
                if let Some(orphan) = orphan {
                    self.nodes.get_mut(orphan).set_parent(Some(succ_parent));
                }
                let promoted = self.nodes.remove(succ).into_value();
                self.nodes.get_mut(target).replace_value(promoted)
            }
            (child, None) | (None, child) => {
                // Leaf or single child: splice the child (if any) into the
                // slot the target occupied.
                let parent = path.last().copied();
                match parent {
                    Some(parent) => {
                        if self.nodes.get(parent).left() == Some(target) {
                            self.nodes.get_mut(parent).set_left(child);
                        } else {
                            self.nodes.get_mut(parent).set_right(child);
                        }
                    }
                    None => self.root = child,
                }
                if let Some(child) = child {
                    self.nodes.get_mut(child).set_parent(parent);
                }
                self.nodes.remove(target).into_value()
            }
        };

        self.refresh_sizes(&path);
        self.restore_balance(&path);
        Some(removed)
    }

    /// Recomputes all three size fields of every path node, bottom-up, from
    /// its (possibly just-spliced) children.
    fn refresh_sizes(&mut self, path: &[Handle]) {
        for &handle in path.iter().rev() {
            let node = self.nodes.get(handle);
            let left_size = node.left().map_or(Size::ZERO, |child| self.nodes.get(child).subtree_size());
            let right_size = node.right().map_or(Size::ZERO, |child| self.nodes.get(child).subtree_size());
            self.nodes.get_mut(handle).set_sizes(left_size, right_size);
        }
    }

    /// Scans the mutation path from the touched node toward the root and
    /// rebuilds the first overweight subtree found, splicing the rebuilt
    /// root into the old root's parent slot. At most one rebuild runs per
    /// mutation, so the cost is bounded by the smallest violating subtree.
    fn restore_balance(&mut self, path: &[Handle]) {
        for &handle in path.iter().rev() {
            if !self.nodes.get(handle).is_overweight() {
                continue;
            }
            let parent = self.nodes.get(handle).parent();
            let was_left_child = parent.is_some_and(|p| self.nodes.get(p).left() == Some(handle));
            let rebuilt = self.rebuild(handle);
            match parent {
                None => self.root = Some(rebuilt),
                Some(parent) => {
                    if was_left_child {
                        self.nodes.get_mut(parent).set_left(Some(rebuilt));
                    } else {
                        self.nodes.get_mut(parent).set_right(Some(rebuilt));
                    }
                }
            }
            // The rebuild preserved the subtree's cardinality, so every
            // ancestor's size fields are already correct.
            self.nodes.get_mut(rebuilt).set_parent(parent);
            break;
        }
    }

    /// Flattens `subtree` in order and relinks the same nodes into a
    /// perfectly size-balanced shape, returning the new subtree root.
    /// Node slots are reused; only the scratch buffer allocates.
    fn rebuild(&mut self, subtree: Handle) -> Handle {
        let mut flat: Vec<Handle> = Vec::with_capacity(self.nodes.get(subtree).subtree_size().get());

        // In-order walk with an explicit stack; the subtree being rebuilt is
        // exactly the one whose depth got out of hand.
        let mut stack: Vec<Handle> = Vec::new();
        let mut current = Some(subtree);
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else { break };
            current = self.nodes.get(handle).right();
            self.nodes.get_mut(handle).reset_for_relink();
            flat.push(handle);
        }

        self.relink_balanced(&flat).expect("`RawWbTree::rebuild()` - subtree must be non-empty!")
    }

    /// Links a run of detached, ascending node handles into a perfectly
    /// balanced subtree and returns its root. Shared by [`from_sorted_vec`]
    /// and [`rebuild`]; sibling sizes differ by at most one everywhere.
    ///
    /// [`from_sorted_vec`]: RawWbTree::from_sorted_vec
    /// [`rebuild`]: RawWbTree::rebuild
    fn relink_balanced(&mut self, sorted: &[Handle]) -> Option<Handle> {
        if sorted.is_empty() {
            return None;
        }
        let mid = (sorted.len() - 1) / 2;
        let root = sorted[mid];
        let left = self.relink_balanced(&sorted[..mid]);
        let right = self.relink_balanced(&sorted[mid + 1..]);

        let mut left_size = Size::ZERO;
        let mut right_size = Size::ZERO;
        if let Some(child) = left {
            self.nodes.get_mut(child).set_parent(Some(root));
            left_size = self.nodes.get(child).subtree_size();
        }
        if let Some(child) = right {
            self.nodes.get_mut(child).set_parent(Some(root));
            right_size = self.nodes.get(child).subtree_size();
        }

        let node = self.nodes.get_mut(root);
        node.set_left(left);
        node.set_right(right);
        node.set_sizes(left_size, right_size);
        Some(root)
    }

    /// Selects the `i`-th smallest element, one-based. `None` outside
    /// `[1, len]`, which covers the empty tree.
    pub(crate) fn get_ith(&self, i: usize) -> Option<&T> {
        if i == 0 || i > self.len() {
            return None;
        }
        let mut current = self.root?;
        let mut remaining = i;
        loop {
            let node = self.nodes.get(current);
            let rank_here = node.left_size().get() + 1;
            match remaining.cmp(&rank_here) {
                Equal => return Some(node.value()),
                Less => current = node.left()?,
                Greater => {
                    remaining -= rank_here;
                    current = node.right()?;
                }
            }
        }
    }

    /// One-based rank of `value` in sorted order; the inverse of
    /// [`get_ith`](RawWbTree::get_ith). `None` if absent.
    pub(crate) fn position_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        let mut skipped = 0;
        loop {
            let node = self.nodes.get(current);
            match value.cmp(node.value().borrow()) {
                Equal => return Some(skipped + node.left_size().get() + 1),
                Less => current = node.left()?,
                Greater => {
                    skipped += node.left_size().get() + 1;
                    current = node.right()?;
                }
            }
        }
    }

    /// Number of elements `>= bound`, counting whole right subtrees.
    pub(crate) fn num_geq<Q>(&self, bound: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.value().borrow() >= bound {
                count += node.right_size().get() + 1;
                current = node.left();
            } else {
                current = node.right();
            }
        }
        count
    }

    /// Number of elements `<= bound`, counting whole left subtrees.
    pub(crate) fn num_leq<Q>(&self, bound: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.value().borrow() <= bound {
                count += node.left_size().get() + 1;
                current = node.right();
            } else {
                current = node.left();
            }
        }
        count
    }

    /// Number of elements strictly below `bound`.
    fn num_lt<Q>(&self, bound: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.value().borrow() < bound {
                count += node.left_size().get() + 1;
                current = node.right();
            } else {
                current = node.left();
            }
        }
        count
    }

    /// Number of elements in the closed range `[lo, hi]`; zero whenever
    /// `lo > hi`.
    pub(crate) fn num_range<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.num_leq(hi).saturating_sub(self.num_lt(lo))
    }

    /// Collects every element in `[lo, hi]` in ascending order. Only the
    /// boundary paths and the in-range nodes are visited: O(height + k).
    pub(crate) fn extract_range<Q>(&self, lo: &Q, hi: &Q) -> Vec<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut out = Vec::new();
        self.extract_into(self.root, lo, hi, &mut out);
        out
    }

    fn extract_into<'a, Q>(&'a self, current: Option<Handle>, lo: &Q, hi: &Q, out: &mut Vec<&'a T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = current else { return };
        let node = self.nodes.get(handle);
        let value = node.value().borrow();
        if value < lo {
            // This node and its whole left subtree sit below the range.
            self.extract_into(node.right(), lo, hi, out);
        } else if value > hi {
            self.extract_into(node.left(), lo, hi, out);
        } else {
            self.extract_into(node.left(), lo, hi, out);
            out.push(node.value());
            self.extract_into(node.right(), lo, hi, out);
        }
    }
}

/// Ascending borrowed traversal, driven by an explicit stack so iteration
/// never recurses.
pub(crate) struct InOrder<'a, T> {
    tree: &'a RawWbTree<T>,
    stack: Vec<Handle>,
    next_subtree: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.next_subtree {
            self.stack.push(handle);
            self.next_subtree = self.tree.nodes.get(handle).left();
        }
        let handle = self.stack.pop()?;
        let node = self.tree.nodes.get(handle);
        self.next_subtree = node.right();
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}
impl<T> core::iter::FusedIterator for InOrder<'_, T> {}

/// Root-first borrowed traversal.
pub(crate) struct Preorder<'a, T> {
    tree: &'a RawWbTree<T>,
    stack: Vec<Handle>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.nodes.get(self.stack.pop()?);
        // Right first so the left subtree is emitted before it.
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(node.value())
    }
}

impl<T> core::iter::FusedIterator for Preorder<'_, T> {}

#[cfg(test)]
impl<T: Ord> RawWbTree<T> {
    /// Asserts the structural invariants: BST order, parent back-links, and
    /// the three size fields at every node. The weight bound is relaxed (a
    /// mutation repairs only the violation nearest the mutation point), so
    /// it is deliberately not asserted here.
    pub(crate) fn assert_structure(&self) {
        match self.root {
            Some(root) => {
                assert_eq!(self.nodes.get(root).parent(), None, "root must not have a parent");
                let total = self.assert_subtree(root, None, None, None);
                assert_eq!(total, self.len(), "arena population must match the linked structure");
            }
            None => assert_eq!(self.len(), 0, "empty tree must have an empty arena"),
        }
    }

    fn assert_subtree(&self, handle: Handle, parent: Option<Handle>, low: Option<&T>, high: Option<&T>) -> usize {
        let node = self.nodes.get(handle);
        assert_eq!(node.parent(), parent, "parent back-link out of sync");
        if let Some(low) = low {
            assert!(node.value() > low, "BST order violated on the left bound");
        }
        if let Some(high) = high {
            assert!(node.value() < high, "BST order violated on the right bound");
        }

        let left = node.left().map_or(0, |child| self.assert_subtree(child, Some(handle), low, Some(node.value())));
        let right = node.right().map_or(0, |child| self.assert_subtree(child, Some(handle), Some(node.value()), high));

        let node = self.nodes.get(handle);
        assert_eq!(node.left_size().get(), left, "left_size disagrees with the left subtree");
        assert_eq!(node.right_size().get(), right, "right_size disagrees with the right subtree");
        assert_eq!(node.subtree_size().get(), left + right + 1, "subtree_size must be left + right + 1");
        left + right + 1
    }

    /// The strong bound that holds for freshly (re)built subtrees: sibling
    /// sizes differ by at most one, everywhere.
    pub(crate) fn assert_perfectly_balanced(&self) {
        fn walk<T: Ord>(tree: &RawWbTree<T>, handle: Handle) {
            let node = tree.nodes.get(handle);
            let (l, r) = (node.left_size().get(), node.right_size().get());
            assert!(l.abs_diff(r) <= 1, "sibling sizes {l} and {r} differ by more than one");
            if let Some(left) = node.left() {
                walk(tree, left);
            }
            if let Some(right) = node.right() {
                walk(tree, right);
            }
        }
        if let Some(root) = self.root {
            walk(self, root);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec;
    use proptest::prelude::*;

    fn tree_of(values: impl IntoIterator<Item = i32>) -> RawWbTree<i32> {
        let mut tree = RawWbTree::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    fn preorder_vec(tree: &RawWbTree<i32>) -> Vec<i32> {
        tree.preorder().copied().collect()
    }

    #[test]
    fn empty_tree() {
        let tree: RawWbTree<i32> = RawWbTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.get_ith(1), None);
        assert_eq!(tree.position_of(&1), None);
        assert_eq!(tree.num_geq(&0), 0);
        assert_eq!(tree.iter().next(), None);
        tree.assert_structure();
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut tree = tree_of([5, 3, 8, 1, 9]);
        assert_eq!(tree.len(), 5);
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 5);
        tree.assert_structure();
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tree = tree_of([2, 4, 6]);
        assert_eq!(tree.remove(&5), None);
        assert_eq!(tree.len(), 3);
        tree.assert_structure();
    }

    // The worst case for an unbalanced BST: inserting ascending values. The
    // lazy rebuilds must keep height near log2(n) instead of n - 1.
    #[test]
    fn ascending_inserts_stay_shallow() {
        let tree = tree_of(1..=7);
        assert_eq!(tree.height(), 3);
        // Shape after the rebuild cascade, fixed by the median-split rule.
        assert_eq!(preorder_vec(&tree), vec![3, 1, 2, 5, 4, 6, 7]);
        tree.assert_structure();
    }

    #[test]
    fn rebuild_triggers_at_the_nearest_violation() {
        // Three ascending values force the first rebuild: the root 1 has
        // sizes (0, 2), violating 2 <= 2*0 + 1.
        let tree = tree_of([1, 2, 3]);
        assert_eq!(preorder_vec(&tree), vec![2, 1, 3]);
        tree.assert_perfectly_balanced();
    }

    #[test]
    fn remove_two_child_node_promotes_successor() {
        let mut tree = tree_of(1..=7);
        assert_eq!(tree.remove(&4), Some(4));
        // 5, the in-order successor, took 4's position in the shape.
        assert_eq!(preorder_vec(&tree), vec![3, 1, 2, 6, 5, 7]);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7]);
        assert!(!tree.contains(&4));
        tree.assert_structure();
    }

    #[test]
    fn remove_root_until_empty() {
        let mut tree = tree_of([4, 2, 6, 1, 3, 5, 7]);
        let mut expected: BTreeSet<i32> = (1..=7).collect();
        loop {
            let Some(root_value) = tree.preorder().next().copied() else { break };
            assert_eq!(tree.remove(&root_value), Some(root_value));
            expected.remove(&root_value);
            assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected.iter().copied().collect::<Vec<_>>());
            tree.assert_structure();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn from_sorted_is_perfectly_balanced() {
        let tree = RawWbTree::from_sorted_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(preorder_vec(&tree), vec![3, 1, 2, 4, 5]);
        assert_eq!(tree.height(), 2);
        tree.assert_structure();
        tree.assert_perfectly_balanced();

        let tree = RawWbTree::from_sorted_vec((0..1000).collect());
        assert_eq!(tree.height(), 9);
        tree.assert_structure();
        tree.assert_perfectly_balanced();
    }

    #[test]
    fn select_and_rank_on_a_known_tree() {
        let tree = RawWbTree::from_sorted_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.get_ith(3), Some(&3));
        assert_eq!(tree.position_of(&5), Some(5));
        assert_eq!(tree.num_geq(&3), 3);
        assert_eq!(tree.extract_range(&2, &4), vec![&2, &3, &4]);
        assert_eq!(tree.get_ith(0), None);
        assert_eq!(tree.get_ith(6), None);
        assert_eq!(tree.position_of(&17), None);
    }

    #[test]
    fn range_counts_against_bounds_between_elements() {
        let tree = RawWbTree::from_sorted_vec(vec![10, 20, 30, 40, 50]);
        assert_eq!(tree.num_geq(&25), 3);
        assert_eq!(tree.num_leq(&25), 2);
        assert_eq!(tree.num_range(&15, &45), 3);
        assert_eq!(tree.num_range(&11, &19), 0);
        // Inverted bounds saturate to zero instead of wrapping.
        assert_eq!(tree.num_range(&40, &20), 0);
        assert_eq!(tree.extract_range(&40, &20), Vec::<&i32>::new());
    }

    #[test]
    fn len_tracks_arena_population_through_rebuilds() {
        let mut tree = tree_of(0..100);
        assert_eq!(tree.len(), 100);
        for value in (0..100).step_by(2) {
            assert_eq!(tree.remove(&value), Some(value));
        }
        assert_eq!(tree.len(), 50);
        // Freed slots are recycled, not leaked.
        for value in 100..150 {
            assert!(tree.insert(value));
        }
        assert_eq!(tree.len(), 100);
        tree.assert_structure();
    }

    #[derive(Clone, Debug)]
    enum TreeOp {
        Insert(i16),
        Remove(i16),
    }

    fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
        let value = -400i16..400i16;
        prop_oneof![
            3 => value.clone().prop_map(TreeOp::Insert),
            2 => value.prop_map(TreeOp::Remove),
        ]
    }

    proptest! {
        /// Replays random mutations against `BTreeSet`, asserting agreement
        /// plus the structural invariants after every step, and that height
        /// stays amortized-logarithmic.
        #[test]
        fn mutations_match_btreeset(ops in prop::collection::vec(tree_op_strategy(), 1..600)) {
            let mut tree: RawWbTree<i16> = RawWbTree::new();
            let mut model: BTreeSet<i16> = BTreeSet::new();

            for op in ops {
                match op {
                    TreeOp::Insert(v) => prop_assert_eq!(tree.insert(v), model.insert(v)),
                    TreeOp::Remove(v) => prop_assert_eq!(tree.remove(&v), model.take(&v)),
                }
                tree.assert_structure();
                prop_assert_eq!(tree.len(), model.len());

                let n = tree.len();
                if n > 1 {
                    // Loose envelope over the lazy-rebuild behavior; the
                    // strict bound is only guaranteed amortized.
                    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                    let limit = (2.0 * (n as f64).log2()).ceil() as isize + 2;
                    prop_assert!(tree.height() <= limit, "height {} over limit {} at n = {}", tree.height(), limit, n);
                }
            }

            let ours: Vec<i16> = tree.iter().copied().collect();
            let theirs: Vec<i16> = model.iter().copied().collect();
            prop_assert_eq!(ours, theirs);
        }

        /// `position_of` inverts `get_ith` for every valid rank.
        #[test]
        fn rank_select_inverse(values in prop::collection::btree_set(-1000i32..1000i32, 0..300)) {
            let tree = RawWbTree::from_sorted_vec(values.iter().copied().collect());
            for i in 1..=tree.len() {
                let value = *tree.get_ith(i).expect("rank within [1, len]");
                prop_assert_eq!(tree.position_of(&value), Some(i));
            }
        }

        /// Counting queries agree with brute force over the sorted image.
        #[test]
        fn counting_queries_match_brute_force(
            values in prop::collection::btree_set(-500i32..500i32, 0..200),
            lo in -600i32..600i32,
            hi in -600i32..600i32,
        ) {
            let sorted: Vec<i32> = values.iter().copied().collect();
            let tree = RawWbTree::from_sorted_vec(sorted.clone());

            prop_assert_eq!(tree.num_geq(&lo), sorted.iter().filter(|&&v| v >= lo).count());
            prop_assert_eq!(tree.num_leq(&hi), sorted.iter().filter(|&&v| v <= hi).count());

            let in_range: Vec<i32> = sorted.iter().copied().filter(|&v| lo <= v && v <= hi).collect();
            prop_assert_eq!(tree.num_range(&lo, &hi), in_range.len());
            let extracted: Vec<i32> = tree.extract_range(&lo, &hi).into_iter().copied().collect();
            prop_assert_eq!(extracted, in_range);
        }

        /// Round trip: a sorted build reproduces exactly its input.
        #[test]
        fn from_sorted_round_trips(values in prop::collection::btree_set(any::<i32>(), 0..400)) {
            let sorted: Vec<i32> = values.iter().copied().collect();
            let tree = RawWbTree::from_sorted_vec(sorted.clone());
            tree.assert_structure();
            tree.assert_perfectly_balanced();
            let round_trip: Vec<i32> = tree.iter().copied().collect();
            prop_assert_eq!(round_trip, sorted);
        }
    }
}
