//! A weight-balanced order-statistic set for Rust.
//!
//! This crate provides [`WbTreeSet`], an ordered set backed by a binary search
//! tree in which every node tracks the size of its subtrees. The augmentation
//! buys O(log n) order-statistic queries on top of the usual set operations:
//!
//! - [`get_ith`](WbTreeSet::get_ith) - Get the element at a given sorted position
//! - [`position_of`](WbTreeSet::position_of) - Get the sorted position of an element
//! - [`num_geq`](WbTreeSet::num_geq) / [`num_leq`](WbTreeSet::num_leq) /
//!   [`num_range`](WbTreeSet::num_range) - Count elements relative to bounds
//! - [`extract_range`](WbTreeSet::extract_range) - Collect every element in a
//!   closed range, in order, in O(log n + k)
//! - Indexing by [`Rank`] - e.g., `set[Rank(1)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use wb_ostree::WbTreeSet;
//!
//! let mut seen = WbTreeSet::new();
//! for id in [42, 7, 19, 3, 88] {
//!     seen.insert(id);
//! }
//!
//! // Standard set operations
//! assert!(seen.contains(&19));
//! assert_eq!(seen.len(), 5);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(seen.get_ith(2), Some(&7));       // second smallest
//! assert_eq!(seen.position_of(&42), Some(4));  // 42 is fourth smallest
//! assert_eq!(seen.num_range(&5, &50), 3);      // {7, 19, 42}
//! ```
//!
//! # Balancing
//!
//! The tree is *weight balanced*: at every node, the larger subtree may hold
//! at most `2 * smaller + 1` elements. The bound is restored lazily - after a
//! mutation, the path it touched is scanned from the mutation point toward the
//! root, and the first violating subtree (and only that one) is flattened and
//! rebuilt into a perfectly size-balanced shape. This keeps the height
//! logarithmic amortized while letting most mutations rebuild nothing at all.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in an index-based arena; the tree holds
//!   no raw pointers
//! - **O(log n) rank operations** - Efficient order-statistic queries via
//!   subtree size augmentation

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod wbtree_set;

pub use order_statistic::Rank;
pub use wbtree_set::WbTreeSet;
