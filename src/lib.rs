//! An ordered-key dictionary backed by a parent-linked binary search tree.
//!
//! Point lookups, ordered traversal, successor ("next largest") queries, and
//! inclusive range queries, all in `O(height)` plus output size. Keys are
//! unique and immutable once inserted. Each node carries a non-owning
//! back-reference to its parent, which is what lets successor and range
//! queries walk the tree without an auxiliary stack — and what a hash table
//! or an unsorted list cannot offer at all.
//!
//! Nodes are stored in a contiguous arena and linked by indices, so there is
//! no per-node allocation and no ownership cycle through the parent links.
//! The tree performs no rebalancing: the shape is entirely determined by the
//! insertion and removal history.
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for key in vec![50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(key)?;
//! }
//!
//! let keys: Vec<i32> = tree.range_search(&35, &65).map(|node| *node.key()).collect();
//! assert_eq!(keys, [40, 50, 60]);
//!
//! tree.remove(&50)?;
//! assert_eq!(tree.root().map(|node| *node.key()), Some(60));
//! # Ok::<(), ordtree::TreeError<i32>>(())
//! ```

mod arena;

pub mod error;
pub mod tree;

pub use error::TreeError;
pub use tree::{Inorder, NodeRef, OrderedTree, Range};

/// Builds an [`OrderedTree`] from a list of keys
///
/// Duplicate keys are skipped, the same as collecting from an iterator.
#[macro_export(local_inner_macros)]
macro_rules! ordtree {
    // trailing comma case
    ($($key:expr,)+) => (ordtree!($($key),+));

    ( $($key:expr),* ) => {
        {
            let mut _tree = $crate::OrderedTree::new();
            $(
                let _ = _tree.insert($key);
            )*
            _tree
        }
    };
}
