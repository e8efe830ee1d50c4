use std::borrow::Borrow;
use std::iter::FusedIterator;

use crate::arena::{Arena, Ptr};

use super::node::{InnerNode, NodeRef};
use super::{next_largest, OrderedTree};

/// An ascending walk over the nodes with keys in an inclusive range
///
/// Both endpoints are resolved once, up front: `current` starts at the first
/// node with key `>= lo` and `end` is the first node past `hi` (null when the
/// range runs off the top of the tree). Advancing is a successor step, so the
/// whole query costs O(height + k) for k yielded nodes. The iterator holds no
/// cursor state in the tree itself; a fresh call to
/// [`OrderedTree::range_search`] re-walks from scratch.
pub struct Range<'a, K> {
    nodes: &'a Arena<InnerNode<K>>,
    current: Ptr,
    end: Ptr,
}

impl<'a, K: Ord> Range<'a, K> {
    pub(super) fn new<Q>(tree: &'a OrderedTree<K>, lo: &Q, hi: &Q) -> Self
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let nodes = &tree.nodes;

        if tree.root.is_null() || lo > hi {
            return Self {
                nodes,
                current: Ptr::null(),
                end: Ptr::null(),
            };
        }

        // `locate` lands on the bound itself or on its would-be parent. A
        // would-be parent below the bound has no keys between itself and the
        // bound (the descent would have gone through them), so one successor
        // step reaches the first in-range node.
        let current = {
            let ptr = tree.locate(lo);
            if nodes.get(ptr).key.borrow() < lo {
                next_largest(nodes, ptr)
            } else {
                ptr
            }
        };

        // Same reasoning for the first node strictly past `hi`
        let end = {
            let ptr = tree.locate(hi);
            if nodes.get(ptr).key.borrow() <= hi {
                next_largest(nodes, ptr)
            } else {
                ptr
            }
        };

        Self {nodes, current, end}
    }
}

impl<'a, K> Iterator for Range<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }

        let node = NodeRef::new(self.nodes, self.current)?;
        self.current = next_largest(self.nodes, self.current);

        Some(node)
    }
}

impl<'a, K> FusedIterator for Range<'a, K> {}
