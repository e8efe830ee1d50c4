use std::iter::FusedIterator;

use crate::arena::{Arena, Ptr};

use super::node::InnerNode;
use super::{leftmost, next_largest};

/// An in-order (ascending key) traversal of the tree
///
/// Unlike a stack-based traversal this walk is driven entirely by the parent
/// back-references: start at the leftmost node and repeatedly step to the
/// successor. The whole walk touches each edge at most twice, so iterating
/// the full tree is O(n).
pub struct Inorder<'a, K> {
    nodes: &'a Arena<InnerNode<K>>,
    current: Ptr,
}

impl<'a, K> Inorder<'a, K> {
    pub(super) fn new(nodes: &'a Arena<InnerNode<K>>, root: Ptr) -> Self {
        let current = if root.is_null() {
            Ptr::null()
        } else {
            leftmost(nodes, root)
        };

        Self {nodes, current}
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let ptr = self.current;
        if ptr.is_null() {
            return None;
        }

        self.current = next_largest(nodes, ptr);

        Some(&nodes.get(ptr).key)
    }
}

impl<'a, K> FusedIterator for Inorder<'a, K> {}
