use std::fmt;
use std::ptr;

use crate::arena::{Arena, Ptr};

/// The in-arena representation of a single node
///
/// `left` and `right` point at the subtrees this node owns. `parent` is a
/// back-reference used only for upward walks; because it is an arena index
/// and not an owning edge, the parent/child cycle costs nothing to manage.
/// Exactly one node in a non-empty tree has a null `parent`: the root.
#[derive(Debug, Clone)]
pub(crate) struct InnerNode<K> {
    pub(crate) key: K,
    pub(crate) parent: Ptr,
    pub(crate) left: Ptr,
    pub(crate) right: Ptr,
}

impl<K> InnerNode<K> {
    pub(crate) fn new(key: K, parent: Ptr) -> Self {
        Self {
            key,
            parent,
            left: Ptr::null(),
            right: Ptr::null(),
        }
    }
}

/// An opaque handle to a single node of the tree
///
/// A handle borrows the tree, so it cannot outlive a mutating operation:
/// retaining one across an `insert` or `remove` (which may rearrange node
/// identities near the removed key) is a compile error rather than a runtime
/// hazard.
pub struct NodeRef<'a, K> {
    nodes: &'a Arena<InnerNode<K>>,
    ptr: Ptr,
}

impl<'a, K> Clone for NodeRef<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for NodeRef<'a, K> {}

impl<'a, K> PartialEq for NodeRef<'a, K> {
    /// Handle identity: two handles are equal when they name the same node of
    /// the same tree (similar to `Arc::ptr_eq`)
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.ptr == other.ptr
    }
}

impl<'a, K> Eq for NodeRef<'a, K> {}

impl<'a, K: fmt::Debug> fmt::Debug for NodeRef<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K> NodeRef<'a, K> {
    /// Creates a handle for the node at `ptr`, or `None` if `ptr` is null
    pub(crate) fn new(nodes: &'a Arena<InnerNode<K>>, ptr: Ptr) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self {nodes, ptr})
        }
    }

    pub(crate) fn ptr(self) -> Ptr {
        self.ptr
    }

    /// Returns true if this handle was issued by the given tree's storage
    pub(crate) fn belongs_to(self, nodes: &Arena<InnerNode<K>>) -> bool {
        ptr::eq(self.nodes, nodes)
    }

    /// Returns the key of this node
    ///
    /// Keys are immutable once inserted; there is no mutable counterpart.
    pub fn key(&self) -> &'a K {
        &self.nodes.get(self.ptr).key
    }

    /// Returns the parent of this node, or `None` if this node is the root
    pub fn parent(self) -> Option<Self> {
        Self::new(self.nodes, self.nodes.get(self.ptr).parent)
    }

    /// Returns the left child (root of the subtree of smaller keys), if any
    pub fn left(self) -> Option<Self> {
        Self::new(self.nodes, self.nodes.get(self.ptr).left)
    }

    /// Returns the right child (root of the subtree of larger keys), if any
    pub fn right(self) -> Option<Self> {
        Self::new(self.nodes, self.nodes.get(self.ptr).right)
    }
}
