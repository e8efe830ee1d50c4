mod node;
mod inorder;
mod range;

pub use node::NodeRef;
pub use inorder::Inorder;
pub use range::Range;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use crate::arena::{Arena, Ptr};
use crate::error::TreeError;

use node::InnerNode;

/// Follows `left` links from `start` until reaching a node with no left
/// child: the smallest key in `start`'s subtree
fn leftmost<K>(nodes: &Arena<InnerNode<K>>, start: Ptr) -> Ptr {
    let mut current = start;
    loop {
        let left = nodes.get(current).left;
        if left.is_null() {
            return current;
        }
        current = left;
    }
}

/// Returns the node holding the smallest key strictly greater than the key at
/// `ptr`, or null if that key is the maximum.
///
/// With a right subtree the successor is its leftmost node. Without one,
/// every descendant is smaller, so the walk goes upward instead until it
/// leaves some left subtree; that subtree's root is the first larger ancestor.
/// The "came up from the left child" test is structural and equivalent to
/// comparing keys on the way up.
fn next_largest<K>(nodes: &Arena<InnerNode<K>>, ptr: Ptr) -> Ptr {
    let right = nodes.get(ptr).right;
    if !right.is_null() {
        return leftmost(nodes, right);
    }

    let mut current = ptr;
    loop {
        let parent = nodes.get(current).parent;
        if parent.is_null() {
            // Reached the root from the right: `ptr` held the maximum key
            return Ptr::null();
        }
        if nodes.get(parent).left == current {
            return parent;
        }
        current = parent;
    }
}

/// An ordered-key dictionary backed by a parent-linked binary search tree
///
/// BST properties: for each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Keys are unique: inserting a key that is already present is rejected (see
/// [`OrderedTree::insert`]). Every node also carries a back-reference to its
/// parent, which is what makes successor and range queries O(height + k)
/// without an auxiliary stack.
///
/// Nodes live in an index-based arena, so the parent link is a plain index
/// rather than an owning edge and no reference-cycle bookkeeping is needed.
/// No rebalancing is performed; the shape of the tree is whatever the
/// insertion order produces, and the height may degrade to O(n) for
/// adversarial orders.
///
/// The ordering of keys is injected through the `Ord` bound; lookups accept
/// any borrowed form of the key type whose ordering matches, exactly like the
/// standard library collections.
#[derive(Clone)]
pub struct OrderedTree<K> {
    nodes: Arena<InnerNode<K>>,
    root: Ptr,
}

impl<K> Default for OrderedTree<K> {
    fn default() -> Self {
        Self {
            nodes: Arena::default(),
            root: Ptr::null(),
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for OrderedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("root", &self.root())
            .finish()
    }
}

impl<K: Ord> PartialEq for OrderedTree<K> {
    fn eq(&self, other: &Self) -> bool {
        // Two trees with the same keys may be shaped differently depending on
        // insertion order, so compare the in-order sequences instead of the
        // structures.
        self.len() == other.len()
            && self.iter_inorder().zip(other.iter_inorder()).all(|(a, b)| a == b)
    }
}

impl<K: Ord> Eq for OrderedTree<K> {}

impl<K: Ord> OrderedTree<K> {
    /// Creates an empty `OrderedTree`
    ///
    /// The tree is initially created with a capacity of 0, so it will not
    /// allocate until it is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::OrderedTree;
    /// let mut tree: OrderedTree<i32> = OrderedTree::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the specified capacity.
    ///
    /// The tree will be able to hold at least `capacity` nodes without
    /// reallocating. If `capacity` is 0, the tree will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: Ptr::null(),
        }
    }

    /// Returns the number of keys in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.nodes.is_empty() == self.root.is_null());
        self.nodes.is_empty()
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Descends from the root comparing against `key` and returns either the
    /// node holding exactly `key`, or the node that would become the parent
    /// of a node with that key.
    ///
    /// The dual-purpose result is what `insert` relies on; every caller that
    /// needs an exact match must verify the returned node's key itself.
    /// Callers must check for an empty tree first.
    fn locate<Q>(&self, key: &Q) -> Ptr
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        debug_assert!(!self.root.is_null());

        let mut current = self.root;
        loop {
            let node = self.nodes.get(current);
            let next = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return current,
            };
            if next.is_null() {
                // Key absent: `current` is where it would attach
                return current;
            }
            current = next;
        }
    }

    /// Returns a handle to the node holding the given key, or `None` if no
    /// such key exists in the tree
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::ordtree;
    ///
    /// let tree = ordtree![2, 1, 3];
    /// assert_eq!(tree.find(&3).map(|node| *node.key()), Some(3));
    /// assert!(tree.find(&4).is_none());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if self.root.is_null() {
            return None;
        }

        let ptr = self.locate(key);
        if key.cmp(self.nodes.get(ptr).key.borrow()) == Ordering::Equal {
            NodeRef::new(&self.nodes, ptr)
        } else {
            None
        }
    }

    /// Returns `true` if the tree contains the given key.
    ///
    /// Time complexity: `O(height)`
    pub fn contains<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the key in the tree equal to the given one, or
    /// `None` if no such key exists
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(String::from("abc")).unwrap();
    /// assert_eq!(tree.get("abc"), Some(&String::from("abc")));
    /// assert_eq!(tree.get("def"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.find(key).map(|node| node.key())
    }

    /// Inserts a new key into the tree
    ///
    /// Keys are unique: if the key is already present the tree is left
    /// untouched and the key is handed back inside
    /// [`TreeError::DuplicateKey`].
    ///
    /// Time complexity: `O(height)`; no rebalancing is performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.insert(37), Ok(()));
    /// assert_eq!(tree.insert(37), Err(TreeError::DuplicateKey(37)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), TreeError<K>> {
        if self.root.is_null() {
            debug_assert!(self.nodes.is_empty());
            self.root = self.nodes.push(InnerNode::new(key, Ptr::null()));
            return Ok(());
        }

        let parent = self.locate(&key);
        let ordering = key.cmp(&self.nodes.get(parent).key);
        if ordering == Ordering::Equal {
            return Err(TreeError::DuplicateKey(key));
        }

        let ptr = self.nodes.push(InnerNode::new(key, parent));
        let parent_node = self.nodes.get_mut(parent);
        match ordering {
            Ordering::Less => {
                debug_assert!(parent_node.left.is_null());
                parent_node.left = ptr;
            },
            Ordering::Greater => {
                debug_assert!(parent_node.right.is_null());
                parent_node.right = ptr;
            },
            Ordering::Equal => unreachable!(),
        }

        Ok(())
    }

    /// Returns a handle to the node holding the smallest key strictly greater
    /// than `node`'s key, or `None` if `node` holds the maximum key
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::ordtree;
    ///
    /// let tree = ordtree![50, 30, 70];
    /// let node = tree.find(&50).unwrap();
    /// assert_eq!(tree.successor(node).map(|next| *next.key()), Some(70));
    ///
    /// let max = tree.find(&70).unwrap();
    /// assert!(tree.successor(max).is_none());
    /// ```
    pub fn successor<'a>(&'a self, node: NodeRef<'a, K>) -> Option<NodeRef<'a, K>> {
        debug_assert!(node.belongs_to(&self.nodes), "node handle from a different tree");

        NodeRef::new(&self.nodes, next_largest(&self.nodes, node.ptr()))
    }

    /// Returns an iterator over the nodes with keys in the inclusive range
    /// `[lo, hi]`, in ascending key order
    ///
    /// The iterator is empty when no keys fall in the range, and when
    /// `lo > hi`. Each call re-walks from scratch; no cursor survives into
    /// later mutations.
    ///
    /// Time complexity: `O(height + k)` for `k` yielded nodes — the reason to
    /// reach for this structure over a hash table or a sorted array.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::ordtree;
    ///
    /// let tree = ordtree![50, 30, 70, 20, 40, 60, 80];
    /// let keys: Vec<i32> = tree.range_search(&35, &65).map(|node| *node.key()).collect();
    /// assert_eq!(keys, [40, 50, 60]);
    /// ```
    pub fn range_search<'a, Q>(&'a self, lo: &Q, hi: &Q) -> Range<'a, K>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        Range::new(self, lo, hi)
    }

    /// Removes a key from the tree, returning it.
    ///
    /// Fails with [`TreeError::EmptyTree`] on an empty tree and
    /// [`TreeError::KeyNotFound`] when the key is absent; either way the tree
    /// is left exactly as it was.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{ordtree, TreeError};
    ///
    /// let mut tree = ordtree![2, 1, 3];
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(TreeError::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<K, TreeError<K>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        if self.root.is_null() {
            return Err(TreeError::EmptyTree);
        }

        // `locate` may have returned a would-be parent; only an exact match
        // may be removed
        let target = self.locate(key);
        if key.cmp(self.nodes.get(target).key.borrow()) != Ordering::Equal {
            return Err(TreeError::KeyNotFound);
        }

        Ok(self.remove_at(target))
    }

    /// Unlinks the node at `target` and frees its arena slot, restoring all
    /// tree invariants.
    fn remove_at(&mut self, target: Ptr) -> K {
        let (parent, left, right) = {
            let node = self.nodes.get(target);
            (node.parent, node.left, node.right)
        };

        if right.is_null() {
            // Leaf or only-left: the left subtree (possibly empty) is
            // promoted into the removed node's slot. When the removed node is
            // the root this must go through the explicit root branch of
            // `replace_child`; the parent link is null and must not be
            // followed.
            if !left.is_null() {
                self.nodes.get_mut(left).parent = parent;
            }
            self.replace_child(parent, target, left);
        } else {
            // The in-order successor is the leftmost node of the right
            // subtree; by construction it has no left child, so splicing it
            // out of its own slot is cheap.
            let succ = leftmost(&self.nodes, right);
            debug_assert!(self.nodes.get(succ).left.is_null());

            if succ == right {
                // Direct-child successor: its right subtree is already
                // hanging where it belongs. Assigning `succ.right = right`
                // here would make the node its own child.
            } else {
                // Distant successor: patch the slot it vacates first. The
                // successor is the left child of its parent (a leftmost walk
                // ends on a left edge), and its former right subtree is
                // promoted into that slot.
                let (succ_parent, succ_right) = {
                    let node = self.nodes.get(succ);
                    (node.parent, node.right)
                };
                debug_assert_eq!(self.nodes.get(succ_parent).left, succ);
                self.nodes.get_mut(succ_parent).left = succ_right;
                if !succ_right.is_null() {
                    self.nodes.get_mut(succ_right).parent = succ_parent;
                }

                // Adopt the removed node's right subtree
                self.nodes.get_mut(succ).right = right;
                self.nodes.get_mut(right).parent = succ;
            }

            // Adopt the removed node's left subtree. The successor is greater
            // than every key in it, so it can never alias that child.
            self.nodes.get_mut(succ).left = left;
            if !left.is_null() {
                self.nodes.get_mut(left).parent = succ;
            }

            // Step into the removed node's slot
            self.nodes.get_mut(succ).parent = parent;
            self.replace_child(parent, target, succ);
        }

        // The node is fully unlinked; release its slot for reuse
        self.nodes.remove(target).key
    }

    /// Redirects whichever child link of `parent` named `old` to point at
    /// `new` instead. A null `parent` means `old` was the root.
    fn replace_child(&mut self, parent: Ptr, old: Ptr, new: Ptr) {
        if parent.is_null() {
            debug_assert_eq!(self.root, old);
            self.root = new;
            return;
        }

        let parent_node = self.nodes.get_mut(parent);
        if parent_node.left == old {
            parent_node.left = new;
        } else {
            debug_assert_eq!(parent_node.right, old);
            parent_node.right = new;
        }
    }

    /// Clears the tree, removing all keys
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Ptr::null();
    }

    /// Performs an in-order traversal of the tree, yielding keys in ascending
    /// order
    pub fn iter_inorder(&self) -> Inorder<'_, K> {
        Inorder::new(&self.nodes, self.root)
    }

    /// Returns a handle to the root node of the tree, or `None` if the tree
    /// is empty
    ///
    /// Which key sits at the root depends entirely on insertion and removal
    /// history. This is a low-level API meant for implementing custom
    /// traversals; for a guaranteed ordering use [`OrderedTree::iter_inorder`]
    /// or [`OrderedTree::range_search`].
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        NodeRef::new(&self.nodes, self.root)
    }

    /// Reserves capacity for at least `additional` more keys to be inserted
    /// in the tree. The collection may reserve more space to avoid frequent
    /// reallocations.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Shrinks the capacity of the tree as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }
}

impl<K: Ord> Extend<K> for OrderedTree<K> {
    /// Keys already present in the tree are skipped
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for OrderedTree<K> {
    /// Duplicate keys in the iterator are skipped
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
