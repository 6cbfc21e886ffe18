//! The tree engine shared by [`Map`][crate::Map], [`Set`][crate::Set], and
//! [`MultiSet`][crate::MultiSet].
//!
//! A [`Tree`] is an unbalanced Binary Search Tree whose nodes carry a link back to their parent.
//! The parent links are what let a [`Cursor`] step to the next or previous element in `O(height)`
//! without keeping a stack of the nodes above it. There is no rebalancing, so inserting keys in
//! sorted order builds a tree shaped like a linked list and every operation degrades to `O(N)`.
//!
//! Whether an equal key is rejected or stored again is decided by the tree's
//! [`DuplicatePolicy`].
//!
//! # Examples
//!
//! ```
//! use ordtree::policy::Duplicates;
//! use ordtree::tree::Tree;
//!
//! let mut tree: Tree<i32, &str, Duplicates> = Tree::new();
//! tree.insert(2, "two");
//! tree.insert(1, "one");
//! tree.insert(2, "deux");
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.count(&2), 2);
//! assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [1, 2, 2]);
//!
//! // Erasing removes every node with the key.
//! assert_eq!(tree.erase(&2), 2);
//! assert_eq!(tree.len(), 1);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::cursor::{Cursor, CursorMut, Iter};
use crate::node::{Arena, Handle, Node, NodeId, TreeId};
use crate::policy::{DuplicatePolicy, Unique};

/// An unbalanced Binary Search Tree with parent links, storing `V`s under `K`s. `P` decides what
/// happens when a key is inserted twice.
pub struct Tree<K, V, P = Unique> {
    nodes: Arena<K, V>,
    root: Option<NodeId>,
    len: usize,
    id: TreeId,
    policy: PhantomData<P>,
}

impl<K, V, P> Default for Tree<K, V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P> Clone for Tree<K, V, P>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len);
        tree.copy_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl<K, V, P> fmt::Debug for Tree<K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P> Tree<K, V, P> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            id: TreeId::next(),
            policy: PhantomData,
        }
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node, leaving an empty tree. Handles issued before the call go stale.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(released = self.len, "clearing tree");

        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.id = TreeId::next();
    }

    /// Moves every node out into a new tree, leaving this one empty but usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree: Tree<_, _> = Tree::new();
    /// tree.insert(1, 1);
    ///
    /// let moved = tree.take();
    /// assert_eq!(moved.len(), 1);
    /// assert!(tree.is_empty());
    /// ```
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Looks up the node for `key` and returns a cursor at it, or the end cursor if there isn't
    /// one. When the tree holds duplicates of `key`, the cursor lands on the one closest to the
    /// root.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, P>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.find_node(key))
    }

    /// Like [`Tree::find`] but the cursor can modify values.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, P>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let current = self.find_node(key);
        CursorMut::new(self, current)
    }

    /// Whether some node has the given key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Returns the value stored under `key`. See [`Tree::find`] for which node is picked when
    /// there are duplicates.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|id| &self.nodes[id].value)
    }

    /// Mutable version of [`Tree::get`].
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(key)?;
        Some(&mut self.nodes[id].value)
    }

    /// Counts the nodes with the given key.
    ///
    /// Duplicates always sit on the search path for their key (a duplicate is inserted by
    /// following that same path), so this walks one root-to-leaf path. That path is `O(height)`
    /// long, which becomes `O(N)` on a degenerate tree.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Equal => {
                    count += 1;
                    node.right
                }
                Ordering::Greater => node.right,
            };
        }
        count
    }

    /// The smallest key and its value.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.min_node(root)))
    }

    /// The largest key and its value. With duplicates this is the last of them in iteration
    /// order.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.max_node(root)))
    }

    /// A cursor at the smallest key, or at the end position when the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K, V, P> {
        Cursor::new(self, self.first_node())
    }

    /// The end position: one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, V, P> {
        Cursor::new(self, None)
    }

    /// Mutable version of [`Tree::begin`].
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, P> {
        let first = self.first_node();
        CursorMut::new(self, first)
    }

    /// Mutable version of [`Tree::end`].
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, P> {
        CursorMut::new(self, None)
    }

    /// Iterates over the keys and values in key order.
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(self)
    }

    /// Returns the key and value a handle refers to, if it still refers to a node of this tree.
    pub fn get_handle(&self, handle: Handle) -> Option<(&K, &V)> {
        self.resolve(handle).map(|id| self.entry(id))
    }

    /// Returns a cursor at the node a handle refers to, if it still refers to a node of this
    /// tree.
    pub fn cursor_at(&self, handle: Handle) -> Option<Cursor<'_, K, V, P>> {
        self.resolve(handle).map(|id| Cursor::new(self, Some(id)))
    }

    /// Mutable version of [`Tree::cursor_at`].
    pub fn cursor_mut_at(&mut self, handle: Handle) -> Option<CursorMut<'_, K, V, P>> {
        let id = self.resolve(handle)?;
        Some(CursorMut::new(self, Some(id)))
    }

    /// Walks the whole tree asserting that it is well formed: the root has no parent, every
    /// child points back at its parent, `len` matches the number of reachable nodes, and each
    /// node's left subtree is strictly smaller while its right subtree is not smaller (strictly
    /// larger unless `P` admits duplicates).
    ///
    /// This is `O(N * height)` and meant for tests.
    ///
    /// ## Panics
    ///
    /// When any of the above doesn't hold.
    pub fn check_invariants(&self)
    where
        K: Ord,
        P: DuplicatePolicy,
    {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "empty tree with non-zero len");
            return;
        };
        assert_eq!(self.nodes[root].parent, None, "root has a parent");

        let mut reachable = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[id];
            if let Some(left) = node.left {
                assert_eq!(self.nodes[left].parent, Some(id), "left child lost its parent");
                assert!(
                    self.nodes[self.max_node(left)].key < node.key,
                    "left subtree holds a key that isn't smaller"
                );
                stack.push(left);
            }
            if let Some(right) = node.right {
                assert_eq!(self.nodes[right].parent, Some(id), "right child lost its parent");
                let smallest = &self.nodes[self.min_node(right)].key;
                if P::ADMIT_DUPLICATES {
                    assert!(*smallest >= node.key, "right subtree holds a smaller key");
                } else {
                    assert!(*smallest > node.key, "right subtree holds a key that isn't larger");
                }
                stack.push(right);
            }
        }
        assert_eq!(reachable, self.len, "len doesn't match the reachable nodes");
    }

    #[cfg(test)]
    pub(crate) fn root_key(&self) -> Option<&K> {
        self.root.map(|root| &self.nodes[root].key)
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.nodes[id];
        (&node.key, &node.value)
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.nodes[id].value
    }

    pub(crate) fn handle(&self, id: NodeId) -> Handle {
        self.nodes.handle(self.id, id)
    }

    fn resolve(&self, handle: Handle) -> Option<NodeId> {
        self.nodes.resolve(self.id, handle)
    }

    /// Standard BST descent returning the first node with an equal key.
    pub(crate) fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub(crate) fn first_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.min_node(root))
    }

    pub(crate) fn last_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.max_node(root))
    }

    /// The leftmost node of the subtree rooted at `id`.
    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    /// The rightmost node of the subtree rooted at `id`.
    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// The next node in key order, or `None` if `id` is the last one.
    ///
    /// Without a right subtree the successor is the first ancestor reached from its left side.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.min_node(right));
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;
        while let Some(p) = parent {
            if self.nodes[p].right != Some(child) {
                break;
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    /// The previous node in key order, or `None` if `id` is the first one.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes[id].left {
            return Some(self.max_node(left));
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;
        while let Some(p) = parent {
            if self.nodes[p].left != Some(child) {
                break;
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    /// Puts the subtree rooted at `replacement` where `old` is hanging from its parent. `old`
    /// keeps its own links; the caller decides what happens to it.
    fn transplant(&mut self, old: NodeId, replacement: Option<NodeId>) {
        let parent = self.nodes[old].parent;
        match parent {
            None => self.root = replacement,
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = replacement,
            Some(p) => self.nodes[p].right = replacement,
        }
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    /// Unlinks the node `id` from the tree, frees it, and returns its key and value.
    ///
    /// # Diagram
    ///
    /// The interesting case is a node with two children. Its successor `s` (the leftmost node
    /// of its right subtree) has no left child, so `s` can first be replaced by its own right
    /// child and then take over the deleted node's position and both of its children:
    ///
    /// ```text
    ///       deleted                 s
    ///       /     \               /   \
    ///      l       r     ->      l     r
    ///             /                   /
    ///            s                   x
    ///             \
    ///              x
    /// ```
    ///
    /// When `s` is `r` itself only the last step is needed.
    fn delete_node(&mut self, id: NodeId) -> (K, V) {
        let (left, right) = {
            let node = &self.nodes[id];
            (node.left, node.right)
        };
        match (left, right) {
            (None, _) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = id, "deleting node without a left child");
                self.transplant(id, right);
            }
            (_, None) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = id, "deleting node without a right child");
                self.transplant(id, left);
            }
            (Some(left), Some(right)) => {
                let successor = self.min_node(right);
                #[cfg(feature = "tracing")]
                tracing::trace!(node = id, successor, "deleting node with two children");
                if successor != right {
                    let successor_right = self.nodes[successor].right;
                    self.transplant(successor, successor_right);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }
                self.transplant(id, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
            }
        }

        self.len -= 1;
        let node = self.nodes.free(id);

        if cfg!(debug_assertions) {
            if let Some(parent) = node.parent {
                self.assert_linked(parent);
            }
        }
        (node.key, node.value)
    }

    /// Checks that `id`'s children and parent all point back at it.
    fn assert_linked(&self, id: NodeId) {
        let node = &self.nodes[id];
        if let Some(left) = node.left {
            assert_eq!(self.nodes[left].parent, Some(id));
        }
        if let Some(right) = node.right {
            assert_eq!(self.nodes[right].parent, Some(id));
        }
        match node.parent {
            Some(parent) => {
                let parent = &self.nodes[parent];
                assert!(parent.left == Some(id) || parent.right == Some(id));
            }
            None => assert_eq!(self.root, Some(id)),
        }
    }

    /// Replaces this tree's nodes with copies of `source`'s, preserving its shape.
    ///
    /// The copy is made with an explicit stack so its depth isn't limited by the call stack.
    fn copy_from(&mut self, source: &Self)
    where
        K: Clone,
        V: Clone,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(nodes = source.len, "copying tree");

        self.clear();
        let Some(source_root) = source.root else {
            return;
        };

        let detached = |node: &Node<K, V>, parent| {
            Node::new(node.key.clone(), node.value.clone(), parent)
        };
        let root = self.nodes.alloc(detached(&source.nodes[source_root], None));
        self.root = Some(root);

        let mut stack = vec![(source_root, root)];
        while let Some((from, to)) = stack.pop() {
            let (left, right) = {
                let node = &source.nodes[from];
                (node.left, node.right)
            };
            if let Some(left) = left {
                let copy = self.nodes.alloc(detached(&source.nodes[left], Some(to)));
                self.nodes[to].left = Some(copy);
                stack.push((left, copy));
            }
            if let Some(right) = right {
                let copy = self.nodes.alloc(detached(&source.nodes[right], Some(to)));
                self.nodes[to].right = Some(copy);
                stack.push((right, copy));
            }
        }
        self.len = source.len;
    }
}

impl<K, V, P> Tree<K, V, P>
where
    P: DuplicatePolicy,
{
    /// Inserts `value` under `key`.
    ///
    /// If the key is already present and `P` rejects duplicates, nothing changes and the
    /// existing node's handle comes back with `false`: the first insert wins. Otherwise a new
    /// node is linked in and its handle comes back with `true`.
    ///
    /// ## Panics
    ///
    /// When the tree would hold more than `u32::MAX` nodes at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree: Tree<_, _> = Tree::new();
    /// let (first, inserted) = tree.insert(1, "a");
    /// assert!(inserted);
    ///
    /// let (second, inserted) = tree.insert(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(first, second);
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool)
    where
        K: Ord,
    {
        let (id, inserted) = self.insert_node(key, value);
        (self.handle(id), inserted)
    }

    /// Removes the nodes with the given key and returns how many were removed. That is at most
    /// one unless `P` admits duplicates, in which case every duplicate goes. A missing key
    /// removes nothing and returns zero.
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = 0;
        while let Some(id) = self.find_node(key) {
            self.delete_node(id);
            removed += 1;
            if !P::ADMIT_DUPLICATES {
                break;
            }
        }
        removed
    }

    /// Removes one node with the given key and returns its key and value. With duplicates, the
    /// node removed is the one [`Tree::find`] would return.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(key)?;
        Some(self.delete_node(id))
    }

    /// Descends to the key's position and links a new node there, unless the key is present and
    /// duplicates are rejected. Ties descend to the right.
    pub(crate) fn insert_node(&mut self, key: K, value: V) -> (NodeId, bool)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut goes_left = false;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Less => {
                    goes_left = true;
                    node.left
                }
                Ordering::Equal if !P::ADMIT_DUPLICATES => return (id, false),
                Ordering::Equal | Ordering::Greater => {
                    goes_left = false;
                    node.right
                }
            };
            parent = Some(id);
        }

        let id = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(id),
            Some(p) if goes_left => self.nodes[p].left = Some(id),
            Some(p) => self.nodes[p].right = Some(id),
        }
        self.len += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(node = id, parent = ?parent, len = self.len, "inserted node");

        if cfg!(debug_assertions) {
            self.assert_linked(id);
        }
        (id, true)
    }
}
