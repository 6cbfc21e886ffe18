//! Tree cells and the arena that owns them.
//!
//! Every node of a [`Tree`][crate::tree::Tree] lives in one [`Arena`] owned by that tree. Links
//! between nodes (`left`, `right`, and the `parent` back-link) are [`NodeId`]s into the arena
//! rather than pointers, so a node's lifetime is decided only by the arena and never by which
//! other nodes happen to refer to it.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a node's slot in its [`Arena`].
pub(crate) type NodeId = u32;

/// Identifies one tree. Each new, cloned, or cleared tree gets a fresh id so a [`Handle`] can
/// never resolve against a tree other than the one that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque, copyable reference to an element of a container.
///
/// Insert operations return a `Handle` so the element can be found again after the mutable
/// borrow of the insert has ended. A handle does not keep its element alive: once the element is
/// erased (or the container is cleared) the handle goes stale and every lookup through it yields
/// `None`. Handles are also bound to the container that produced them; a copy of a container
/// does not accept the original's handles.
///
/// # Examples
///
/// ```
/// use ordtree::Map;
///
/// let mut map = Map::new();
/// let (handle, inserted) = map.insert(1, "one");
/// assert!(inserted);
/// assert_eq!(map.get_handle(handle), Some((&1, &"one")));
///
/// map.erase(&1);
/// assert_eq!(map.get_handle(handle), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    tree: TreeId,
    node: NodeId,
    generation: u32,
}

/// A tree cell. `left` holds strictly smaller keys; `right` holds larger keys, and also equal
/// keys when the tree admits duplicates. `parent` is only used to walk back up the tree.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<K, V> {
    /// Bumped every time the slot is freed so stale handles stop matching.
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Slot storage for nodes with a free list for reuse.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_list: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Stores `node` and returns the id of the slot it now occupies.
    ///
    /// ## Panics
    ///
    /// When every slot is taken and there are already `u32::MAX` of them.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.slots[id as usize].node = Some(node);
                id
            }
            None => {
                let id = NodeId::try_from(self.slots.len()).expect("arena exceeded u32::MAX nodes");
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                id
            }
        }
    }

    /// Removes the node at `id` and returns it. The slot's generation moves on, so handles to the
    /// removed node no longer resolve.
    ///
    /// ## Panics
    ///
    /// When `id` isn't a live node.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V> {
        let slot = &mut self.slots[id as usize];
        let node = slot.node.take().expect("freed a vacant arena slot");
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id);
        node
    }

    /// Drops every node. Slot ids restart from zero, so callers must also retire their
    /// [`TreeId`] before handing out new handles.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    pub(crate) fn handle(&self, tree: TreeId, id: NodeId) -> Handle {
        Handle {
            tree,
            node: id,
            generation: self.slots[id as usize].generation,
        }
    }

    /// Returns the node a handle refers to if it is still alive in this arena.
    pub(crate) fn resolve(&self, tree: TreeId, handle: Handle) -> Option<NodeId> {
        if handle.tree != tree {
            return None;
        }
        let slot = self.slots.get(handle.node as usize)?;
        (slot.generation == handle.generation && slot.node.is_some()).then_some(handle.node)
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.slots[id as usize]
            .node
            .as_ref()
            .expect("link to a vacant arena slot")
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.slots[id as usize]
            .node
            .as_mut()
            .expect("link to a vacant arena slot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.alloc(Node::new(1, 'a', None));
        let b = arena.alloc(Node::new(2, 'b', Some(a)));
        assert_eq!(arena[b].parent, Some(a));

        let freed = arena.free(a);
        assert_eq!((freed.key, freed.value), (1, 'a'));

        let c = arena.alloc(Node::new(3, 'c', None));
        assert_eq!(c, a);
        assert_eq!(arena[c].key, 3);
    }

    #[test]
    fn churn_does_not_grow_the_arena() {
        let mut arena = Arena::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|k| arena.alloc(Node::new(k, (), None))).collect();
        for round in 0..1000 {
            let id = ids[round % ids.len()];
            arena.free(id);
            assert_eq!(arena.alloc(Node::new(round, (), None)), id);
        }
        assert_eq!(arena.slots.len(), ids.len());
    }

    #[test]
    fn stale_handles_do_not_resolve() {
        let tree = TreeId::next();
        let mut arena = Arena::with_capacity(0);
        let id = arena.alloc(Node::new(1, (), None));
        let handle = arena.handle(tree, id);
        assert_eq!(arena.resolve(tree, handle), Some(id));

        arena.free(id);
        assert_eq!(arena.resolve(tree, handle), None);

        // Same slot, newer generation.
        let reused = arena.alloc(Node::new(2, (), None));
        assert_eq!(reused, id);
        assert_eq!(arena.resolve(tree, handle), None);
        assert_eq!(arena.resolve(tree, arena.handle(tree, reused)), Some(reused));
    }

    #[test]
    fn handles_are_bound_to_their_tree() {
        let tree = TreeId::next();
        let other = TreeId::next();
        let mut arena = Arena::with_capacity(0);
        let id = arena.alloc(Node::new(1, (), None));

        assert_eq!(arena.resolve(other, arena.handle(tree, id)), None);
    }
}
