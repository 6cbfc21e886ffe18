//! Positions in a [`Tree`] and iteration over it.
//!
//! A [`Cursor`] sits either on a node or on the end position, one past the largest key. Moving
//! it only follows child and parent links, so no traversal stack is kept anywhere. Cursors
//! borrow the tree they walk: a tree can't be mutated (and so can't lose the node a cursor is
//! on) while a cursor over it exists.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Error, Map};
//!
//! let map = Map::from([(1, 'a'), (2, 'b')]);
//!
//! let mut cursor = map.end();
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor.get(), Some((&2, &'b')));
//!
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor, map.begin());
//!
//! // There is nothing before the first element.
//! assert_eq!(cursor.move_prev(), Err(Error::IteratorOutOfRange));
//! assert_eq!(cursor.key(), Some(&1));
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::node::{Handle, NodeId};
use crate::tree::Tree;

/// A read-only position in a [`Tree`].
pub struct Cursor<'a, K, V, P> {
    tree: &'a Tree<K, V, P>,
    /// `None` is the end position.
    current: Option<NodeId>,
}

impl<'a, K, V, P> Clone for Cursor<'a, K, V, P> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K, V, P> Copy for Cursor<'a, K, V, P> {}

/// Two cursors are equal when they are at the same position of the same tree, however they got
/// there.
impl<'a, K, V, P> PartialEq for Cursor<'a, K, V, P> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}
impl<'a, K, V, P> Eq for Cursor<'a, K, V, P> {}

impl<'a, K, V, P> fmt::Debug for Cursor<'a, K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some((key, value)) => f
                .debug_struct("Cursor")
                .field("key", key)
                .field("value", value)
                .finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

impl<'a, K, V, P> Cursor<'a, K, V, P> {
    pub(crate) fn new(tree: &'a Tree<K, V, P>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    /// Whether the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The key and value at the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.current.map(|id| tree.entry(id))
    }

    /// The key at the cursor.
    pub fn key(&self) -> Option<&'a K> {
        self.get().map(|(key, _)| key)
    }

    /// The value at the cursor.
    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, value)| value)
    }

    /// A handle to the element at the cursor, which outlives the cursor's borrow.
    pub fn handle(&self) -> Option<Handle> {
        self.current.map(|id| self.tree.handle(id))
    }

    /// Moves to the next element, or to the end position from the last element.
    ///
    /// # Errors
    ///
    /// [`Error::IteratorOutOfRange`] when already at the end position. The cursor doesn't move.
    pub fn move_next(&mut self) -> Result<()> {
        let id = self.current.ok_or(Error::IteratorOutOfRange)?;
        self.current = self.tree.successor(id);
        Ok(())
    }

    /// Moves to the previous element. From the end position this is the largest element.
    ///
    /// # Errors
    ///
    /// [`Error::IteratorOutOfRange`] when at the first element (or at the end position of an
    /// empty tree). The cursor doesn't move.
    pub fn move_prev(&mut self) -> Result<()> {
        let previous = match self.current {
            Some(id) => self.tree.predecessor(id),
            None => self.tree.last_node(),
        };
        self.current = Some(previous.ok_or(Error::IteratorOutOfRange)?);
        Ok(())
    }
}

/// A position in a [`Tree`] that can also modify the value it is at. Keys can't be modified
/// since that could break the ordering of the tree.
pub struct CursorMut<'a, K, V, P> {
    tree: &'a mut Tree<K, V, P>,
    current: Option<NodeId>,
}

impl<'a, K, V, P> fmt::Debug for CursorMut<'a, K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_cursor().fmt(f)
    }
}

impl<'a, K, V, P> CursorMut<'a, K, V, P> {
    pub(crate) fn new(tree: &'a mut Tree<K, V, P>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    /// A read-only cursor at the same position, e.g. for comparing positions.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, P> {
        Cursor::new(&*self.tree, self.current)
    }

    /// Whether the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The key at the cursor.
    pub fn key(&self) -> Option<&K> {
        self.as_cursor().key()
    }

    /// The value at the cursor.
    pub fn value(&self) -> Option<&V> {
        self.as_cursor().value()
    }

    /// The value at the cursor, mutably.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let id = self.current?;
        Some(self.tree.value_mut(id))
    }

    /// Turns the cursor into a mutable reference to its value that lives as long as the borrow
    /// of the tree.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let id = self.current?;
        Some(self.tree.value_mut(id))
    }

    /// A handle to the element at the cursor.
    pub fn handle(&self) -> Option<Handle> {
        self.as_cursor().handle()
    }

    /// See [`Cursor::move_next`].
    pub fn move_next(&mut self) -> Result<()> {
        let id = self.current.ok_or(Error::IteratorOutOfRange)?;
        self.current = self.tree.successor(id);
        Ok(())
    }

    /// See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) -> Result<()> {
        let previous = match self.current {
            Some(id) => self.tree.predecessor(id),
            None => self.tree.last_node(),
        };
        self.current = Some(previous.ok_or(Error::IteratorOutOfRange)?);
        Ok(())
    }
}

/// An iterator over the keys and values of a [`Tree`] in key order. Iterates from both ends.
pub struct Iter<'a, K, V, P> {
    tree: &'a Tree<K, V, P>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V, P> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, P> Iter<'a, K, V, P> {
    pub(crate) fn new(tree: &'a Tree<K, V, P>) -> Self {
        Self {
            tree,
            front: tree.first_node(),
            back: tree.last_node(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.successor(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, P> DoubleEndedIterator for Iter<'a, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }
}

impl<'a, K, V, P> ExactSizeIterator for Iter<'a, K, V, P> {}
impl<'a, K, V, P> FusedIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P> IntoIterator for &'a Tree<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a [`Tree`] in order.
pub struct Keys<'a, K, V, P>(pub(crate) Iter<'a, K, V, P>);

impl<'a, K, V, P> Clone for Keys<'a, K, V, P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, K, V, P> Iterator for Keys<'a, K, V, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V, P> DoubleEndedIterator for Keys<'a, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V, P> ExactSizeIterator for Keys<'a, K, V, P> {}
impl<'a, K, V, P> FusedIterator for Keys<'a, K, V, P> {}

/// An iterator over the values of a [`Tree`] in key order.
pub struct Values<'a, K, V, P>(pub(crate) Iter<'a, K, V, P>);

impl<'a, K, V, P> Clone for Values<'a, K, V, P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, K, V, P> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V, P> DoubleEndedIterator for Values<'a, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V, P> ExactSizeIterator for Values<'a, K, V, P> {}
impl<'a, K, V, P> FusedIterator for Values<'a, K, V, P> {}
