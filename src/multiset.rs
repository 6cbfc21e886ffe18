//! An ordered multiset: like [`Set`][crate::Set] but equal keys are all kept.
//!
//! Every copy of a key is its own tree node. Equal keys descend to the right when inserted, so
//! they all end up on the search path for that key.
//!
//! # Examples
//!
//! ```
//! use ordtree::MultiSet;
//!
//! let mut set = MultiSet::from([20, 20, 30]);
//! assert_eq!(set.count(&20), 2);
//!
//! // Erasing a key removes every copy of it.
//! assert_eq!(set.erase(&20), 2);
//! assert_eq!(set.count(&20), 0);
//! assert_eq!(set.len(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::cursor::{Cursor, Keys};
use crate::node::Handle;
use crate::policy::Duplicates;
use crate::tree::Tree;

/// An ordered collection of keys that admits duplicates.
pub struct MultiSet<K> {
    tree: Tree<K, (), Duplicates>,
}

impl<K> Default for MultiSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for MultiSet<K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K: fmt::Debug> fmt::Debug for MultiSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for MultiSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for MultiSet<K> {}

impl<K> MultiSet<K> {
    /// Generates a new, empty `MultiSet`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Generates a new, empty `MultiSet` with room for `capacity` keys before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// The number of keys, counting every duplicate.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves the keys into a new multiset, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            tree: self.tree.take(),
        }
    }

    /// A cursor at one of the copies of `key`, or the end cursor if there are none. Which copy
    /// is unspecified beyond being the same for the same tree shape; walk the cursor to visit
    /// the others.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, (), Duplicates>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// Whether at least one copy of `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// How many copies of `key` are present.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(key, _)| key)
    }

    /// The largest key.
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(key, _)| key)
    }

    /// A cursor at the smallest key.
    pub fn begin(&self) -> Cursor<'_, K, (), Duplicates> {
        self.tree.begin()
    }

    /// The cursor one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, (), Duplicates> {
        self.tree.end()
    }

    /// Iterates over the keys in order, duplicates included.
    pub fn iter(&self) -> Keys<'_, K, (), Duplicates> {
        Keys(self.tree.iter())
    }

    /// The key a handle refers to, if that copy is still in this multiset.
    pub fn get_handle(&self, handle: Handle) -> Option<&K> {
        self.tree.get_handle(handle).map(|(key, _)| key)
    }

    /// A cursor at the copy a handle refers to, if it is still in this multiset.
    pub fn cursor_at(&self, handle: Handle) -> Option<Cursor<'_, K, (), Duplicates>> {
        self.tree.cursor_at(handle)
    }
}

impl<K: Ord> MultiSet<K> {
    /// Adds a copy of `key`. Always inserts, so the flag is always `true`; it is returned to
    /// match [`Set::insert`][crate::Set::insert].
    ///
    /// ## Panics
    ///
    /// When there would be more than `u32::MAX` keys at once.
    pub fn insert(&mut self, key: K) -> (Handle, bool) {
        self.tree.insert(key, ())
    }

    /// Inserts every key. Nothing is ever rejected, so this always reports `true`.
    pub fn insert_all<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter()
            .fold(true, |all, key| self.insert(key).1 && all)
    }

    /// Inserts every key, returning the result of each insert in order.
    pub fn insert_many<I>(&mut self, keys: I) -> Vec<(Handle, bool)>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Removes every copy of `key` and returns how many there were.
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase(key)
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for MultiSet<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Ord> FromIterator<K> for MultiSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for MultiSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K> IntoIterator for &'a MultiSet<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), Duplicates>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
