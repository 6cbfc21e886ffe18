//! An ordered set.
//!
//! # Examples
//!
//! ```
//! use ordtree::Set;
//!
//! let mut set = Set::from([3, 1, 2]);
//! assert!(!set.insert(2).1);
//! assert_eq!(set.len(), 3);
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(set.erase(&2), 1);
//! assert!(!set.contains(&2));
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::cursor::{Cursor, Keys};
use crate::node::Handle;
use crate::policy::Unique;
use crate::tree::Tree;

/// An ordered set of unique keys. The key is its own value, so the engine stores `()` beside it.
pub struct Set<K> {
    tree: Tree<K, (), Unique>,
}

impl<K> Default for Set<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for Set<K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K: fmt::Debug> fmt::Debug for Set<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for Set<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for Set<K> {}

impl<K> Set<K> {
    /// Generates a new, empty `Set`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Generates a new, empty `Set` with room for `capacity` keys before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// The number of keys.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set has no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves the keys into a new set, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            tree: self.tree.take(),
        }
    }

    /// A cursor at `key`, or the end cursor if it isn't in the set.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, (), Unique>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// Whether `key` is in the set.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// The stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).key()
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
    pub fn begin(&self) -> Cursor<'_, K, (), Unique> {
        self.tree.begin()
    }

    /// The cursor one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, (), Unique> {
        self.tree.end()
    }

    /// Iterates over the keys in order.
    pub fn iter(&self) -> Keys<'_, K, (), Unique> {
        Keys(self.tree.iter())
    }

    /// The key a handle refers to, if it is still in this set.
    pub fn get_handle(&self, handle: Handle) -> Option<&K> {
        self.tree.get_handle(handle).map(|(key, _)| key)
    }

    /// A cursor at the key a handle refers to, if it is still in this set.
    pub fn cursor_at(&self, handle: Handle) -> Option<Cursor<'_, K, (), Unique>> {
        self.tree.cursor_at(handle)
    }
}

impl<K: Ord> Set<K> {
    /// Adds `key` unless it is already present. Returns a handle to the stored key and whether
    /// the insert happened.
    ///
    /// ## Panics
    ///
    /// When there would be more than `u32::MAX` keys at once.
    pub fn insert(&mut self, key: K) -> (Handle, bool) {
        self.tree.insert(key, ())
    }

    /// Inserts every key and reports whether all of them were newly admitted. Every key is
    /// attempted even after one is rejected.
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

    /// Removes `key` and returns how many keys were removed (zero or one).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase(key)
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for Set<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Ord> FromIterator<K> for Set<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for Set<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K> IntoIterator for &'a Set<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), Unique>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;

    quickcheck::quickcheck! {
        fn matches_btreeset(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut set = Set::new();
            let mut oracle = BTreeSet::new();
            for x in &xs {
                if set.insert(*x).1 != oracle.insert(*x) {
                    return false;
                }
            }
            for delete in &deletes {
                if set.erase(delete) != usize::from(oracle.remove(delete)) {
                    return false;
                }
            }

            set.len() == oracle.len() && set.iter().eq(oracle.iter())
        }
    }
}
