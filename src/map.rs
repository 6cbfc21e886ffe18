//! An ordered map with unique keys.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Error, Map};
//!
//! let mut map: Map<&str, i32> = Map::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.at(&"x"), Err(Error::KeyNotFound));
//!
//! // The first insert of a key wins.
//! assert!(map.insert("x", 1).1);
//! assert!(!map.insert("x", 2).1);
//! assert_eq!(map.at(&"x"), Ok(&1));
//!
//! // Indexing a missing key inserts a default value.
//! *map.get_or_insert_default("y") += 5;
//! assert_eq!(map.at(&"y"), Ok(&5));
//!
//! assert_eq!(map.erase(&"x"), 1);
//! assert_eq!(map.erase(&"x"), 0);
//! assert_eq!(map.len(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::cursor::{Cursor, CursorMut, Iter, Keys, Values};
use crate::error::{Error, Result};
use crate::node::Handle;
use crate::policy::Unique;
use crate::tree::Tree;

/// An ordered map. Each key appears at most once and inserting an existing key leaves the map
/// unchanged.
pub struct Map<K, V> {
    tree: Tree<K, V, Unique>,
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Map<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for Map<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Map<K, V> {}

impl<K, V> Map<K, V> {
    /// Generates a new, empty `Map`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Generates a new, empty `Map` with room for `capacity` entries before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves the entries into a new map, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            tree: self.tree.take(),
        }
    }

    /// A cursor at the entry for `key`, or the end cursor if there isn't one.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, Unique>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// A cursor at the entry for `key` that can modify its value, or the end cursor if there
    /// isn't one.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, Unique>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_mut(key)
    }

    /// Whether the map has an entry for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// The value for `key`, if there is one.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// The value for `key`, mutably, if there is one.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// The value for `key`. Never inserts.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the map has no entry for `key`.
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Mutable version of [`Map::at`].
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the map has no entry for `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// The smallest key and its value.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    /// The largest key and its value.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    /// A cursor at the smallest key.
    pub fn begin(&self) -> Cursor<'_, K, V, Unique> {
        self.tree.begin()
    }

    /// The cursor one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, V, Unique> {
        self.tree.end()
    }

    /// A cursor at the smallest key that can modify values.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, Unique> {
        self.tree.begin_mut()
    }

    /// The cursor one past the largest key, able to modify values once moved back.
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, Unique> {
        self.tree.end_mut()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V, Unique> {
        self.tree.iter()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> Keys<'_, K, V, Unique> {
        Keys(self.tree.iter())
    }

    /// Iterates over the values in key order.
    pub fn values(&self) -> Values<'_, K, V, Unique> {
        Values(self.tree.iter())
    }

    /// The entry a handle refers to, if it is still in this map.
    pub fn get_handle(&self, handle: Handle) -> Option<(&K, &V)> {
        self.tree.get_handle(handle)
    }

    /// A cursor at the entry a handle refers to, if it is still in this map.
    pub fn cursor_at(&self, handle: Handle) -> Option<Cursor<'_, K, V, Unique>> {
        self.tree.cursor_at(handle)
    }

    /// A mutable cursor at the entry a handle refers to, if it is still in this map.
    pub fn cursor_mut_at(&mut self, handle: Handle) -> Option<CursorMut<'_, K, V, Unique>> {
        self.tree.cursor_mut_at(handle)
    }
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Inserts `value` under `key` unless `key` is already present. Returns a handle to the
    /// entry for `key` (the new one or the existing one) and whether the insert happened.
    ///
    /// ## Panics
    ///
    /// When there would be more than `u32::MAX` entries at once.
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        self.tree.insert(key, value)
    }

    /// Inserts every pair and reports whether all of them were newly admitted. Every pair is
    /// attempted even after one is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map = Map::new();
    /// assert!(map.insert_all([(1, 'a'), (2, 'b')]));
    /// assert!(!map.insert_all([(2, 'x'), (3, 'c')]));
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.get(&2), Some(&'b'));
    /// ```
    pub fn insert_all<I>(&mut self, pairs: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .fold(true, |all, (key, value)| self.insert(key, value).1 && all)
    }

    /// Inserts every pair, returning the result of each insert in order.
    pub fn insert_many<I>(&mut self, pairs: I) -> Vec<(Handle, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// The value for `key`, inserting `V::default()` first if the key is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut words: Map<&str, usize> = Map::new();
    /// for word in ["a", "b", "a"] {
    ///     *words.get_or_insert_default(word) += 1;
    /// }
    ///
    /// assert_eq!(words.at(&"a"), Ok(&2));
    /// assert_eq!(words.at(&"b"), Ok(&1));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let id = match self.tree.find_node(&key) {
            Some(id) => id,
            None => self.tree.insert_node(key, V::default()).0,
        };
        self.tree.value_mut(id)
    }

    /// Removes the entry for `key` and returns how many entries were removed (zero or one).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase(key)
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|(_, value)| value)
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for Map<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Unique>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
