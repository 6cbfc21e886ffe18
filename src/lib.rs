//! Ordered associative containers built on one Binary Search Tree (BST) engine.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. The tree is made of `Node`s, each
//! storing a key, a value, and up to two child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key (or equal to it, when duplicates are allowed).
//!
//! Searching takes `O(height)` where `height` is the longest path from the root
//! `Node` to a leaf `Node`. The engine here does no rebalancing, so the height is
//! whatever the insertion order makes it: `O(lg N)` for random keys and `O(N)`
//! for sorted ones.
//!
//! Every `Node` also links back to its parent. That lets a [`Cursor`] walk to the
//! next or previous key by chasing child and parent links alone, so in-order
//! traversal needs no stack.
//!
//! ## Containers
//!
//! [`tree::Tree`] is the engine. Three thin containers sit on top of it and only
//! differ in how they relate keys to values and whether they admit duplicates:
//!
//! | Container    | Values        | Duplicate keys        | Default-inserting index            |
//! |--------------|---------------|-----------------------|------------------------------------|
//! | [`Map`]      | one per key   | rejected, first wins  | [`Map::get_or_insert_default`]     |
//! | [`Set`]      | the key       | rejected, first wins  | no                                 |
//! | [`MultiSet`] | the key       | always admitted       | no                                 |
//!
//! ```
//! use ordtree::{Map, MultiSet, Set};
//!
//! let mut map = Map::from([(5, "five"), (3, "three")]);
//! map.insert(8, "eight");
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 5, 8]);
//!
//! let set: Set<_> = [2, 1, 2].into_iter().collect();
//! assert_eq!(set.len(), 2);
//!
//! let multiset: MultiSet<_> = [2, 1, 2].into_iter().collect();
//! assert_eq!(multiset.len(), 3);
//! ```
//!
//! ## Feature flags
//!
//! - `tracing`: emit `tracing` events for structural changes (inserts, each kind of
//!   deletion, clears, and copies).

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
mod error;
mod map;
mod multiset;
mod node;
pub mod policy;
mod set;
pub mod tree;

pub use cursor::{Cursor, CursorMut, Iter, Keys, Values};
pub use error::{Error, Result};
pub use map::Map;
pub use multiset::MultiSet;
pub use node::Handle;
pub use set::Set;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
