//! How a [`Tree`][crate::tree::Tree] treats a key that compares equal to one it already holds.

/// Decides whether the engine admits a key that is already present.
///
/// With [`Unique`] the first insert of a key wins and later inserts are rejected without
/// touching the tree. With [`Duplicates`] equal keys are always admitted and descend into the
/// right subtree, so a node's right subtree holds keys greater than *or equal to* its own.
pub trait DuplicatePolicy {
    /// `true` if inserting an existing key adds another node.
    const ADMIT_DUPLICATES: bool;
}

/// Keys are unique: used by [`Map`][crate::Map] and [`Set`][crate::Set].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unique;

impl DuplicatePolicy for Unique {
    const ADMIT_DUPLICATES: bool = false;
}

/// Equal keys accumulate: used by [`MultiSet`][crate::MultiSet].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duplicates;

impl DuplicatePolicy for Duplicates {
    const ADMIT_DUPLICATES: bool = true;
}
