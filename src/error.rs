//! Errors surfaced by the containers and their cursors.

use thiserror::Error;

/// Errors returned by fallible container and cursor operations.
///
/// Both variants are fatal only to the call that produced them: the container (or cursor) is
/// left exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A checked lookup (such as [`Map::at`][crate::Map::at]) was given a key that isn't in the
    /// container. Lookups of this kind never insert.
    #[error("key not found")]
    KeyNotFound,
    /// A cursor was advanced past the end position or moved back from the first element.
    #[error("cursor moved out of range")]
    IteratorOutOfRange,
}

/// A `Result` whose error is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
