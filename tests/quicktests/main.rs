//! Property tests comparing the containers against their `std::collections` counterparts.

mod map;
mod multiset;
mod set;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a container in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into the container
    Insert(K, V),
    /// Erase the K from the container
    Erase(K),
    /// Clone the container and keep going with the copy
    Clone,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Erase(K::arbitrary(g)),
            2 => Op::Clone,
            _ => unreachable!(),
        }
    }
}
