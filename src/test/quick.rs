use quickcheck::{Arbitrary, Gen};

/// One step of a randomized run against a container and a std oracle.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    Insert(K, V),
    Remove(K),
    /// Look a key up without changing anything.
    Get(K),
    /// Walk the whole container in order.
    Iter,
    Clear,
}

/// Relative odds of each step. Inserts dominate so the trees grow deep enough for removals to
/// hit nodes with two children, and clearing is rare.
const WEIGHTS: [(u8, u32); 5] = [(0, 8), (1, 5), (2, 3), (3, 2), (4, 1)];

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        let total: u32 = WEIGHTS.iter().map(|(_, weight)| weight).sum();
        let mut roll = u32::arbitrary(g) % total;
        let step = WEIGHTS
            .iter()
            .find(|(_, weight)| {
                let hit = roll < *weight;
                roll = roll.saturating_sub(*weight);
                hit
            })
            .map_or(0, |(step, _)| *step);

        match step {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Get(K::arbitrary(g)),
            3 => Op::Iter,
            _ => Op::Clear,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k, v) => {
                let v = v.clone();
                Box::new(k.shrink().map(move |k| Op::Insert(k, v.clone())))
            }
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
            Op::Get(k) => Box::new(k.shrink().map(Op::Get)),
            Op::Iter | Op::Clear => quickcheck::empty_shrinker(),
        }
    }
}
