use ordtree::MultiSet;

use std::collections::BTreeMap;

use crate::Op;

/// Applies a set of operations to a multiset and a map of key counts.
fn do_ops<K>(
    ops: &[Op<K, ()>],
    mut set: MultiSet<K>,
    counts: &mut BTreeMap<K, usize>,
) -> MultiSet<K>
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, ()) => {
                assert!(set.insert(k.clone()).1);
                *counts.entry(k.clone()).or_default() += 1;
            }
            Op::Erase(k) => {
                assert_eq!(set.erase(k), counts.remove(k).unwrap_or(0));
                assert_eq!(set.count(k), 0);
            }
            Op::Clone => set = set.clone(),
        }
    }

    set
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, ()>>) -> bool {
        let mut counts = BTreeMap::new();
        let set = do_ops(&ops, MultiSet::new(), &mut counts);

        let expected = counts
            .iter()
            .flat_map(|(k, n)| std::iter::repeat(k).take(*n));
        set.len() == counts.values().sum::<usize>()
            && set.iter().eq(expected)
            && counts.iter().all(|(k, n)| set.count(k) == *n)
    }

    fn sorted_with_duplicates(xs: Vec<i8>) -> bool {
        let set: MultiSet<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        set.iter().copied().eq(sorted.iter().copied())
            && set.iter().rev().copied().eq(sorted.iter().rev().copied())
    }
}
