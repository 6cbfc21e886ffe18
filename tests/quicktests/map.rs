use ordtree::Map;

use std::collections::BTreeMap;

use crate::Op;

/// Applies a set of operations to a map and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts,
/// erases, and copies we have the same entries in both.
fn do_ops<K, V>(ops: &[Op<K, V>], mut map: Map<K, V>, oracle: &mut BTreeMap<K, V>) -> Map<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                map.insert(k.clone(), v.clone());
                oracle.entry(k.clone()).or_insert_with(|| v.clone());
            }
            Op::Erase(k) => {
                map.erase(k);
                oracle.remove(k);
            }
            Op::Clone => {
                // The old map is dropped, so anything shared would dangle.
                map = map.clone();
            }
        }
    }

    map
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut oracle = BTreeMap::new();
        let map = do_ops(&ops, Map::new(), &mut oracle);

        map.len() == oracle.len()
            && map.iter().eq(oracle.iter())
            && map.iter().rev().eq(oracle.iter().rev())
            && oracle.iter().all(|(k, v)| map.at(k) == Ok(v))
    }

    fn first_insert_wins(xs: Vec<(i8, i8)>) -> bool {
        let mut map = Map::new();
        let all_new = map.insert_all(xs.iter().copied());

        let mut oracle = BTreeMap::new();
        for (k, v) in &xs {
            oracle.entry(*k).or_insert(*v);
        }
        all_new == (oracle.len() == xs.len()) && map.iter().eq(oracle.iter())
    }

    fn copy_is_deep(xs: Vec<(i8, i8)>, deletes: Vec<i8>) -> bool {
        let original: Map<_, _> = xs.iter().copied().collect();
        let snapshot: Vec<_> = original.iter().map(|(k, v)| (*k, *v)).collect();

        let mut copy = original.clone();
        for delete in &deletes {
            copy.erase(delete);
        }
        for (_, v) in xs.iter() {
            let value = copy.get_or_insert_default(*v);
            *value = value.wrapping_add(1);
        }

        original.iter().map(|(k, v)| (*k, *v)).eq(snapshot)
    }
}
