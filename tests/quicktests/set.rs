use ordtree::Set;

use std::collections::BTreeSet;

use crate::Op;

fn do_ops<K>(ops: &[Op<K, ()>], mut set: Set<K>, oracle: &mut BTreeSet<K>) -> Set<K>
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, ()) => {
                assert_eq!(set.insert(k.clone()).1, oracle.insert(k.clone()));
            }
            Op::Erase(k) => {
                assert_eq!(set.erase(k), usize::from(oracle.remove(k)));
            }
            Op::Clone => set = set.clone(),
        }
    }

    set
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, ()>>) -> bool {
        let mut oracle = BTreeSet::new();
        let set = do_ops(&ops, Set::new(), &mut oracle);

        set.len() == oracle.len() && set.iter().eq(oracle.iter())
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let set: Set<_> = xs.iter().copied().collect();
        let added: BTreeSet<_> = xs.into_iter().collect();
        let nots: BTreeSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !set.contains(x))
    }
}
