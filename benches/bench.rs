use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordtree::{Map, MultiSet};

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a map by inserting keys in ascending order. Without rebalancing this gives a tree that
/// is one long right spine.
fn get_unbalanced_map(num_levels: usize) -> Map<i32, i32> {
    (0..num_nodes_in_full_tree(num_levels) as i32)
        .map(|x| (x, x))
        .collect()
}

/// Builds a map by inserting keys in an order that makes a full tree with `num_levels` levels.
fn get_balanced_map(num_levels: usize) -> Map<i32, i32> {
    let xs = (0..num_nodes_in_full_tree(num_levels) as i32).collect::<Vec<_>>();
    let mut map = Map::with_capacity(xs.len());
    fill_balanced_map(&mut map, &xs);
    map
}

/// Recursive helper for [`get_balanced_map`].
fn fill_balanced_map(map: &mut Map<i32, i32>, xs: &[i32]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        map.insert(xs[mid], xs[mid]);
        fill_balanced_map(map, &xs[..mid]);
        fill_balanced_map(map, &xs[mid + 1..]);
    }
}

/// Helper to bench a function on a map.
/// It creates a group for the given name and closure and runs it for various sizes and
/// shapes of trees before finishing the group. `f` gets a fresh copy of the map each time so it
/// can mutate it.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Map<i32, i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // Sorted inserts make a spine as long as the tree is big, so keep those smaller.
    for num_levels in [3, 7, 11] {
        let largest_key = num_nodes_in_full_tree(num_levels) as i32 - 1;
        let shapes = [
            ("balanced", get_balanced_map(num_levels)),
            ("unbalanced", get_unbalanced_map(num_levels)),
        ];
        for (shape, map) in shapes {
            let id = BenchmarkId::new(shape, largest_key);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut map = black_box(map.clone());
                        let instant = std::time::Instant::now();
                        f(&mut map, black_box(largest_key));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |map, i| {
        let _value = black_box(map.get(&i));
    });
    bench_helper(c, "find-miss", |map, i| {
        let _value = black_box(map.get(&(i + 1)));
    });
    bench_helper(c, "insert", |map, i| {
        map.insert(i + 1, i + 1);
    });
    bench_helper(c, "erase", |map, i| {
        map.erase(&i);
    });
    bench_helper(c, "erase-root", |map, i| {
        map.erase(&(i / 2));
    });
    bench_helper(c, "iterate", |map, _| {
        for entry in map.iter() {
            black_box(entry);
        }
    });
    bench_helper(c, "iterate-back", |map, _| {
        for entry in map.iter().rev() {
            black_box(entry);
        }
    });
    bench_helper(c, "clone", |map, _| {
        black_box(map.clone());
    });

    c.bench_function("multiset-erase-duplicates", |b| {
        let set: MultiSet<i32> = (0..1024).map(|x| x % 16).collect();
        b.iter(|| {
            let mut set = set.clone();
            black_box(set.erase(&black_box(8)));
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
