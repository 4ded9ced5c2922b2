use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeMap;
use treap_collections::treap::TreapMap;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreemap_insert(c: &mut Criterion) {
    c.bench_function("bench btreemap insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = BTreeMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                map.insert(key, val);
            }
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = BTreeMap::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        map.insert(key, val);
        values.push(key);
    }

    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_treap_map_insert(c: &mut Criterion) {
    c.bench_function("bench treap map insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = TreapMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                map.insert(key, val);
            }
        })
    });
}

fn bench_treap_map_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = TreapMap::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        map.insert(key, val);
        values.push(key);
    }

    c.bench_function("bench treap map get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_treap_map_union(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut left = TreapMap::new();
    let mut right = TreapMap::new();
    for _ in 0..NUM_OF_OPERATIONS {
        left.insert(rng.next_u32(), ());
        right.insert(rng.next_u32(), ());
    }

    c.bench_function("bench treap map union", move |b| {
        b.iter(|| {
            let mut result = left.clone();
            result.union(right.clone());
            black_box(result.len())
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_insert,
    bench_btreemap_get,
    bench_treap_map_insert,
    bench_treap_map_get,
    bench_treap_map_union,
);
criterion_main!(benches);
