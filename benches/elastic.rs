#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, Criterion};
use elastic_table::ElasticTable;
use proptest::{ prelude::{ any, Strategy}, strategy::ValueTree, test_runner::TestRunner};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = any::<[(String, String); ITEMS_AMOUNT]>()
    .new_tree(&mut runner)
    .unwrap()
    .current();


    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut elastic = ElasticTable::with_capacity(4096).unwrap();
    let mut rust_map = HashMap::new();
    group.bench_function("elastic insert", |b| {
        b.iter(
            || {
            for (key, value) in &items {
                elastic.insert(key.as_bytes(), value.as_bytes()).unwrap();
            }

        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(
            || {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }

        });
    });
    group.bench_function("elastic get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = elastic.get(key.as_bytes());
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);
criterion_main!(benches);
