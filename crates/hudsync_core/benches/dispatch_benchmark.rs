//! # Store Dispatch Benchmark
//!
//! BUDGET:
//! - A full HUD refresh touches ~64 keys per scope
//! - Dispatch must stay comfortably inside one frame at 120fps
//!
//! Run with: `cargo bench --package hudsync_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hudsync_core::DataStore;
use hudsync_shared::DataScope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Keys per scope in a loaded HUD.
const KEY_COUNT: usize = 64;

fn loaded_store() -> DataStore {
    let mut store = DataStore::new();
    for scope in DataScope::ALL {
        for i in 0..KEY_COUNT {
            store.set(scope, format!("key_{i}"), json!(i));
        }
    }
    store
}

/// Benchmark: write churn over a warm table (overwrites, no growth).
fn bench_store_writes(c: &mut Criterion) {
    let mut store = loaded_store();

    c.bench_function("overwrite_64_keys", |b| {
        b.iter(|| {
            for i in 0..KEY_COUNT {
                store.set(DataScope::Player, format!("key_{i}"), json!(i + 1));
            }
            black_box(store.get(DataScope::Player, "key_0"));
        });
    });
}

/// Benchmark: random key lookup, the linear-scan worst case.
fn bench_store_lookup(c: &mut Criterion) {
    let store = loaded_store();
    let mut rng = StdRng::seed_from_u64(0xDA7A);
    let keys: Vec<String> = (0..KEY_COUNT).map(|i| format!("key_{i}")).collect();

    c.bench_function("random_lookup_64_keys", |b| {
        b.iter(|| {
            let key = &keys[rng.gen_range(0..KEY_COUNT)];
            black_box(store.get(DataScope::Global, key))
        });
    });
}

/// THE CRITICAL BENCHMARK: one key changing under a crowd of listeners.
fn bench_trigger_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger_fanout");

    for listener_count in [1_usize, 8, 64] {
        let mut store = loaded_store();
        for i in 0..listener_count {
            store.register_listener(
                DataScope::Player,
                format!("listener_{i}"),
                "key_0",
                Box::new(|update| {
                    black_box(update.value);
                    Ok(())
                }),
            );
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            &listener_count,
            |b, _| {
                b.iter(|| black_box(store.trigger_listeners(DataScope::Player, "key_0")));
            },
        );
    }

    group.finish();
}

/// Benchmark: register/unregister churn, as panels load and unload.
fn bench_listener_churn(c: &mut Criterion) {
    let mut store = DataStore::new();

    c.bench_function("listener_register_unregister", |b| {
        b.iter(|| {
            store.register_listener(
                DataScope::Team,
                "panel_score",
                "score",
                Box::new(|_| Ok(())),
            );
            black_box(store.unregister_listener(DataScope::Team, "panel_score"))
        });
    });
}

criterion_group!(
    benches,
    bench_store_writes,
    bench_store_lookup,
    bench_trigger_fanout,
    bench_listener_churn
);
criterion_main!(benches);
