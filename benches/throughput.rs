//! Query throughput: concrete policy vs `dyn` policy vs `ExpiryConfig` enum.
//!
//! Each group runs the same lifecycle sequence (create, read, write) so
//! criterion can generate side-by-side HTML reports of the dispatch cost.
//!
//! Run with:
//!     cargo bench --bench throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lapse::{
    CreatedExpiryPolicy, Duration, ExpiryConfig, ExpiryFactory, ExpiryPolicy, PolicyInterner,
};
use std::sync::Arc;
use std::time::Instant;

/// Operations executed per criterion iteration (hot-loop size).
const OPS: u64 = 1_000;

fn lifecycle<P: ExpiryPolicy<u64> + ?Sized>(policy: &P, now: Instant) {
    for i in 0..OPS {
        let key = black_box(i);
        let deadline = policy.expiry_for_created_entry(&key).resolve(now, None);
        let deadline = policy.expiry_for_accessed_entry(&key).resolve(now, deadline);
        black_box(policy.expiry_for_modified_entry(&key).resolve(now, deadline));
    }
}

// ---------------------------------------------------------------------------
// Group 1: lifecycle
// ---------------------------------------------------------------------------

fn bench_lifecycle(c: &mut Criterion) {
    let concrete = CreatedExpiryPolicy::new(Duration::FIVE_MINUTES);
    let shared: Arc<dyn ExpiryPolicy<u64>> =
        CreatedExpiryPolicy::factory_of(Duration::FIVE_MINUTES).create();
    let config = ExpiryConfig::created(Duration::FIVE_MINUTES);
    let now = Instant::now();

    let mut group = c.benchmark_group("lifecycle");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("concrete", |b| b.iter(|| lifecycle(&concrete, now)));
    group.bench_function("dyn", |b| b.iter(|| lifecycle(&*shared, now)));
    group.bench_function("config_enum", |b| b.iter(|| lifecycle(&config, now)));

    group.finish();
}

// ---------------------------------------------------------------------------
// Group 2: intern
// ---------------------------------------------------------------------------
// Every lookup hits an already-interned configuration (read-lock path).

fn bench_intern_hit(c: &mut Criterion) {
    let interner = PolicyInterner::new();
    let config = ExpiryConfig::touched(Duration::ONE_HOUR);
    interner.intern(config);

    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("hit", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                black_box(interner.intern(black_box(config)));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_lifecycle, bench_intern_hit);
criterion_main!(benches);
