use arenakit::policy::lru::LruCache;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn warm(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.put(i, i).unwrap();
    }
    cache
}

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i).unwrap();
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_hit(c: &mut Criterion) {
    c.bench_function("lru_get_hit", |b| {
        b.iter_batched(
            || warm(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lru_get_hit,
    bench_lru_eviction_churn,
    bench_lru_pop_lru
);
criterion_main!(benches);
