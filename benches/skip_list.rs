use arenakit::builder::SkipListBuilder;
use arenakit::ds::skip_list::SkipList;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;

const N: u64 = 4096;

fn filled(max_level: usize) -> SkipList<u64, u64, SmallRng> {
    let mut list = SkipListBuilder::new()
        .max_level(max_level)
        .capacity(N as usize * 2)
        .seed(0xbe7c)
        .build()
        .unwrap();
    // Scatter keys so inserts do not arrive in order.
    for i in 0..N {
        list.insert(i.wrapping_mul(0x9e37_79b9) % (N * 16), i).unwrap();
    }
    list
}

fn bench_skip_list_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip_list_get");
    for max_level in [4usize, 12, 20] {
        let list = filled(max_level);
        group.bench_with_input(BenchmarkId::from_parameter(max_level), &list, |b, list| {
            b.iter(|| {
                for i in 0..N {
                    let key = i.wrapping_mul(0x9e37_79b9) % (N * 16);
                    let _ = std::hint::black_box(list.get(&std::hint::black_box(key)));
                }
            })
        });
    }
    group.finish();
}

fn bench_skip_list_insert_remove(c: &mut Criterion) {
    c.bench_function("skip_list_insert_remove", |b| {
        b.iter_batched(
            || filled(16),
            |mut list| {
                for i in 0..N {
                    let key = N * 16 + i;
                    list.insert(std::hint::black_box(key), i).unwrap();
                    let _ = std::hint::black_box(list.remove(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_skip_list_iter(c: &mut Criterion) {
    let list = filled(16);
    c.bench_function("skip_list_iter", |b| {
        b.iter(|| std::hint::black_box(list.iter().map(|(_, v)| *v).sum::<u64>()))
    });
}

criterion_group!(
    benches,
    bench_skip_list_get,
    bench_skip_list_insert_remove,
    bench_skip_list_iter
);
criterion_main!(benches);
