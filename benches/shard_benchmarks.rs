// Benchmarks for the single-shard LRU and its striped/guarded wrappers.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kvcache_core::guarded::GuardedShard;
use kvcache_core::shard::LruShard;
use kvcache_core::striped::StripedCache;

const SHARD_BYTES: u64 = 1_000_000;
const NUM_OPERATIONS: usize = 10_000;

// Simple linear congruential generator for reproducible benchmarks.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345) & 0x7fff_ffff;
        self.state
    }
}

fn mixed_keys(n: usize, key_space: u64) -> Vec<String> {
    let mut rng = SimpleRng::new(42);
    (0..n)
        .map(|_| format!("key-{}", rng.next_u64() % key_space))
        .collect()
}

fn bench_lru_shard(c: &mut Criterion) {
    let keys = mixed_keys(NUM_OPERATIONS, 2_000);
    let mut group = c.benchmark_group("LruShard");

    group.bench_function("put_mixed", |b| {
        b.iter(|| {
            let mut shard: LruShard<String, String> = LruShard::new(SHARD_BYTES);
            for key in &keys {
                black_box(shard.put(key.clone(), "value".to_string()));
            }
        });
    });

    group.bench_function("get_hit_miss_mixed", |b| {
        let mut shard: LruShard<String, String> = LruShard::new(SHARD_BYTES);
        for key in &keys {
            shard.put(key.clone(), "value".to_string());
        }
        b.iter(|| {
            for key in &keys {
                black_box(shard.get(key));
            }
        });
    });

    group.finish();
}

fn bench_guarded_shard(c: &mut Criterion) {
    let keys = mixed_keys(NUM_OPERATIONS, 2_000);
    let mut group = c.benchmark_group("GuardedShard");

    group.bench_function("put_single_threaded", |b| {
        b.iter(|| {
            let shard: GuardedShard<String, String> = GuardedShard::new(SHARD_BYTES);
            for key in &keys {
                black_box(shard.put(key.clone(), "value".to_string()));
            }
        });
    });

    group.finish();
}

fn bench_striped_cache(c: &mut Criterion) {
    let keys = mixed_keys(NUM_OPERATIONS, 2_000);
    let mut group = c.benchmark_group("StripedCache");

    for stripe_count in [1usize, 4, 16] {
        group.bench_function(format!("put_{stripe_count}_stripes"), |b| {
            b.iter(|| {
                let cache: StripedCache<String, String> =
                    StripedCache::with_min_stripe_size(stripe_count, SHARD_BYTES, 16).unwrap();
                for key in &keys {
                    black_box(cache.put(key.clone(), "value".to_string()));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lru_shard,
    bench_guarded_shard,
    bench_striped_cache
);
criterion_main!(benches);
