//! Integration tests for striped routing, shard disjointness, and
//! independence under concurrent access. Unit-level eviction/recency
//! behavior lives in `src/shard.rs`; this file exercises the cache the way
//! a multi-threaded caller actually would.

use kvcache_core::config::StripedCacheConfig;
use kvcache_core::error::CacheError;
use kvcache_core::striped::StripedCache;
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 16;
const OPS_PER_THREAD: usize = 2_000;

#[test]
fn rejects_undersized_stripes_with_structured_error() {
    let err = StripedCacheConfig::new(4, 100)
        .min_stripe_size(64)
        .build::<String, String>()
        .unwrap_err();
    assert_eq!(
        err,
        CacheError::StripeTooSmall {
            computed: 25,
            floor: 64,
        }
    );
}

#[test]
fn every_key_resolves_to_exactly_one_stripe() {
    // A key present after `put` must round-trip through `get`, which
    // always re-derives the same `hash(key) % stripe_count` stripe — so a
    // successful get is itself evidence of single-shard residency.
    let cache: StripedCache<String, String> =
        StripedCache::with_min_stripe_size(8, 1 << 20, 16).unwrap();
    for i in 0..500 {
        let key = format!("routing-key-{i}");
        assert!(cache.put(key.clone(), format!("v{i}")));
        assert_eq!(cache.get(&key), Some(format!("v{i}")));
    }
}

#[test]
fn concurrent_writers_on_disjoint_stripes_all_succeed() {
    let cache: Arc<StripedCache<String, String>> =
        Arc::new(StripedCache::with_min_stripe_size(NUM_THREADS, 4 * 1024 * 1024, 16).unwrap());

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                let key = format!("thread-{t}-key-{i}");
                cache.put(key.clone(), format!("value-{i}"));
                assert_eq!(cache.get(&key), Some(format!("value-{i}")));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    assert!(cache.current_size() <= cache.stripe_max_size() * cache.stripe_count() as u64);
}

#[test]
fn concurrent_mixed_operations_preserve_size_bound() {
    let cache: Arc<StripedCache<String, String>> =
        Arc::new(StripedCache::with_min_stripe_size(8, 2 * 1024 * 1024, 16).unwrap());

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                let key = format!("key-{}", i % 300);
                match i % 4 {
                    0 => {
                        cache.put(key, format!("thread-{t}-val-{i}"));
                    }
                    1 => {
                        let _ = cache.get(&key);
                    }
                    2 => {
                        let _ = cache.delete(&key);
                    }
                    _ => {
                        cache.put_if_absent(key, "seed".to_string());
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("mixed-op thread panicked");
    }

    assert!(cache.current_size() <= cache.stripe_max_size() * cache.stripe_count() as u64);
}

#[test]
fn deletes_from_one_stripe_do_not_affect_another() {
    let cache: StripedCache<String, String> =
        StripedCache::with_min_stripe_size(4, 2 * 1024 * 1024, 16).unwrap();

    for i in 0..100 {
        cache.put(format!("k{i}"), format!("v{i}"));
    }
    let before = cache.len();

    for i in (0..100).step_by(2) {
        assert!(cache.delete(&format!("k{i}")));
    }

    assert_eq!(cache.len(), before - 50);
    for i in (1..100).step_by(2) {
        assert_eq!(cache.get(&format!("k{i}")), Some(format!("v{i}")));
    }
}
