//! Hash-striped concurrent cache.
//!
//! `StripedCache` partitions the keyspace across `N` independent
//! [`GuardedShard`]s so that unrelated keys almost never contend on the
//! same mutex. Dispatch is a single `hash(key) % stripe_count` — no
//! cross-shard locking, no global size accounting. This means the
//! aggregate `max_size` is advisory (it is divided evenly up front) and
//! an individual stripe can refuse an insert that would technically fit
//! in the aggregate if another stripe is underused; that's the accepted
//! tradeoff for lock-free cross-shard dispatch.

use hashbrown::DefaultHashBuilder;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use crate::error::{CacheError, Result};
use crate::guarded::GuardedShard;

/// Keys routed to fewer bytes per stripe than this are almost certainly
/// a configuration mistake (every entry would be refused as oversize on
/// typical payloads).
pub const DEFAULT_MIN_STRIPE_SIZE: u64 = 2 * 1024 * 1024;

/// A cache sharded across a fixed number of independently-locked stripes.
pub struct StripedCache<K, V, S = DefaultHashBuilder> {
    shards: Vec<GuardedShard<K, V>>,
    hasher: S,
}

impl<K, V> StripedCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Builds a striped cache with `stripe_count` stripes sharing
    /// `max_size` bytes evenly, rejecting configurations whose per-stripe
    /// share would fall below [`DEFAULT_MIN_STRIPE_SIZE`].
    pub fn new(stripe_count: usize, max_size: u64) -> Result<Self> {
        Self::with_min_stripe_size(stripe_count, max_size, DEFAULT_MIN_STRIPE_SIZE)
    }

    /// Like [`Self::new`] but with an explicit per-stripe floor, for
    /// callers (and tests) that intentionally want small stripes.
    pub fn with_min_stripe_size(
        stripe_count: usize,
        max_size: u64,
        min_stripe_size: u64,
    ) -> Result<Self> {
        if stripe_count == 0 {
            return Err(CacheError::ZeroStripes);
        }
        let per_stripe = max_size / stripe_count as u64;
        if per_stripe < min_stripe_size {
            return Err(CacheError::StripeTooSmall {
                computed: per_stripe,
                floor: min_stripe_size,
            });
        }
        let shards = (0..stripe_count)
            .map(|_| GuardedShard::new(per_stripe))
            .collect();
        Ok(StripedCache {
            shards,
            hasher: DefaultHashBuilder::default(),
        })
    }
}

impl<K, V, S> StripedCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Number of stripes.
    pub fn stripe_count(&self) -> usize {
        self.shards.len()
    }

    /// Byte capacity of a single stripe (the aggregate divided evenly).
    pub fn stripe_max_size(&self) -> u64 {
        self.shards[0].max_size()
    }

    /// Sum of every stripe's current byte usage.
    pub fn current_size(&self) -> u64 {
        self.shards.iter().map(GuardedShard::current_size).sum()
    }

    /// Sum of every stripe's entry count.
    pub fn len(&self) -> usize {
        self.shards.iter().map(GuardedShard::len).sum()
    }

    /// Whether every stripe holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shard_for<Q>(&self, key: &Q) -> &GuardedShard<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let stripe = (self.hasher.hash_one(key) as usize) % self.shards.len();
        &self.shards[stripe]
    }
}

impl<K, V, S> StripedCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Looks up `key` in its stripe. Does not affect recency order.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.shard_for(key).get(key)
    }

    /// Removes `key` from its stripe. Returns `true` iff it was present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.shard_for(key).delete(key)
    }
}

impl<K, V, S> StripedCache<K, V, S>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: Clone + AsRef<[u8]>,
    S: BuildHasher,
{
    /// Inserts or replaces `key` in its stripe. See [`crate::shard::LruShard::put`].
    pub fn put(&self, key: K, value: V) -> bool {
        self.shard_for(&key).put(key, value)
    }

    /// Inserts `key` in its stripe only if absent.
    pub fn put_if_absent(&self, key: K, value: V) -> bool {
        self.shard_for(&key).put_if_absent(key, value)
    }

    /// Replaces `key` in its stripe only if present.
    pub fn set(&self, key: K, value: V) -> bool {
        self.shard_for(&key).set(key, value)
    }
}

impl<K, V, S> std::fmt::Debug for StripedCache<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripedCache")
            .field("stripe_count", &self.shards.len())
            .finish()
    }
}
