//! Shared operation set for the thread-safe cache types.
//!
//! [`GuardedShard`] and [`StripedCache`] expose the same five operations
//! (`Put`, `PutIfAbsent`, `Set`, `Delete`, `Get`) behind a `&self`
//! receiver, differing only in whether there's one lock or many behind
//! key-hash dispatch. [`ConcurrentCache`] names that shared surface once
//! instead of leaving it implicit across two structs.
//!
//! [`crate::shard::LruShard`] has the identical operation names but takes
//! `&mut self` — it has no internal synchronization, so unifying it into
//! this trait would mean wrapping it in interior mutability it doesn't
//! need. It stays out of this trait on purpose.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::guarded::GuardedShard;
use crate::striped::StripedCache;

/// The operation set common to every lock-guarded cache in this crate.
pub trait ConcurrentCache<K, V>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: Clone + AsRef<[u8]>,
{
    /// Inserts or replaces `key`. See [`GuardedShard::put`].
    fn put(&self, key: K, value: V) -> bool;

    /// Inserts `key` only if absent. See [`GuardedShard::put_if_absent`].
    fn put_if_absent(&self, key: K, value: V) -> bool;

    /// Replaces `key` only if present. See [`GuardedShard::set`].
    fn set(&self, key: K, value: V) -> bool;

    /// Removes `key`. Returns `true` iff it was present.
    fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Looks up `key`, cloning the value out. Does not affect recency
    /// order.
    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Number of entries currently resident.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool;

    /// Sum of `len(key) + len(value)` across resident entries.
    fn current_size(&self) -> u64;
}

impl<K, V> ConcurrentCache<K, V> for GuardedShard<K, V>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: Clone + AsRef<[u8]>,
{
    fn put(&self, key: K, value: V) -> bool {
        GuardedShard::put(self, key, value)
    }

    fn put_if_absent(&self, key: K, value: V) -> bool {
        GuardedShard::put_if_absent(self, key, value)
    }

    fn set(&self, key: K, value: V) -> bool {
        GuardedShard::set(self, key, value)
    }

    fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        GuardedShard::delete(self, key)
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        GuardedShard::get(self, key)
    }

    fn len(&self) -> usize {
        GuardedShard::len(self)
    }

    fn is_empty(&self) -> bool {
        GuardedShard::is_empty(self)
    }

    fn current_size(&self) -> u64 {
        GuardedShard::current_size(self)
    }
}

impl<K, V, S> ConcurrentCache<K, V> for StripedCache<K, V, S>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: Clone + AsRef<[u8]>,
    S: std::hash::BuildHasher,
{
    fn put(&self, key: K, value: V) -> bool {
        StripedCache::put(self, key, value)
    }

    fn put_if_absent(&self, key: K, value: V) -> bool {
        StripedCache::put_if_absent(self, key, value)
    }

    fn set(&self, key: K, value: V) -> bool {
        StripedCache::set(self, key, value)
    }

    fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        StripedCache::delete(self, key)
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        StripedCache::get(self, key)
    }

    fn len(&self) -> usize {
        StripedCache::len(self)
    }

    fn is_empty(&self) -> bool {
        StripedCache::is_empty(self)
    }

    fn current_size(&self) -> u64 {
        StripedCache::current_size(self)
    }
}
