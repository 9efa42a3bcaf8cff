//! Mutex-guarded single shard.
//!
//! `GuardedShard` is [`LruShard`] wrapped in a [`parking_lot::Mutex`],
//! giving the same five-operation surface a `&self` (thread-safe)
//! receiver. [`crate::striped::StripedCache`] is built out of many of
//! these; nothing stops using one directly as a non-striped concurrent
//! cache.
//!
//! `parking_lot::Mutex` is used instead of `std::sync::Mutex` because it
//! does not poison: a panic inside a held lock (a panicking caller
//! mid-`put`, say) must not turn every subsequent access on that stripe
//! into an `Err`, since every operation here already reports failure as
//! a plain `bool`/`Option`.

use parking_lot::Mutex;
use std::borrow::Borrow;
use std::hash::Hash;

use crate::shard::LruShard;

/// A single [`LruShard`] behind a mutex.
pub struct GuardedShard<K, V> {
    inner: Mutex<LruShard<K, V>>,
}

impl<K, V> GuardedShard<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new guarded shard with the given byte capacity.
    pub fn new(max_size: u64) -> Self {
        GuardedShard {
            inner: Mutex::new(LruShard::new(max_size)),
        }
    }

    /// The shard's fixed byte capacity.
    pub fn max_size(&self) -> u64 {
        self.inner.lock().max_size()
    }

    /// Sum of `len(key) + len(value)` across resident entries.
    pub fn current_size(&self) -> u64 {
        self.inner.lock().current_size()
    }

    /// Number of entries currently resident in the shard.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the shard holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<K, V> GuardedShard<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Looks up `key`, cloning the value out under the lock. Does not
    /// affect recency order.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Removes `key`. Returns `true` iff it was present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().delete(key)
    }
}

impl<K, V> GuardedShard<K, V>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: Clone + AsRef<[u8]>,
{
    /// Inserts or replaces `key`. See [`LruShard::put`].
    pub fn put(&self, key: K, value: V) -> bool {
        self.inner.lock().put(key, value)
    }

    /// Inserts `key` only if absent. See [`LruShard::put_if_absent`].
    pub fn put_if_absent(&self, key: K, value: V) -> bool {
        self.inner.lock().put_if_absent(key, value)
    }

    /// Replaces `key` only if present. See [`LruShard::set`].
    pub fn set(&self, key: K, value: V) -> bool {
        self.inner.lock().set(key, value)
    }
}

impl<K, V> std::fmt::Debug for GuardedShard<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("GuardedShard")
            .field("len", &guard.len())
            .field("current_size", &guard.current_size())
            .field("max_size", &guard.max_size())
            .finish()
    }
}
