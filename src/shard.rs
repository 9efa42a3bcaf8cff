//! Single-threaded bounded LRU cache shard.
//!
//! `LruShard` is the unit of storage the rest of this crate builds on:
//! [`crate::guarded::GuardedShard`] wraps one in a mutex, and
//! [`crate::striped::StripedCache`] routes keys across many of them. On
//! its own it has no internal synchronization — calling it from more than
//! one thread at a time is a programming error, not a supported mode.
//!
//! # Recency policy
//!
//! Only a write (`put`/`put_if_absent`/`set`) moves an entry to the
//! most-recently-used end. `get` is a pure lookup and never reorders —
//! this is a deliberate, tested property (see the crate-level tests), not
//! an oversight.

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use crate::entry::CacheEntry;
use crate::list::List;

/// Computes the byte-size contribution of a key/value pair.
#[inline]
fn entry_size<K: AsRef<[u8]>, V: AsRef<[u8]>>(key: &K, value: &V) -> u64 {
    (key.as_ref().len() + value.as_ref().len()) as u64
}

/// A bounded-byte-capacity LRU cache, single-threaded.
///
/// Combines a [`HashMap`] (key → slot index) with an index-addressed
/// [`List`] (recency order) so every operation below is O(1) amortized.
pub struct LruShard<K, V, S = DefaultHashBuilder> {
    max_size: u64,
    current_size: u64,
    list: List<CacheEntry<K, V>>,
    index: HashMap<K, usize, S>,
}

impl<K, V> LruShard<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new shard with the given byte capacity.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero — a zero-capacity shard can never
    /// hold any entry with a nonempty key or value and is almost always a
    /// misconfiguration; callers that want a true no-op shard can still
    /// construct one with `with_hasher` and size 0 explicitly.
    pub fn new(max_size: u64) -> Self {
        Self::with_hasher(max_size, DefaultHashBuilder::default())
    }
}

impl<K, V, S> LruShard<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a new shard with the given byte capacity and hash builder.
    pub fn with_hasher(max_size: u64, hasher: S) -> Self {
        LruShard {
            max_size,
            current_size: 0,
            list: List::new(),
            index: HashMap::with_hasher(hasher),
        }
    }

    /// Number of entries currently resident in the shard.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the shard holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Sum of `len(key) + len(value)` across resident entries.
    #[inline]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// The shard's fixed byte capacity.
    #[inline]
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Looks up `key` without affecting recency order.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = *self.index.get(key)?;
        Some(&self.list.get(idx).value)
    }

    /// Removes `key`. Returns `true` iff it was present.
    ///
    /// Does not evict or reorder any other entry.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.index.remove(key) {
            Some(idx) => {
                let removed = self.list.remove(idx);
                self.current_size -= removed.size;
                true
            }
            None => false,
        }
    }

    /// Evicts from the LRU end until `current_size + incoming <=
    /// max_size`, or the shard is empty.
    fn evict_to_fit(&mut self, incoming: u64) {
        while !self.list.is_empty() && self.current_size + incoming > self.max_size {
            let (_, evicted) = self.list.pop_front().expect("non-empty checked above");
            self.index.remove(&evicted.key);
            self.current_size -= evicted.size;
            log::trace!(
                "shard: evicted entry of {} bytes under {} bytes of pressure",
                evicted.size,
                incoming
            );
        }
    }

    /// Inserts a fresh key (caller has already checked `key` is absent)
    /// at the MRU end, evicting as needed first.
    fn insert_new(&mut self, key: K, value: V, size: u64) {
        self.evict_to_fit(size);
        let idx = self.list.insert_back(CacheEntry::new(key.clone(), value, size));
        self.index.insert(key, idx);
        self.current_size += size;
    }

    /// Insert-or-replace with an explicit size, used by [`Self::put`] and
    /// by callers that size entries by something other than raw byte
    /// length.
    ///
    /// Returns `false` without mutating state iff `size > max_size`.
    pub fn put_with_size(&mut self, key: K, value: V, size: u64) -> bool {
        if size > self.max_size {
            return false;
        }
        if let Some(idx) = self.index.remove(&key) {
            // Replacing: detach the old entry first so the eviction loop
            // below can't re-evict it, and so a replacement that merely
            // shrinks never evicts anything else. Makes "replace" literally
            // "remove, then insert fresh" instead of tracking a separate
            // replaced-size adjustment through the eviction loop.
            let old = self.list.remove(idx);
            self.current_size -= old.size;
        }
        self.insert_new(key, value, size);
        true
    }

    /// Insert-only-if-absent with an explicit size. See [`Self::put_if_absent`].
    pub fn put_if_absent_with_size(&mut self, key: K, value: V, size: u64) -> bool {
        if size > self.max_size || self.index.contains_key(&key) {
            return false;
        }
        self.insert_new(key, value, size);
        true
    }

    /// Replace-only-if-present with an explicit size. See [`Self::set`].
    pub fn set_with_size(&mut self, key: K, value: V, size: u64) -> bool {
        if !self.index.contains_key(&key) {
            return false;
        }
        if size > self.max_size {
            return false;
        }
        let idx = self.index.remove(&key).expect("checked contains_key above");
        let old = self.list.remove(idx);
        self.current_size -= old.size;
        self.insert_new(key, value, size);
        true
    }
}

impl<K, V, S> LruShard<K, V, S>
where
    K: Hash + Eq + Clone + AsRef<[u8]>,
    V: AsRef<[u8]>,
    S: BuildHasher,
{
    /// Inserts or replaces `key` with `value`, sizing the entry as
    /// `key.len() + value.len()` bytes.
    ///
    /// Returns `false` (and leaves the shard unchanged) iff the pair is
    /// larger than `max_size`, even when `key` was already present.
    pub fn put(&mut self, key: K, value: V) -> bool {
        let size = entry_size(&key, &value);
        self.put_with_size(key, value, size)
    }

    /// Inserts `key` only if absent; oversize or already-present both
    /// return `false`.
    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        let size = entry_size(&key, &value);
        self.put_if_absent_with_size(key, value, size)
    }

    /// Replaces `key` only if present; oversize or absent both return
    /// `false`.
    pub fn set(&mut self, key: K, value: V) -> bool {
        let size = entry_size(&key, &value);
        self.set_with_size(key, value, size)
    }
}

impl<K, V, S> std::fmt::Debug for LruShard<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruShard")
            .field("len", &self.index.len())
            .field("current_size", &self.current_size)
            .field("max_size", &self.max_size)
            .finish()
    }
}
