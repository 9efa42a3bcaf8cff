//! Concurrent in-memory key/value cache core: a bounded-byte-capacity LRU
//! shard, a hash-striped concurrent cache built from many of them, and an
//! elastic worker pool for executing submitted work.
//!
//! This crate is deliberately narrow. It does not speak a wire protocol,
//! parse commands, load configuration, or set up logging subscribers — it
//! is the storage and scheduling core a server binary wraps. See each
//! module's docs for the surface it exposes.
//!
//! # Modules
//!
//! - [`cache`]: [`cache::ConcurrentCache`], the `Put`/`PutIfAbsent`/`Set`/
//!   `Delete`/`Get` surface shared by [`GuardedShard`] and
//!   [`StripedCache`].
//! - [`entry`]: the unified key/value/size triple stored in a shard.
//! - [`list`]: the index-addressed slab list backing a shard's recency
//!   order. Internal; not part of the public API.
//! - [`shard`]: [`LruShard`], the single-threaded bounded LRU.
//! - [`guarded`]: [`GuardedShard`], a shard behind a mutex.
//! - [`striped`]: [`StripedCache`], a fixed array of guarded shards
//!   dispatched by key hash.
//! - [`executor`]: [`Executor`], the elastic worker pool.
//! - [`config`]: construction-time configuration for the striped cache and
//!   the executor.
//! - [`error`]: the crate's structured construction error type.
//!
//! # Example
//!
//! ```
//! use kvcache_core::config::StripedCacheConfig;
//!
//! let cache: kvcache_core::striped::StripedCache<String, String> =
//!     StripedCacheConfig::new(8, 64 * 1024 * 1024).build().unwrap();
//! cache.put("hello".to_string(), "world".to_string());
//! assert_eq!(cache.get("hello"), Some("world".to_string()));
//! ```
//!
//! ```
//! use kvcache_core::config::ExecutorConfig;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let pool = ExecutorConfig::new(2, 8).build().unwrap();
//! let counter = Arc::new(AtomicUsize::new(0));
//! let c = Arc::clone(&counter);
//! pool.submit(move || {
//!     c.fetch_add(1, Ordering::SeqCst);
//! });
//! pool.stop(true);
//! assert_eq!(counter.load(Ordering::SeqCst), 1);
//! ```

/// The `Put`/`PutIfAbsent`/`Set`/`Delete`/`Get` surface shared by
/// [`GuardedShard`] and [`StripedCache`].
pub mod cache;

/// Construction-time configuration for the striped cache and the
/// executor.
pub mod config;

/// The key/value/size triple stored in a shard.
pub mod entry;

/// The crate's structured construction error type.
pub mod error;

/// The elastic worker pool.
pub mod executor;

/// A single [`LruShard`] behind a mutex.
pub mod guarded;

/// Index-addressed slab list backing a shard's recency order.
///
/// Internal; not part of the public API.
pub(crate) mod list;

/// The single-threaded bounded LRU.
pub mod shard;

/// A fixed array of guarded shards dispatched by key hash.
pub mod striped;

pub use cache::ConcurrentCache;
pub use config::{ExecutorConfig, StripedCacheConfig};
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use executor::Executor;
pub use guarded::GuardedShard;
pub use shard::LruShard;
pub use striped::StripedCache;
