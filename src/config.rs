//! Construction-time configuration for [`crate::striped::StripedCache`]
//! and [`crate::executor::Executor`].
//!
//! Both configs are validated once, at `build()`, rather than carrying
//! validation logic into every constructor overload.

use std::time::Duration;

use crate::error::{CacheError, Result};
use crate::executor::Executor;
use crate::striped::{StripedCache, DEFAULT_MIN_STRIPE_SIZE};
use std::hash::Hash;

/// Default idle timeout before a worker above the low watermark retires.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for a [`StripedCache`].
#[derive(Debug, Clone)]
pub struct StripedCacheConfig {
    stripe_count: usize,
    max_size: u64,
    min_stripe_size: u64,
}

impl StripedCacheConfig {
    /// Starts a config with the crate's default per-stripe floor.
    pub fn new(stripe_count: usize, max_size: u64) -> Self {
        StripedCacheConfig {
            stripe_count,
            max_size,
            min_stripe_size: DEFAULT_MIN_STRIPE_SIZE,
        }
    }

    /// Overrides the per-stripe floor.
    pub fn min_stripe_size(mut self, min_stripe_size: u64) -> Self {
        self.min_stripe_size = min_stripe_size;
        self
    }

    /// Validates and builds the cache.
    pub fn build<K, V>(self) -> Result<StripedCache<K, V>>
    where
        K: Hash + Eq + Clone,
    {
        StripedCache::with_min_stripe_size(self.stripe_count, self.max_size, self.min_stripe_size)
    }
}

/// Builder for an [`Executor`].
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    low_watermark: usize,
    high_watermark: usize,
    max_queue: usize,
    idle_timeout: Duration,
}

impl ExecutorConfig {
    /// Starts a config with the crate's default idle timeout and an
    /// unbounded queue.
    pub fn new(low_watermark: usize, high_watermark: usize) -> Self {
        ExecutorConfig {
            low_watermark,
            high_watermark,
            max_queue: usize::MAX,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Caps the number of tasks the FIFO queue will hold before
    /// [`Executor::submit`] starts refusing work.
    pub fn max_queue(mut self, max_queue: usize) -> Self {
        self.max_queue = max_queue;
        self
    }

    /// Overrides how long a worker above the low watermark waits for a
    /// task before retiring.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Validates and starts the pool at `low_watermark` workers.
    pub fn build(self) -> Result<Executor> {
        if self.low_watermark == 0 || self.high_watermark == 0 || self.low_watermark > self.high_watermark {
            return Err(CacheError::InvalidWatermarks {
                low: self.low_watermark,
                high: self.high_watermark,
            });
        }
        Ok(Executor::start(
            self.low_watermark,
            self.high_watermark,
            self.max_queue,
            self.idle_timeout,
        ))
    }
}
