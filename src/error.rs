//! Structured construction errors.
//!
//! Every runtime failure the cache and executor produce in steady state is
//! a plain `bool`; the only place this crate raises is at construction
//! time, where a silently-degenerate instance would be worse than a loud
//! failure.

use thiserror::Error;

/// Errors raised while constructing a [`crate::striped::StripedCache`] or
/// [`crate::executor::Executor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// `aggregate_max_size / stripe_count` fell below the configured
    /// per-stripe floor.
    #[error("stripe too small: {computed} bytes per stripe (floor is {floor} bytes)")]
    StripeTooSmall {
        /// The per-stripe capacity that was computed.
        computed: u64,
        /// The floor it fell below.
        floor: u64,
    },

    /// `stripe_count` was zero.
    #[error("stripe count must be greater than zero")]
    ZeroStripes,

    /// The executor's watermarks were invalid (`low == 0`, `high == 0`,
    /// or `low > high`).
    #[error("invalid executor watermarks: low={low}, high={high}")]
    InvalidWatermarks {
        /// The low watermark that was requested.
        low: usize,
        /// The high watermark that was requested.
        high: usize,
    },
}

/// Convenience alias for the crate's fallible constructors.
pub type Result<T> = core::result::Result<T, CacheError>;
