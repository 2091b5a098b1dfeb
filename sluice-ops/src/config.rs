// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Construction parameters for the configurable combinators.
//!
//! Every config validates eagerly and reports a [`ConfigError`] before any pull
//! is made. With the `serde` feature the structs can be loaded from a
//! configuration file:
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use sluice_ops::ParallelConfig;
//!
//! let config: ParallelConfig =
//!     serde_json::from_str(r#"{ "parallel_operations": 4, "completed_first": true }"#).unwrap();
//! assert_eq!(config.pool_config().unwrap().buffer_size, 4);
//! # }
//! ```

use sluice_core::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of a parallel pool.
///
/// `max_parallel` bounds the number of upstream pulls in flight; `buffer_size`
/// bounds how many results are prefetched ahead of demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolConfig {
    pub max_parallel: usize,
    pub buffer_size: usize,
}

impl PoolConfig {
    /// Pool with `max_parallel` pulls in flight and `buffer_size` prefetched results.
    #[must_use]
    pub const fn new(max_parallel: usize, buffer_size: usize) -> Self {
        Self {
            max_parallel,
            buffer_size,
        }
    }

    /// Sequential prefetch of `buffer_size` results (one pull in flight).
    #[must_use]
    pub const fn buffer(buffer_size: usize) -> Self {
        Self::new(1, buffer_size)
    }

    /// Check the parameters accepted by [`PoolExt::pool`](crate::PoolExt::pool).
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `max_parallel` is zero.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        match ConfigError::ensure_positive("max_parallel", self.max_parallel) {
            Ok(_) => Ok(self),
            Err(error) => Err(error),
        }
    }

    /// Like [`validate`](Self::validate), and additionally require room for the
    /// result of every parallel operation: `buffer_size >= max_parallel - 1`.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] or [`ConfigError::BufferTooSmall`].
    pub const fn validate_strict(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Ok(config) if config.buffer_size.saturating_add(1) < config.max_parallel => {
                Err(ConfigError::BufferTooSmall {
                    buffer_size: config.buffer_size,
                    max_parallel: config.max_parallel,
                })
            }
            other => other,
        }
    }
}

/// Parameters of the [`parallelize`](crate::ParallelizeExt::parallelize) wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Upstream pulls allowed in flight.
    pub parallel_operations: usize,
    /// Prefetched results; defaults to `parallel_operations`.
    pub buffer_size: Option<usize>,
    /// Deliver results in completion order instead of call order.
    pub completed_first: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ParallelConfig {
    /// Call-ordered parallelization with the default buffer.
    #[must_use]
    pub const fn new(parallel_operations: usize) -> Self {
        Self {
            parallel_operations,
            buffer_size: None,
            completed_first: false,
        }
    }

    /// Prefetch `buffer_size` results instead of `parallel_operations`.
    #[must_use]
    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Choose completion order over call order.
    #[must_use]
    pub const fn with_completed_first(mut self, completed_first: bool) -> Self {
        self.completed_first = completed_first;
        self
    }

    /// Returns `true` when more than one upstream pull may be in flight.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.parallel_operations > 1
    }

    /// Resolve the pool parameters, validated strictly.
    ///
    /// # Errors
    /// See [`PoolConfig::validate_strict`].
    pub const fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let buffer_size = match self.buffer_size {
            Some(buffer_size) => buffer_size,
            None => self.parallel_operations,
        };
        PoolConfig::new(self.parallel_operations, buffer_size).validate_strict()
    }
}

/// What the batcher does with a partial batch when upstream rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RejectionPolicy {
    /// Propagate the rejection and keep the partial batch for the next call.
    #[default]
    Retain,
    /// Deliver the partial batch now and report the rejection on the next call.
    Flush,
}

/// Parameters of the [`batch`](crate::BatchExt::batch) combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchConfig {
    pub batch_size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_rejection: RejectionPolicy,
}

impl BatchConfig {
    /// Batches of `batch_size` values that keep partial batches across rejections.
    #[must_use]
    pub const fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            on_rejection: RejectionPolicy::Retain,
        }
    }

    /// Choose what a rejection does to a partial batch.
    #[must_use]
    pub const fn with_rejection_policy(mut self, on_rejection: RejectionPolicy) -> Self {
        self.on_rejection = on_rejection;
        self
    }

    /// # Errors
    /// [`ConfigError::NotPositive`] when `batch_size` is zero.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        match ConfigError::ensure_positive("batch_size", self.batch_size) {
            Ok(_) => Ok(self),
            Err(error) => Err(error),
        }
    }
}

/// Retry budget of the [`try_map`](crate::TryMapExt::try_map) combinator.
///
/// `None` retries forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryConfig {
    pub max_consecutive_errors: Option<usize>,
}

impl RetryConfig {
    /// Give up after `max_consecutive_errors` failed attempts within one call.
    #[must_use]
    pub const fn new(max_consecutive_errors: usize) -> Self {
        Self {
            max_consecutive_errors: Some(max_consecutive_errors),
        }
    }

    /// Retry until a transform succeeds.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_consecutive_errors: None,
        }
    }

    /// # Errors
    /// [`ConfigError::NotPositive`] when the budget is `Some(0)`.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        match self.max_consecutive_errors {
            Some(0) => Err(ConfigError::NotPositive {
                parameter: "max_consecutive_errors",
            }),
            _ => Ok(self),
        }
    }
}
