// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Parallel wrapper - the standard pipeline for parallel processing.
//!
//! Assembles, from the source outwards:
//!
//! 1. a [`Serialized`] stage, when `parallel_operations > 1`, so the source
//!    never sees concurrent pulls
//! 2. the caller's intermediate stages (`throughs`), which run concurrently
//! 3. a [`CompletedFirst`] stage, when `completed_first` is set and
//!    `parallel_operations > 1`
//! 4. a [`Pool`] with `max_parallel = parallel_operations` and `buffer_size`
//!    defaulting to `parallel_operations`
//!
//! The configuration is validated strictly before anything is built.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream, BoxError};
//! use sluice_ops::{ParallelConfig, ParallelizeExt, ThenExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let doubled = from_stream(stream::iter(1..=4))
//!     .parallelize(ParallelConfig::new(3), |source| {
//!         source.then(|n| async move { Ok::<_, BoxError>(n * 2) })
//!     })
//!     .unwrap();
//!
//! assert_eq!(drain(&doubled).await.unwrap(), vec![2, 4, 6, 8]);
//! # }
//! ```

use crate::completed_first::{CompletedFirst, CompletedFirstExt};
use crate::config::ParallelConfig;
use crate::pool::{Pool, PoolExt};
use crate::serialize::{SerializeExt, Serialized};
use crate::when::WhenExt;
use sluice_core::{ConfigError, Either, Producer};

/// The source as seen by the intermediate stages.
pub type Source<P> = Either<Serialized<P>, P>;

/// The assembled pipeline returned by [`ParallelizeExt::parallelize`].
pub type Parallelized<Q> = Pool<Either<CompletedFirst<Q>, Q>>;

/// Extension trait providing the `parallelize` wrapper for producers.
pub trait ParallelizeExt: Producer + Sized {
    /// Build the parallel pipeline around `throughs`.
    ///
    /// See the [module-level documentation](crate::parallelize) for the stages.
    ///
    /// # Errors
    /// [`ConfigError`] when `parallel_operations` is zero or the buffer cannot
    /// hold the result of every parallel operation.
    fn parallelize<F, Q>(self, config: ParallelConfig, throughs: F) -> Result<Parallelized<Q>, ConfigError>
    where
        F: FnOnce(Source<Self>) -> Q,
        Q: Producer;

    /// [`parallelize`](Self::parallelize) without intermediate stages.
    ///
    /// # Errors
    /// See [`parallelize`](Self::parallelize).
    fn parallelize_source(self, config: ParallelConfig) -> Result<Parallelized<Source<Self>>, ConfigError> {
        self.parallelize(config, |source| source)
    }
}

impl<P: Producer> ParallelizeExt for P {
    fn parallelize<F, Q>(self, config: ParallelConfig, throughs: F) -> Result<Parallelized<Q>, ConfigError>
    where
        F: FnOnce(Source<Self>) -> Q,
        Q: Producer,
    {
        let pool_config = config.pool_config()?;
        let is_parallel = config.is_parallel();
        debug!("parallelize with {:?}", config);

        throughs(self.when(is_parallel, SerializeExt::serialize))
            .when(config.completed_first && is_parallel, CompletedFirstExt::completed_first)
            .pool(pool_config)
    }
}
