// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Batch operator - groups consecutive upstream values into fixed-size batches.
//!
//! Each call pulls upstream sequentially until `batch_size` values have been
//! accumulated and delivers them as one `Vec`.
//!
//! # Termination
//!
//! When upstream reports [`PullError::Done`] with values accumulated, those
//! values are delivered as a final short batch. From then on every call reports
//! `Done` without pulling upstream again.
//!
//! # Rejections
//!
//! With [`RejectionPolicy::Retain`] (the default) an upstream rejection is
//! propagated at once and the values accumulated so far are kept; the next call
//! resumes filling the same batch. With [`RejectionPolicy::Flush`] a non-empty
//! partial batch is delivered first and the rejection is reported by the next
//! call.
//!
//! Concurrent calls are served one at a time.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::BatchExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let batches = from_stream(stream::iter(1..=5)).batch(2).unwrap();
//! assert_eq!(
//!     drain(&batches).await.unwrap(),
//!     vec![vec![1, 2], vec![3, 4], vec![5]]
//! );
//! # }
//! ```

use crate::config::{BatchConfig, RejectionPolicy};
use futures::FutureExt;
use sluice_core::mutex::AsyncMutex;
use sluice_core::{BoxError, ConfigError, Producer, PullError, PullFuture};
use std::fmt;
use std::mem;
use std::sync::Arc;

/// Producer delivering upstream values in batches.
///
/// Created by [`BatchExt::batch`] or [`BatchExt::batch_with`].
pub struct Batch<P: Producer> {
    upstream: Arc<P>,
    config: BatchConfig,
    state: Arc<AsyncMutex<BatchState<P::Item>>>,
}

struct BatchState<T> {
    values: Vec<T>,
    deferred_rejection: Option<BoxError>,
    exhausted: bool,
}

impl<P: Producer> fmt::Debug for Batch<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: Producer> Producer for Batch<P> {
    type Item = Vec<P::Item>;

    fn pull(&self) -> PullFuture<Vec<P::Item>> {
        let upstream = Arc::clone(&self.upstream);
        let state = Arc::clone(&self.state);
        let BatchConfig {
            batch_size,
            on_rejection,
        } = self.config;

        async move {
            let mut state = state.lock().await;
            if state.exhausted {
                return Err(PullError::Done);
            }
            if let Some(reason) = state.deferred_rejection.take() {
                return Err(PullError::Rejected(reason));
            }

            while state.values.len() < batch_size {
                match upstream.pull().await {
                    Ok(value) => state.values.push(value),
                    Err(PullError::Done) => {
                        state.exhausted = true;
                        debug!("batch upstream done with {} values pending", state.values.len());
                        return if state.values.is_empty() {
                            Err(PullError::Done)
                        } else {
                            Ok(mem::take(&mut state.values))
                        };
                    }
                    Err(PullError::Rejected(reason)) => {
                        if on_rejection == RejectionPolicy::Flush && !state.values.is_empty() {
                            state.deferred_rejection = Some(reason);
                            return Ok(mem::take(&mut state.values));
                        }
                        return Err(PullError::Rejected(reason));
                    }
                }
            }

            Ok(mem::replace(&mut state.values, Vec::with_capacity(batch_size)))
        }
        .boxed()
    }
}

/// Extension trait providing the `batch` operator for producers.
pub trait BatchExt: Producer + Sized {
    /// Group upstream values into batches of `batch_size`, retaining partial
    /// batches across rejections.
    ///
    /// See the [module-level documentation](crate::batch) for details.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `batch_size` is zero.
    fn batch(self, batch_size: usize) -> Result<Batch<Self>, ConfigError> {
        self.batch_with(BatchConfig::new(batch_size))
    }

    /// Group upstream values according to `config`.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `config.batch_size` is zero.
    fn batch_with(self, config: BatchConfig) -> Result<Batch<Self>, ConfigError>;
}

impl<P: Producer> BatchExt for P {
    fn batch_with(self, config: BatchConfig) -> Result<Batch<Self>, ConfigError> {
        let config = config.validate()?;
        Ok(Batch {
            upstream: Arc::new(self),
            config,
            state: Arc::new(AsyncMutex::new(BatchState {
                values: Vec::with_capacity(config.batch_size),
                deferred_rejection: None,
                exhausted: false,
            })),
        })
    }
}
