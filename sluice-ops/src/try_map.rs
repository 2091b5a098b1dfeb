// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Retrying map operator - transforms values, pulling again when a transform fails.
//!
//! Each call pulls one upstream value and applies the asynchronous transform.
//! When the transform fails:
//!
//! 1. the error handler is called with the error and the original value; if the
//!    handler itself fails, the call rejects with the handler's error
//! 2. the failure is counted; once the count reaches `max_consecutive_errors`
//!    the call rejects with the transform's latest error
//! 3. otherwise the next upstream value is pulled and transformed
//!
//! The count belongs to the call and starts from zero every time, so a success
//! always resets it. Upstream rejections and
//! [`PullError::Done`](sluice_core::PullError::Done) propagate unchanged and are
//! never counted.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream, BoxError};
//! use sluice_ops::{RetryConfig, TryMapExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let parsed = from_stream(stream::iter(vec!["1", "x", "3"]))
//!     .try_map(
//!         |text| async move { text.parse::<u32>().map_err(BoxError::from) },
//!         |error, text| {
//!             eprintln!("skipping {text}: {error}");
//!             Ok(())
//!         },
//!         RetryConfig::new(3),
//!     )
//!     .unwrap();
//!
//! assert_eq!(drain(&parsed).await.unwrap(), vec![1, 3]);
//! # }
//! ```

use crate::config::RetryConfig;
use futures::FutureExt;
use sluice_core::{BoxError, ConfigError, Producer, PullError, PullFuture};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Producer mapping upstream values with a fallible asynchronous transform.
///
/// Created by [`TryMapExt::try_map`].
pub struct TryMap<P, F, H> {
    upstream: Arc<P>,
    transform: Arc<F>,
    on_error: Arc<H>,
    config: RetryConfig,
}

impl<P, F, H> fmt::Debug for TryMap<P, F, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMap")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P, F, Fut, U, H> Producer for TryMap<P, F, H>
where
    P: Producer,
    P::Item: Clone,
    F: Fn(P::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
    U: Send + 'static,
    H: Fn(&BoxError, &P::Item) -> Result<(), BoxError> + Send + Sync + 'static,
{
    type Item = U;

    fn pull(&self) -> PullFuture<U> {
        let upstream = Arc::clone(&self.upstream);
        let transform = Arc::clone(&self.transform);
        let on_error = Arc::clone(&self.on_error);
        let max_consecutive_errors = self.config.max_consecutive_errors;

        async move {
            let mut consecutive_errors = 0usize;
            loop {
                let value = upstream.pull().await?;
                let original = value.clone();

                match transform(value).await {
                    Ok(mapped) => return Ok(mapped),
                    Err(error) => {
                        on_error(&error, &original)?;
                        consecutive_errors += 1;

                        if max_consecutive_errors.is_some_and(|max| consecutive_errors >= max) {
                            warn!("try_map giving up after {} consecutive errors: {}", consecutive_errors, error);
                            return Err(PullError::Rejected(error));
                        }
                        debug!("try_map retrying after error {}: {}", consecutive_errors, error);
                    }
                }
            }
        }
        .boxed()
    }
}

/// Extension trait providing the `try_map` operator for producers.
pub trait TryMapExt: Producer + Sized {
    /// Map values through `transform`, skipping values whose transform fails.
    ///
    /// `on_error` observes each failure together with the value that caused it.
    /// See the [module-level documentation](crate::try_map) for the retry rules.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `config` allows zero errors.
    fn try_map<F, Fut, U, H>(self, transform: F, on_error: H, config: RetryConfig) -> Result<TryMap<Self, F, H>, ConfigError>
    where
        Self::Item: Clone,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
        U: Send + 'static,
        H: Fn(&BoxError, &Self::Item) -> Result<(), BoxError> + Send + Sync + 'static;
}

impl<P: Producer> TryMapExt for P {
    fn try_map<F, Fut, U, H>(self, transform: F, on_error: H, config: RetryConfig) -> Result<TryMap<Self, F, H>, ConfigError>
    where
        Self::Item: Clone,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
        U: Send + 'static,
        H: Fn(&BoxError, &Self::Item) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Ok(TryMap {
            upstream: Arc::new(self),
            transform: Arc::new(transform),
            on_error: Arc::new(on_error),
            config: config.validate()?,
        })
    }
}
