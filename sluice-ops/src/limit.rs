// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Limit operator - forwards at most `n` pulls upstream.
//!
//! The first `n` calls are forwarded unchanged, whatever they settle with:
//! rejections count against the limit like values do. Every call after that
//! reports [`PullError::Done`] without touching upstream.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::LimitExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let first_two = from_stream(stream::iter(1..)).limit(2).unwrap();
//! assert_eq!(drain(&first_two).await.unwrap(), vec![1, 2]);
//! # }
//! ```

use futures::future::{ready, FutureExt};
use sluice_core::{ConfigError, Producer, PullError, PullFuture};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Producer forwarding a bounded number of pulls.
///
/// Created by [`LimitExt::limit`].
#[derive(Debug)]
pub struct Limit<P> {
    upstream: P,
    limit: usize,
    forwarded: AtomicUsize,
}

impl<P> Limit<P> {
    /// Calls that will still be forwarded upstream.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.forwarded.load(Ordering::SeqCst)
    }
}

impl<P: Producer> Producer for Limit<P> {
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let claimed = self
            .forwarded
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |forwarded| {
                (forwarded < self.limit).then_some(forwarded + 1)
            });

        match claimed {
            Ok(forwarded) => {
                if forwarded + 1 == self.limit {
                    debug!("limit of {} pulls reached", self.limit);
                }
                self.upstream.pull()
            }
            Err(_) => ready(Err(PullError::Done)).boxed(),
        }
    }
}

/// Extension trait providing the `limit` operator for producers.
pub trait LimitExt: Producer + Sized {
    /// Forward only the first `number_of_results` pulls upstream, then report
    /// [`PullError::Done`] forever.
    ///
    /// See the [module-level documentation](crate::limit) for details.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `number_of_results` is zero.
    fn limit(self, number_of_results: usize) -> Result<Limit<Self>, ConfigError>;
}

impl<P: Producer> LimitExt for P {
    fn limit(self, number_of_results: usize) -> Result<Limit<Self>, ConfigError> {
        let limit = ConfigError::ensure_positive("number_of_results", number_of_results)?;
        Ok(Limit {
            upstream: self,
            limit,
            forwarded: AtomicUsize::new(0),
        })
    }
}
