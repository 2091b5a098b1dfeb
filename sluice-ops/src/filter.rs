// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtering operators - skip values and rejections until one is accepted.
//!
//! A filter holds two optional predicates built with [`Predicates`]: one for
//! values and one for rejection reasons. Each call keeps pulling upstream until
//! an outcome is accepted; a missing predicate accepts everything of its kind.
//! [`PullError::Done`] is never shown to either predicate and always passes
//! through.
//!
//! If a predicate itself fails, the current call rejects with that failure.
//!
//! [`catcher`](FilterExt::catcher) is a filter whose rejection predicate hands
//! every reason to a callback and then discards it, so the caller only ever sees
//! values or `Done`.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::FilterExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let even = from_stream(stream::iter(1..=6)).filter_values(|n| Ok(n % 2 == 0));
//! assert_eq!(drain(&even).await.unwrap(), vec![2, 4, 6]);
//! # }
//! ```

use futures::FutureExt;
use sluice_core::{BoxError, Producer, PullError, PullFuture};
use std::fmt;
use std::sync::Arc;

/// Decides whether a value is delivered.
pub type ValuePredicate<T> = Arc<dyn Fn(&T) -> Result<bool, BoxError> + Send + Sync>;

/// Decides whether a rejection reason is delivered.
pub type RejectionPredicate = Arc<dyn Fn(&BoxError) -> Result<bool, BoxError> + Send + Sync>;

/// The pair of predicates applied by [`Filter`].
pub struct Predicates<T> {
    values: Option<ValuePredicate<T>>,
    rejections: Option<RejectionPredicate>,
}

impl<T> Predicates<T> {
    /// Accept everything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: None,
            rejections: None,
        }
    }

    /// Deliver only values for which `accept` returns `Ok(true)`.
    #[must_use]
    pub fn values<F>(mut self, accept: F) -> Self
    where
        F: Fn(&T) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.values = Some(Arc::new(accept));
        self
    }

    /// Deliver only rejections for which `accept` returns `Ok(true)`.
    #[must_use]
    pub fn rejections<F>(mut self, accept: F) -> Self
    where
        F: Fn(&BoxError) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.rejections = Some(Arc::new(accept));
        self
    }
}

impl<T> Default for Predicates<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Predicates<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            rejections: self.rejections.clone(),
        }
    }
}

impl<T> fmt::Debug for Predicates<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicates")
            .field("values", &self.values.is_some())
            .field("rejections", &self.rejections.is_some())
            .finish()
    }
}

/// Producer skipping unwanted outcomes.
///
/// Created by [`FilterExt::filter`], [`FilterExt::filter_values`] or
/// [`FilterExt::catcher`].
pub struct Filter<P: Producer> {
    upstream: Arc<P>,
    predicates: Predicates<P::Item>,
}

impl<P: Producer> fmt::Debug for Filter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}

impl<P: Producer> Producer for Filter<P> {
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let upstream = Arc::clone(&self.upstream);
        let predicates = self.predicates.clone();

        async move {
            loop {
                match upstream.pull().await {
                    Ok(value) => match &predicates.values {
                        Some(accept) if !accept(&value)? => debug!("filter skipped a value"),
                        _ => return Ok(value),
                    },
                    Err(PullError::Done) => return Err(PullError::Done),
                    Err(PullError::Rejected(reason)) => match &predicates.rejections {
                        Some(accept) if !accept(&reason)? => {
                            debug!("filter skipped a rejection: {}", reason);
                        }
                        _ => return Err(PullError::Rejected(reason)),
                    },
                }
            }
        }
        .boxed()
    }
}

/// Extension trait providing the filtering operators for producers.
pub trait FilterExt: Producer + Sized {
    /// Skip the outcomes rejected by `predicates`.
    ///
    /// See the [module-level documentation](crate::filter) for details.
    fn filter(self, predicates: Predicates<Self::Item>) -> Filter<Self>;

    /// Skip values for which `accept` returns `Ok(false)`; rejections pass through.
    fn filter_values<F>(self, accept: F) -> Filter<Self>
    where
        F: Fn(&Self::Item) -> Result<bool, BoxError> + Send + Sync + 'static;

    /// Hand every rejection to `on_rejection` and keep pulling.
    ///
    /// If `on_rejection` fails, the call rejects with its error instead.
    fn catcher<F>(self, on_rejection: F) -> Filter<Self>
    where
        F: Fn(&BoxError) -> Result<(), BoxError> + Send + Sync + 'static;
}

impl<P: Producer> FilterExt for P {
    fn filter(self, predicates: Predicates<Self::Item>) -> Filter<Self> {
        Filter {
            upstream: Arc::new(self),
            predicates,
        }
    }

    fn filter_values<F>(self, accept: F) -> Filter<Self>
    where
        F: Fn(&Self::Item) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.filter(Predicates::new().values(accept))
    }

    fn catcher<F>(self, on_rejection: F) -> Filter<Self>
    where
        F: Fn(&BoxError) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.filter(Predicates::new().rejections(move |reason| {
            on_rejection(reason)?;
            Ok(false)
        }))
    }
}
