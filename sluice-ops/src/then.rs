// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Asynchronous map operator.
//!
//! Each call pulls upstream once and passes the value through an async
//! function. A failing function rejects the call; upstream rejections and
//! [`PullError::Done`](sluice_core::PullError::Done) propagate unchanged and the
//! function is not called. The upstream pull starts as soon as the call is
//! made, so concurrency set up downstream reaches upstream unchanged.

use futures::FutureExt;
use sluice_core::{BoxError, Producer, PullError, PullFuture};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Producer mapping each upstream value through an async function.
///
/// Created by [`ThenExt::then`].
pub struct Then<P, F> {
    upstream: P,
    f: Arc<F>,
}

impl<P, F> fmt::Debug for Then<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Then").finish_non_exhaustive()
    }
}

impl<P, F, Fut, U> Producer for Then<P, F>
where
    P: Producer,
    F: Fn(P::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
    U: Send + 'static,
{
    type Item = U;

    fn pull(&self) -> PullFuture<U> {
        let pulling = self.upstream.pull();
        let f = Arc::clone(&self.f);
        async move {
            let value = pulling.await?;
            f(value).await.map_err(PullError::Rejected)
        }
        .boxed()
    }
}

/// Extension trait providing the `then` operator for producers.
pub trait ThenExt: Producer + Sized {
    /// Map every value through the async function `f`.
    ///
    /// See the [module-level documentation](crate::then) for details.
    fn then<F, Fut, U>(self, f: F) -> Then<Self, F>
    where
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
        U: Send + 'static;
}

impl<P: Producer> ThenExt for P {
    fn then<F, Fut, U>(self, f: F) -> Then<Self, F>
    where
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
        U: Send + 'static,
    {
        Then {
            upstream: self,
            f: Arc::new(f),
        }
    }
}
