// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::producer::{Producer, PullFuture, PullResult};
use core::fmt;
use core::future::Future;
use futures::FutureExt;

/// Producer built from a closure returning a future.
///
/// Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Turn a closure into a base [`Producer`].
///
/// The closure is invoked once per pull; the future it returns is the pull's
/// result. This is the usual way to wrap an I/O call factory before composing
/// combinators around it.
///
/// ```
/// use sluice_core::{from_fn, Producer};
///
/// # #[tokio::main]
/// # async fn main() {
/// let producer = from_fn(|| async { Ok::<_, sluice_core::PullError>("pong") });
/// assert_eq!(producer.pull().await.unwrap(), "pong");
/// # }
/// ```
pub fn from_fn<F, Fut, T>(f: F) -> FromFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PullResult<T>> + Send + 'static,
    T: Send + 'static,
{
    FromFn { f }
}

impl<F, Fut, T> Producer for FromFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PullResult<T>> + Send + 'static,
    T: Send + 'static,
{
    type Item = T;

    fn pull(&self) -> PullFuture<T> {
        (self.f)().boxed()
    }
}
