// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The pull protocol shared by every combinator.

use crate::error::{PullError, UpstreamPanicked};
use futures::future::{BoxFuture, Either};
use futures::FutureExt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of a single pull.
pub type PullResult<T> = Result<T, PullError>;

/// Future returned by [`Producer::pull`].
///
/// It is `'static` so callers can keep several pulls in flight, move them into
/// spawned tasks, or drop them without borrowing the producer.
pub type PullFuture<T> = BoxFuture<'static, PullResult<T>>;

/// Shared, type-erased producer.
pub type SharedProducer<T> = Arc<dyn Producer<Item = T>>;

/// A nullary, re-invocable source of asynchronous values.
///
/// Every call to [`pull`](Producer::pull) yields exactly one result: a value, an
/// application rejection, or the terminal marker [`PullError::Done`]. Consumers
/// keep pulling until they observe `Done`.
///
/// Pulling again before an earlier pull has settled is allowed unless a specific
/// combinator documents otherwise.
///
/// # Example
///
/// ```
/// use sluice_core::{from_fn, Producer, PullError};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// # #[tokio::main]
/// # async fn main() {
/// let counter = AtomicUsize::new(0);
/// let producer = from_fn(move || {
///     let n = counter.fetch_add(1, Ordering::SeqCst);
///     async move { if n < 2 { Ok(n) } else { Err(PullError::Done) } }
/// });
///
/// assert_eq!(producer.pull().await.unwrap(), 0);
/// assert_eq!(producer.pull().await.unwrap(), 1);
/// assert!(producer.pull().await.unwrap_err().is_done());
/// # }
/// ```
pub trait Producer: Send + Sync + 'static {
    /// Type of the values this producer yields
    type Item: Send + 'static;

    /// Start one pull.
    fn pull(&self) -> PullFuture<Self::Item>;
}

/// Pull `producer`, turning a panic into a rejection.
///
/// A panic raised by `pull` itself or while its future is polled becomes
/// [`PullError::Rejected`] carrying [`UpstreamPanicked`]. Combinators that await
/// upstream in detached tasks pull through this so their bookkeeping still runs.
pub fn pull_catching_panics<P>(producer: &P) -> PullFuture<P::Item>
where
    P: Producer + ?Sized,
{
    let pulling = match catch_unwind(AssertUnwindSafe(|| producer.pull())) {
        Ok(pulling) => pulling,
        Err(payload) => return futures::future::ready(Err(panicked(payload.as_ref()))).boxed(),
    };

    AssertUnwindSafe(pulling)
        .catch_unwind()
        .map(|outcome| outcome.unwrap_or_else(|payload| Err(panicked(payload.as_ref()))))
        .boxed()
}

fn panicked(payload: &(dyn std::any::Any + Send)) -> PullError {
    let reason = UpstreamPanicked::from_payload(payload);
    warn!("{}", reason);
    PullError::rejected(reason)
}

impl<P> Producer for Arc<P>
where
    P: Producer + ?Sized,
{
    type Item = P::Item;

    fn pull(&self) -> PullFuture<Self::Item> {
        (**self).pull()
    }
}

impl<P> Producer for Box<P>
where
    P: Producer + ?Sized,
{
    type Item = P::Item;

    fn pull(&self) -> PullFuture<Self::Item> {
        (**self).pull()
    }
}

/// Either branch of a conditionally applied combinator.
impl<L, R> Producer for Either<L, R>
where
    L: Producer,
    R: Producer<Item = L::Item>,
{
    type Item = L::Item;

    fn pull(&self) -> PullFuture<Self::Item> {
        match self {
            Either::Left(left) => left.pull(),
            Either::Right(right) => right.pull(),
        }
    }
}
