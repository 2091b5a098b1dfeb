// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pending requests: a settle-once handle and the future that observes it.
//!
//! Combinators that answer a pull later than they receive it (the serializer,
//! the completion reorderer, the pool) create a [`Deferred`] / [`Settlement`]
//! pair, queue the `Deferred`, and hand the `Settlement` to the caller.
//!
//! [`Deferred::settle`] consumes the handle, so a pending request can settle at
//! most once. A handle dropped without settling rejects its settlement with
//! [`Abandoned`].

use crate::error::PullError;
use crate::producer::PullResult;
use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures_channel::oneshot;
use pin_project::pin_project;

/// Reason given to a settlement whose [`Deferred`] was dropped unsettled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pending request was dropped before it settled")]
pub struct Abandoned;

/// Create a new pending request.
///
/// # Example
///
/// ```
/// use sluice_core::deferred;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (pending, settlement) = deferred::<u32>();
/// pending.fulfill(7);
/// assert_eq!(settlement.await.unwrap(), 7);
/// # }
/// ```
#[must_use]
pub fn deferred<T>() -> (Deferred<T>, Settlement<T>) {
    let (sender, receiver) = oneshot::channel();
    (Deferred { sender }, Settlement { receiver })
}

/// Settling side of a pending request.
#[derive(Debug)]
pub struct Deferred<T> {
    sender: oneshot::Sender<PullResult<T>>,
}

impl<T> Deferred<T> {
    /// Settle the request.
    ///
    /// Returns `false` if the caller already dropped its [`Settlement`]; the
    /// result is discarded in that case.
    pub fn settle(self, result: PullResult<T>) -> bool {
        self.sender.send(result).is_ok()
    }

    /// Settle the request with a value.
    pub fn fulfill(self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle the request with a rejection.
    pub fn reject(self, error: PullError) -> bool {
        self.settle(Err(error))
    }

    /// Returns `true` once the caller has dropped its [`Settlement`].
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_canceled()
    }
}

/// Observing side of a pending request.
#[pin_project]
#[derive(Debug)]
#[must_use = "settlements do nothing unless polled"]
pub struct Settlement<T> {
    #[pin]
    receiver: oneshot::Receiver<PullResult<T>>,
}

impl<T> Future for Settlement<T> {
    type Output = PullResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match ready!(this.receiver.poll(cx)) {
            Ok(result) => Poll::Ready(result),
            Err(oneshot::Canceled) => Poll::Ready(Err(PullError::rejected(Abandoned))),
        }
    }
}
