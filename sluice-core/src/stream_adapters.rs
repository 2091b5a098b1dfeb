// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridges between producers and `futures::Stream`.
//!
//! - [`from_stream`] / [`from_try_stream`] pull from a stream one item at a time;
//!   the end of the stream becomes [`PullError::Done`].
//! - [`into_stream`] drives a producer sequentially and yields its results until
//!   the terminal marker; application rejections are yielded as `Err` items and
//!   the stream keeps going.

use crate::error::{BoxError, PullError};
use crate::mutex::AsyncMutex;
use crate::producer::{Producer, PullFuture};
use futures::stream::{self, Fuse};
use futures::{FutureExt, Stream, StreamExt};
use std::sync::Arc;

/// Producer reading from a `Stream`.
///
/// Created by [`from_stream`].
#[derive(Debug)]
pub struct FromStream<S> {
    stream: Arc<AsyncMutex<Fuse<S>>>,
}

/// Producer reading from a stream of `Result`s.
///
/// Created by [`from_try_stream`].
#[derive(Debug)]
pub struct FromTryStream<S> {
    stream: Arc<AsyncMutex<Fuse<S>>>,
}

/// Pull values out of a stream.
///
/// Concurrent pulls are answered in the order they acquire the stream.
///
/// ```
/// use sluice_core::{from_stream, Producer};
/// use futures::stream;
///
/// # #[tokio::main]
/// # async fn main() {
/// let producer = from_stream(stream::iter(vec![1, 2]));
/// assert_eq!(producer.pull().await.unwrap(), 1);
/// assert_eq!(producer.pull().await.unwrap(), 2);
/// assert!(producer.pull().await.unwrap_err().is_done());
/// # }
/// ```
pub fn from_stream<S>(stream: S) -> FromStream<S>
where
    S: Stream + Send + Unpin + 'static,
    S::Item: Send + 'static,
{
    FromStream {
        stream: Arc::new(AsyncMutex::new(stream.fuse())),
    }
}

/// Pull values out of a fallible stream; `Err` items become rejections.
pub fn from_try_stream<S, T, E>(stream: S) -> FromTryStream<S>
where
    S: Stream<Item = Result<T, E>> + Send + Unpin + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    FromTryStream {
        stream: Arc::new(AsyncMutex::new(stream.fuse())),
    }
}

impl<S> Producer for FromStream<S>
where
    S: Stream + Send + Unpin + 'static,
    S::Item: Send + 'static,
{
    type Item = S::Item;

    fn pull(&self) -> PullFuture<S::Item> {
        let stream = Arc::clone(&self.stream);
        async move { stream.lock().await.next().await.ok_or(PullError::Done) }.boxed()
    }
}

impl<S, T, E> Producer for FromTryStream<S>
where
    S: Stream<Item = Result<T, E>> + Send + Unpin + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    type Item = T;

    fn pull(&self) -> PullFuture<T> {
        let stream = Arc::clone(&self.stream);
        async move {
            match stream.lock().await.next().await {
                Some(Ok(value)) => Ok(value),
                Some(Err(reason)) => Err(PullError::Rejected(reason.into())),
                None => Err(PullError::Done),
            }
        }
        .boxed()
    }
}

/// Drive a producer as a `Stream` until it reports [`PullError::Done`].
///
/// ```
/// use sluice_core::{from_stream, into_stream};
/// use futures::{stream, StreamExt};
///
/// # #[tokio::main]
/// # async fn main() {
/// let values: Vec<_> = into_stream(from_stream(stream::iter(vec!['a', 'b'])))
///     .map(Result::unwrap)
///     .collect()
///     .await;
/// assert_eq!(values, vec!['a', 'b']);
/// # }
/// ```
pub fn into_stream<P>(producer: P) -> impl Stream<Item = Result<P::Item, BoxError>> + Send
where
    P: Producer,
{
    stream::unfold(producer, |producer| async move {
        match producer.pull().await {
            Ok(value) => Some((Ok(value), producer)),
            Err(PullError::Rejected(reason)) => Some((Err(reason), producer)),
            Err(PullError::Done) => None,
        }
    })
}
