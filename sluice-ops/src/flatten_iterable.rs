// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flatten operator - one element per call out of upstream collections.
//!
//! Each upstream value is a collection; calls are answered from the current
//! collection until it is exhausted, and only then is upstream pulled again.
//! Empty collections are skipped. Upstream rejections and
//! [`PullError::Done`](sluice_core::PullError::Done) propagate unchanged.
//!
//! Concurrent calls are served one at a time so every element is handed out
//! exactly once.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::FlattenIterableExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pages = from_stream(stream::iter(vec![vec![1, 2], vec![], vec![3]]));
//! assert_eq!(drain(&pages.flatten_iterable()).await.unwrap(), vec![1, 2, 3]);
//! # }
//! ```

use futures::FutureExt;
use sluice_core::mutex::AsyncMutex;
use sluice_core::{Producer, PullFuture};
use std::fmt;
use std::sync::Arc;

type Cursor<P> = Option<<<P as Producer>::Item as IntoIterator>::IntoIter>;

/// Producer yielding the elements of upstream collections one by one.
///
/// Created by [`FlattenIterableExt::flatten_iterable`].
pub struct FlattenIterable<P>
where
    P: Producer,
    P::Item: IntoIterator,
{
    upstream: Arc<P>,
    cursor: Arc<AsyncMutex<Cursor<P>>>,
}

impl<P> fmt::Debug for FlattenIterable<P>
where
    P: Producer,
    P::Item: IntoIterator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenIterable").finish_non_exhaustive()
    }
}

impl<P> Producer for FlattenIterable<P>
where
    P: Producer,
    P::Item: IntoIterator,
    <P::Item as IntoIterator>::Item: Send + 'static,
    <P::Item as IntoIterator>::IntoIter: Send + 'static,
{
    type Item = <P::Item as IntoIterator>::Item;

    fn pull(&self) -> PullFuture<Self::Item> {
        let upstream = Arc::clone(&self.upstream);
        let cursor = Arc::clone(&self.cursor);

        async move {
            let mut cursor = cursor.lock().await;
            if let Some(element) = Option::as_mut(&mut *cursor).and_then(Iterator::next) {
                return Ok(element);
            }

            loop {
                let mut elements = upstream.pull().await?.into_iter();
                match elements.next() {
                    Some(element) => {
                        *cursor = Some(elements);
                        return Ok(element);
                    }
                    None => debug!("flatten_iterable skipped an empty collection"),
                }
            }
        }
        .boxed()
    }
}

/// Extension trait providing the `flatten_iterable` operator for producers.
pub trait FlattenIterableExt: Producer + Sized
where
    Self::Item: IntoIterator,
{
    /// Yield the elements of each upstream collection in order.
    ///
    /// See the [module-level documentation](crate::flatten_iterable) for details.
    fn flatten_iterable(self) -> FlattenIterable<Self>;
}

impl<P> FlattenIterableExt for P
where
    P: Producer,
    P::Item: IntoIterator,
{
    fn flatten_iterable(self) -> FlattenIterable<Self> {
        FlattenIterable {
            upstream: Arc::new(self),
            cursor: Arc::new(AsyncMutex::new(None)),
        }
    }
}
