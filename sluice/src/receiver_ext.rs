// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning tokio channel receivers into producers.
//!
//! Each pull receives one message. Once every sender is dropped and the channel
//! is empty, pulls report [`PullError::Done`](sluice_core::PullError::Done).

use sluice_core::{from_stream, FromStream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, UnboundedReceiverStream};

/// Extension trait for bounded `Receiver`s.
pub trait ReceiverExt<T> {
    /// Pull messages from the channel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::prelude::*;
    /// use tokio::sync::mpsc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = mpsc::channel(4);
    /// let jobs = rx.into_producer();
    ///
    /// tx.send("resize").await.unwrap();
    /// drop(tx);
    ///
    /// assert_eq!(jobs.pull().await.unwrap(), "resize");
    /// assert!(jobs.pull().await.unwrap_err().is_done());
    /// # }
    /// ```
    fn into_producer(self) -> FromStream<ReceiverStream<T>>;
}

impl<T: Send + 'static> ReceiverExt<T> for mpsc::Receiver<T> {
    fn into_producer(self) -> FromStream<ReceiverStream<T>> {
        from_stream(ReceiverStream::new(self))
    }
}

/// Extension trait for `UnboundedReceiver`s.
pub trait UnboundedReceiverExt<T> {
    /// Pull messages from the channel.
    fn into_producer(self) -> FromStream<UnboundedReceiverStream<T>>;
}

impl<T: Send + 'static> UnboundedReceiverExt<T> for mpsc::UnboundedReceiver<T> {
    fn into_producer(self) -> FromStream<UnboundedReceiverStream<T>> {
        from_stream(UnboundedReceiverStream::new(self))
    }
}
