// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Driver loops that pull a producer until it is done.

use crate::error::{BoxError, PullError};
use crate::producer::Producer;

/// Pull `producer` until it reports [`PullError::Done`], discarding the values.
///
/// The terminal marker ends the loop gracefully. Any other rejection is fatal
/// for the loop and is returned.
///
/// # Errors
/// Returns the reason of the first application rejection.
///
/// # Example
///
/// ```
/// use sluice_core::{consume, from_stream};
/// use futures::stream;
///
/// # #[tokio::main]
/// # async fn main() {
/// consume(&from_stream(stream::iter(0..3))).await.unwrap();
/// # }
/// ```
pub async fn consume<P>(producer: &P) -> Result<(), BoxError>
where
    P: Producer + ?Sized,
{
    let mut pulled = 0usize;
    loop {
        match producer.pull().await {
            Ok(_) => pulled += 1,
            Err(PullError::Done) => {
                debug!("consume finished after {} values", pulled);
                return Ok(());
            }
            Err(PullError::Rejected(reason)) => {
                warn!("consume stopped after {} values: {}", pulled, reason);
                return Err(reason);
            }
        }
    }
}

/// Pull `producer` until it reports [`PullError::Done`], collecting the values.
///
/// # Errors
/// Returns the reason of the first application rejection; values collected so far
/// are dropped.
pub async fn drain<P>(producer: &P) -> Result<Vec<P::Item>, BoxError>
where
    P: Producer + ?Sized,
{
    let mut values = Vec::new();
    loop {
        match producer.pull().await {
            Ok(value) => values.push(value),
            Err(PullError::Done) => return Ok(values),
            Err(PullError::Rejected(reason)) => return Err(reason),
        }
    }
}
