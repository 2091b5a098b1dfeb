// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conditional composition.
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::{SerializeExt, WhenExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let shared_source = true;
//! let producer = from_stream(stream::iter(0..3)).when(shared_source, |p| p.serialize());
//! assert_eq!(drain(&producer).await.unwrap(), vec![0, 1, 2]);
//! # }
//! ```

use sluice_core::{Either, Producer};

/// Extension trait applying a combinator only when a condition holds.
pub trait WhenExt: Producer + Sized {
    /// Return `f(self)` when `condition` is true, `self` unchanged otherwise.
    ///
    /// Both branches are producers of the same item type, joined by [`Either`].
    fn when<F, Q>(self, condition: bool, f: F) -> Either<Q, Self>
    where
        F: FnOnce(Self) -> Q,
        Q: Producer<Item = Self::Item>;
}

impl<P: Producer> WhenExt for P {
    fn when<F, Q>(self, condition: bool, f: F) -> Either<Q, Self>
    where
        F: FnOnce(Self) -> Q,
        Q: Producer<Item = Self::Item>,
    {
        if condition {
            Either::Left(f(self))
        } else {
            Either::Right(self)
        }
    }
}
