// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pass-through operator for observing values.
//!
//! The callback sees every value by reference before it is delivered. Returning
//! an error rejects the call instead of delivering the value. Rejections and
//! [`PullError::Done`](sluice_core::PullError::Done) are not shown to the
//! callback.

use futures::FutureExt;
use sluice_core::{BoxError, Producer, PullFuture};
use std::fmt;
use std::sync::Arc;

/// Producer calling a side effect for each value.
///
/// Created by [`InspectExt::inspect`].
pub struct Inspect<P, F> {
    upstream: P,
    f: Arc<F>,
}

impl<P, F> fmt::Debug for Inspect<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspect").finish_non_exhaustive()
    }
}

impl<P, F> Producer for Inspect<P, F>
where
    P: Producer,
    F: Fn(&P::Item) -> Result<(), BoxError> + Send + Sync + 'static,
{
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let pulling = self.upstream.pull();
        let f = Arc::clone(&self.f);
        async move {
            let value = pulling.await?;
            f(&value)?;
            Ok(value)
        }
        .boxed()
    }
}

/// Extension trait providing the `inspect` operator for producers.
pub trait InspectExt: Producer + Sized {
    /// Call `f` with a reference to every value.
    fn inspect<F>(self, f: F) -> Inspect<Self, F>
    where
        F: Fn(&Self::Item) -> Result<(), BoxError> + Send + Sync + 'static;
}

impl<P: Producer> InspectExt for P {
    fn inspect<F>(self, f: F) -> Inspect<Self, F>
    where
        F: Fn(&Self::Item) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Inspect {
            upstream: self,
            f: Arc::new(f),
        }
    }
}
