// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reorderer - delivers upstream outcomes in completion order.
//!
//! Every call is queued and forwarded upstream immediately. When any upstream
//! pull completes, its outcome goes to a queued call regardless of which call
//! started it:
//!
//! - a value or an application rejection settles the **oldest** waiting call
//! - [`PullError::Done`] settles the **newest** waiting call, so earlier callers
//!   can still receive values that are in flight
//!
//! Placed in front of a [`Pool`](crate::Pool), this lets fast results overtake
//! slow ones.

use futures::FutureExt;
use sluice_core::mutex::Mutex;
use sluice_core::{deferred, pull_catching_panics, spawn_detached, Deferred, Producer, PullError, PullFuture};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Producer settling calls in the order upstream pulls complete.
///
/// Created by [`CompletedFirstExt::completed_first`].
pub struct CompletedFirst<P: Producer> {
    upstream: P,
    waiting: Arc<Mutex<VecDeque<Deferred<P::Item>>>>,
}

impl<P: Producer> fmt::Debug for CompletedFirst<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletedFirst")
            .field("waiting", &self.waiting.lock().len())
            .finish_non_exhaustive()
    }
}

impl<P: Producer> Producer for CompletedFirst<P> {
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let (pending, settlement) = deferred();
        self.waiting.lock().push_back(pending);

        let pulling = pull_catching_panics(&self.upstream);
        let waiting = Arc::clone(&self.waiting);
        spawn_detached(async move {
            let result = pulling.await;
            let next = {
                let mut waiting = waiting.lock();
                match result {
                    Err(PullError::Done) => waiting.pop_back(),
                    _ => waiting.pop_front(),
                }
            };
            if let Some(next) = next {
                next.settle(result);
            }
        });

        settlement.boxed()
    }
}

/// Extension trait providing the `completed_first` operator for producers.
pub trait CompletedFirstExt: Producer + Sized {
    /// Hand out upstream outcomes as soon as they complete.
    ///
    /// See the [module-level documentation](crate::completed_first) for details.
    fn completed_first(self) -> CompletedFirst<Self>;
}

impl<P: Producer> CompletedFirstExt for P {
    fn completed_first(self) -> CompletedFirst<Self> {
        CompletedFirst {
            upstream: self,
            waiting: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}
