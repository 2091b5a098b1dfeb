// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serializer - at most one upstream pull in flight, whatever the call pattern.
//!
//! Calls are queued and answered in the order they were made. A single
//! background dispatcher pulls upstream, settles the oldest queued call with the
//! outcome (value, rejection or [`PullError::Done`](sluice_core::PullError::Done)
//! alike) and pulls again while calls are waiting.
//!
//! A panicking upstream pull rejects the oldest queued call with
//! [`UpstreamPanicked`](sluice_core::UpstreamPanicked) and dispatching carries on.
//!
//! Use it in front of a source that cannot handle concurrent requests, then
//! parallelize the work downstream of it.

use futures::FutureExt;
use sluice_core::mutex::Mutex;
use sluice_core::{deferred, pull_catching_panics, spawn_detached, Deferred, Producer, PullFuture};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Producer forwarding calls upstream strictly one at a time.
///
/// Created by [`SerializeExt::serialize`].
pub struct Serialized<P: Producer> {
    inner: Arc<Inner<P>>,
}

struct Inner<P: Producer> {
    upstream: P,
    state: Mutex<State<P::Item>>,
}

struct State<T> {
    waiting: VecDeque<Deferred<T>>,
    running: bool,
}

impl<P: Producer> fmt::Debug for Serialized<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Serialized")
            .field("waiting", &state.waiting.len())
            .field("running", &state.running)
            .finish_non_exhaustive()
    }
}

impl<P: Producer> Inner<P> {
    fn dispatch(this: &Arc<Self>) {
        {
            let mut state = this.state.lock();
            if state.running || state.waiting.is_empty() {
                return;
            }
            state.running = true;
        }

        let mut pulling = pull_catching_panics(&this.upstream);
        let inner = Arc::clone(this);
        spawn_detached(async move {
            loop {
                let result = pulling.await;
                let more = {
                    let mut state = inner.state.lock();
                    if let Some(oldest) = state.waiting.pop_front() {
                        if !oldest.settle(result) {
                            debug!("serialize discarded a result nobody waited for");
                        }
                    }
                    if state.waiting.is_empty() {
                        state.running = false;
                    }
                    state.running
                };
                if !more {
                    return;
                }
                pulling = pull_catching_panics(&inner.upstream);
            }
        });
    }
}

impl<P: Producer> Producer for Serialized<P> {
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let (pending, settlement) = deferred();
        self.inner.state.lock().waiting.push_back(pending);
        Inner::dispatch(&self.inner);
        settlement.boxed()
    }
}

/// Extension trait providing the `serialize` operator for producers.
pub trait SerializeExt: Producer + Sized {
    /// Never let more than one upstream pull run at a time.
    ///
    /// See the [module-level documentation](crate::serialize) for details.
    fn serialize(self) -> Serialized<Self>;
}

impl<P: Producer> SerializeExt for P {
    fn serialize(self) -> Serialized<Self> {
        Serialized {
            inner: Arc::new(Inner {
                upstream: self,
                state: Mutex::new(State {
                    waiting: VecDeque::new(),
                    running: false,
                }),
            }),
        }
    }
}
