// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A producer whose pulls are settled by the test.

use crate::test_error::TestError;
use futures::future::{ready, FutureExt};
use sluice_core::mutex::Mutex;
use sluice_core::{deferred, BoxError, Deferred, Producer, PullError, PullFuture, Settlement};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Upstream test double with a fixed number of controllable slots.
///
/// Pull number `i` (zero-based) returns the future of slot `i`, which settles
/// when the test calls [`resolve`](Self::resolve) or [`reject`](Self::reject) for
/// that index (before or after the pull). Pulls beyond the last slot reject
/// immediately with [`PullError::Done`].
///
/// Clones share the same slots and counters, so a test can keep one handle and
/// give the other to the combinator under test.
///
/// # Example
///
/// ```rust
/// use sluice_core::Producer;
/// use sluice_test_utils::ProducerStub;
///
/// # #[tokio::main]
/// # async fn main() {
/// let upstream = ProducerStub::new(1);
/// let pulled = upstream.pull();
/// upstream.resolve(0, "a");
///
/// assert_eq!(pulled.await.unwrap(), "a");
/// assert!(upstream.pull().await.unwrap_err().is_done());
/// assert_eq!(upstream.times_called(), 2);
/// # }
/// ```
#[derive(Debug)]
pub struct ProducerStub<T> {
    inner: Arc<StubInner<T>>,
}

#[derive(Debug)]
struct StubInner<T> {
    slots: Mutex<Vec<Slot<T>>>,
    times_called: AtomicUsize,
    pending: AtomicUsize,
}

#[derive(Debug)]
struct Slot<T> {
    deferred: Option<Deferred<T>>,
    settlement: Option<Settlement<T>>,
}

impl<T> Clone for ProducerStub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> ProducerStub<T> {
    /// Create a stub with `count` unsettled slots.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let slots = (0..count)
            .map(|_| {
                let (pending, settlement) = deferred();
                Slot {
                    deferred: Some(pending),
                    settlement: Some(settlement),
                }
            })
            .collect();

        Self {
            inner: Arc::new(StubInner {
                slots: Mutex::new(slots),
                times_called: AtomicUsize::new(0),
                pending: AtomicUsize::new(0),
            }),
        }
    }

    /// Fulfill slot `index` with `value`.
    ///
    /// # Panics
    /// Panics if the slot does not exist or was already settled.
    pub fn resolve(&self, index: usize, value: T) {
        self.take_deferred(index).fulfill(value);
    }

    /// Reject slot `index` with an application reason.
    ///
    /// # Panics
    /// Panics if the slot does not exist or was already settled.
    pub fn reject(&self, index: usize, reason: impl Into<BoxError>) {
        self.take_deferred(index)
            .reject(PullError::Rejected(reason.into()));
    }

    /// Reject slot `index` with the terminal marker.
    ///
    /// # Panics
    /// Panics if the slot does not exist or was already settled.
    pub fn reject_done(&self, index: usize) {
        self.take_deferred(index).reject(PullError::Done);
    }

    /// Fulfill every unsettled slot with `value_for(index)`.
    pub fn resolve_all_with(&self, value_for: impl Fn(usize) -> T) {
        let mut slots = self.inner.slots.lock();
        for (index, slot) in slots.iter_mut().enumerate() {
            if let Some(pending) = slot.deferred.take() {
                pending.fulfill(value_for(index));
            }
        }
    }

    /// Reject every unsettled slot with [`rejected_reason`](Self::rejected_reason).
    pub fn reject_all(&self) {
        let mut slots = self.inner.slots.lock();
        for (index, slot) in slots.iter_mut().enumerate() {
            if let Some(pending) = slot.deferred.take() {
                pending.reject(PullError::rejected(Self::rejected_reason(index)));
            }
        }
    }

    /// Reason used by [`reject_all`](Self::reject_all) for slot `index`.
    #[must_use]
    pub fn rejected_reason(index: usize) -> TestError {
        TestError::new(format!("rejected {index}"))
    }

    /// Number of pulls made so far, including those answered with `Done`.
    #[must_use]
    pub fn times_called(&self) -> usize {
        self.inner.times_called.load(Ordering::SeqCst)
    }

    /// Number of pulls handed out whose futures have not completed yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    fn take_deferred(&self, index: usize) -> Deferred<T> {
        self.inner
            .slots
            .lock()
            .get_mut(index)
            .and_then(|slot| slot.deferred.take())
            .unwrap_or_else(|| panic!("slot {index} does not exist or is already settled"))
    }
}

impl ProducerStub<usize> {
    /// Fulfill every unsettled slot with its own index.
    pub fn resolve_all(&self) {
        self.resolve_all_with(|index| index);
    }
}

impl<T: Send + 'static> Producer for ProducerStub<T> {
    type Item = T;

    fn pull(&self) -> PullFuture<T> {
        let index = self.inner.times_called.fetch_add(1, Ordering::SeqCst);
        let settlement = self
            .inner
            .slots
            .lock()
            .get_mut(index)
            .and_then(|slot| slot.settlement.take());

        match settlement {
            None => ready(Err(PullError::Done)).boxed(),
            Some(settlement) => {
                self.inner.pending.fetch_add(1, Ordering::SeqCst);
                let inner = Arc::clone(&self.inner);
                async move {
                    let result = settlement.await;
                    inner.pending.fetch_sub(1, Ordering::SeqCst);
                    result
                }
                .boxed()
            }
        }
    }
}
