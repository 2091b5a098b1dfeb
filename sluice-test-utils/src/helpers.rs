// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::FutureExt;
use sluice_core::{from_fn, Producer, PullError};
use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Give spawned pulls and settlement handlers time to run.
pub async fn let_tasks_run() {
    sleep(Duration::from_millis(20)).await;
}

/// Assert that `future` has not settled yet, without consuming it.
pub fn assert_pending<F>(future: &mut F)
where
    F: Future + Unpin,
    F::Output: Debug,
{
    if let Some(output) = future.now_or_never() {
        panic!("expected a pending pull, but it settled with {output:?}");
    }
}

/// Await `future`, failing the test if it takes longer than `timeout_ms`.
pub async fn settled_within<F>(future: F, timeout_ms: u64) -> F::Output
where
    F: Future,
{
    timeout(Duration::from_millis(timeout_ms), future)
        .await
        .unwrap_or_else(|_| panic!("pull did not settle within {timeout_ms}ms"))
}

/// Text of a rejection reason.
///
/// # Panics
/// Panics if `err` is the terminal marker.
pub fn reason_of(err: &PullError) -> String {
    err.reason()
        .map(ToString::to_string)
        .unwrap_or_else(|| panic!("expected a rejection, got {err:?}"))
}

/// Producer counting up from zero whose first pull panics with "upstream exploded".
///
/// `calls` counts every pull, the panicking one included.
pub fn panics_on_first_pull(calls: Arc<AtomicUsize>) -> impl Producer<Item = usize> {
    from_fn(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                panic!("upstream exploded");
            }
            Ok::<_, PullError>(n)
        }
    })
}
