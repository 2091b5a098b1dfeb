// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic detached task spawning.
//!
//! Combinators that launch upstream pulls ahead of demand, or that must observe
//! completion order, drive those pulls on background tasks. The runtime is picked
//! by feature flag:
//!
//! - **Tokio**: `tokio::spawn` (default, `runtime-tokio`)
//! - **smol**: `smol::spawn(..).detach()` (`runtime-smol`)
//!
//! With Tokio, spawning outside of a runtime context panics, so concurrency-aware
//! combinators must be pulled from within a runtime.

use core::future::Future;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("sluice-core needs a runtime: enable `runtime-tokio` or `runtime-smol`");

/// Run `future` to completion in the background without keeping a handle.
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "runtime-tokio")]
    {
        let _handle = tokio::spawn(future);
    }

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    smol::spawn(future).detach();
}
