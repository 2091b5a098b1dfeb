// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sluice
//!
//! Composable pull-based async producers.
//!
//! ## Overview
//!
//! A [`Producer`] is a source the consumer pulls from: every call to
//! [`pull`](Producer::pull) returns a future that settles with one value, an
//! application rejection, or [`PullError::Done`] once the source is exhausted.
//! Combinators wrap a producer and return a new one, so a pipeline is just a
//! chain of calls, and the consumer's pulls are what drive work upstream.
//!
//! The combinators control how upstream work happens:
//!
//! - how much runs concurrently and how much is prefetched ([`PoolExt`])
//! - whether a fragile source ever sees concurrent requests ([`SerializeExt`])
//! - whether results arrive in call order or completion order ([`CompletedFirstExt`])
//! - batching, flattening, limiting, filtering and retrying
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::prelude::*;
//! use sluice::{drain, from_fn, BoxError, PullError};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! // A source that serves ten record ids, one per request
//! let next_id = Arc::new(AtomicUsize::new(0));
//! let ids = from_fn(move || {
//!     let id = next_id.fetch_add(1, Ordering::SeqCst);
//!     async move { if id < 10 { Ok(id) } else { Err(PullError::Done) } }
//! });
//!
//! // Fetch four records at a time, never hitting the id source concurrently
//! let records = ids
//!     .parallelize(ParallelConfig::new(4), |ids| {
//!         ids.then(|id| async move { Ok::<_, BoxError>(format!("record {id}")) })
//!     })
//!     .unwrap()
//!     .batch(5)
//!     .unwrap();
//!
//! let batches = drain(&records).await.unwrap();
//! assert_eq!(batches.len(), 2);
//! assert_eq!(batches[0][0], "record 0");
//! # }
//! ```
//!
//! ## Crates
//!
//! - `sluice-core`: the [`Producer`] protocol, errors, pending requests, base producers
//! - `sluice-ops`: the combinators and their configuration
//! - `sluice-test-utils`: a controllable producer stub for tests

pub mod receiver_ext;

pub use receiver_ext::{ReceiverExt, UnboundedReceiverExt};

// Re-export the protocol
pub use sluice_core::{
    consume, deferred, drain, from_fn, from_stream, from_try_stream, into_stream, Abandoned, BoxError, ConfigError,
    Deferred, Either, FromFn, FromStream, FromTryStream, Producer, PullError, PullFuture, PullResult, Settlement,
    SharedProducer,
};

// Re-export the combinators
pub use sluice_ops::{
    Batch, BatchConfig, BatchExt, CompletedFirst, CompletedFirstExt, Filter, FilterExt, FlattenIterable,
    FlattenIterableExt, Inspect, InspectExt, Limit, LimitExt, ParallelConfig, ParallelizeExt, Parallelized, Pool,
    PoolConfig, PoolExt, Predicates, RejectionPolicy, RetryConfig, SerializeExt, Serialized, Source, Then, ThenExt,
    TryMap, TryMapExt, WhenExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::{ReceiverExt, UnboundedReceiverExt};
    pub use sluice_core::{Producer, PullError};
    pub use sluice_ops::prelude::*;
}
