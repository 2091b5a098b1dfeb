// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Parallel pool - prefetches upstream results with bounded concurrency.
//!
//! The pool keeps an ordered buffer of upstream pulls that have been started
//! but not yet handed to a caller, and a count of those still running.
//!
//! # Protocol
//!
//! On each call the pool first tops up: while fewer than `max_parallel` pulls
//! are running and the buffer holds at most `buffer_size` entries, it starts
//! another upstream pull and appends it to the buffer. It then hands out the
//! oldest buffered entry. Whenever an upstream pull settles, the running count
//! drops and, if the buffer holds fewer than `buffer_size` entries, another pull
//! is started in the background.
//!
//! So `buffer_size` results are kept ready ahead of demand, never more than
//! `max_parallel` pulls run at once, and callers receive results in the order
//! the pulls were started. Outcomes are handed out exactly as upstream
//! produced them, including rejections and
//! [`PullError::Done`](sluice_core::PullError::Done); the pool does not stop
//! pulling after `Done`.
//!
//! A call that finds nothing to hand out means the configuration cannot serve
//! the caller's concurrency (more callers than `buffer_size + 1`). This is a
//! usage error: it is logged and the returned future panics when polled.
//! [`ParallelConfig`](crate::ParallelConfig) rules it out by requiring
//! `buffer_size >= max_parallel - 1`.
//!
//! # Examples
//!
//! ```
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//! use sluice_ops::{PoolConfig, PoolExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let prefetched = from_stream(stream::iter(0..5))
//!     .pool(PoolConfig::new(2, 2))
//!     .unwrap();
//!
//! assert_eq!(drain(&prefetched).await.unwrap(), vec![0, 1, 2, 3, 4]);
//! # }
//! ```
//!
//! # See Also
//!
//! - [`CompletedFirstExt::completed_first`](crate::CompletedFirstExt::completed_first) - completion-order delivery
//! - [`ParallelizeExt::parallelize`](crate::ParallelizeExt::parallelize) - the assembled pipeline

mod implementation;

pub use implementation::{Pool, PoolExt};
