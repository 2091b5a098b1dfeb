// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting every operator trait and config type.
//!
//! ```
//! use sluice_ops::prelude::*;
//! use futures::stream;
//! use sluice_core::{drain, from_stream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pipeline = from_stream(stream::iter(1..=10))
//!     .filter_values(|n| Ok(n % 3 != 0))
//!     .limit(4)
//!     .unwrap()
//!     .batch(3)
//!     .unwrap();
//!
//! assert_eq!(drain(&pipeline).await.unwrap(), vec![vec![1, 2, 4], vec![5]]);
//! # }
//! ```

pub use crate::{
    BatchConfig, BatchExt, CompletedFirstExt, FilterExt, FlattenIterableExt, InspectExt, LimitExt, ParallelConfig,
    ParallelizeExt, PoolConfig, PoolExt, Predicates, RejectionPolicy, RetryConfig, SerializeExt, ThenExt, TryMapExt,
    WhenExt,
};
