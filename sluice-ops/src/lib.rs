// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combinators over pull-based async producers.
//!
//! Every combinator wraps one [`Producer`](sluice_core::Producer) and is itself
//! a producer, so pipelines are built by chaining. Each operator is provided by
//! an extension trait implemented for every producer.
//!
//! ## Operator Categories
//!
//! ### Concurrency
//!
//! - **[`pool`](PoolExt::pool)**: prefetch with bounded parallelism; [`buffer`](PoolExt::buffer) is the sequential variant
//! - **[`serialize`](SerializeExt::serialize)**: at most one upstream pull in flight, calls answered in order
//! - **[`completed_first`](CompletedFirstExt::completed_first)**: results in completion order
//! - **[`parallelize`](ParallelizeExt::parallelize)**: the assembled serialize / stages / reorder / pool pipeline
//!
//! ### Shaping
//!
//! - **[`batch`](BatchExt::batch)**: fixed-size batches with a short final batch
//! - **[`flatten_iterable`](FlattenIterableExt::flatten_iterable)**: one element of upstream collections per call
//! - **[`limit`](LimitExt::limit)**: forward only the first `n` calls
//!
//! ### Filtering and Mapping
//!
//! - **[`filter`](FilterExt::filter)**: skip values and rejections; [`catcher`](FilterExt::catcher) swallows rejections
//! - **[`try_map`](TryMapExt::try_map)**: fallible async map that moves on to the next value on failure
//! - **[`then`](ThenExt::then)**: async map
//! - **[`inspect`](InspectExt::inspect)**: observe values
//! - **[`when`](WhenExt::when)**: apply a combinator conditionally
//!
//! # Termination
//!
//! [`PullError::Done`](sluice_core::PullError::Done) passes through every
//! combinator untouched unless its documentation says otherwise: [`Limit`]
//! produces it, [`Batch`] latches on it, [`CompletedFirst`] routes it to the
//! newest waiting call.
//!
//! # Runtime
//!
//! [`Pool`], [`Serialized`] and [`CompletedFirst`] drive upstream pulls from
//! background tasks and need a runtime: tokio (default, `runtime-tokio`) or smol
//! (`runtime-smol`).

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod batch;
pub mod completed_first;
pub mod config;
pub mod filter;
pub mod flatten_iterable;
pub mod inspect;
pub mod limit;
pub mod parallelize;
pub mod pool;
pub mod prelude;
pub mod serialize;
pub mod then;
pub mod try_map;
pub mod when;

pub use self::batch::{Batch, BatchExt};
pub use self::completed_first::{CompletedFirst, CompletedFirstExt};
pub use self::config::{BatchConfig, ParallelConfig, PoolConfig, RejectionPolicy, RetryConfig};
pub use self::filter::{Filter, FilterExt, Predicates, RejectionPredicate, ValuePredicate};
pub use self::flatten_iterable::{FlattenIterable, FlattenIterableExt};
pub use self::inspect::{Inspect, InspectExt};
pub use self::limit::{Limit, LimitExt};
pub use self::parallelize::{ParallelizeExt, Parallelized, Source};
pub use self::pool::{Pool, PoolExt};
pub use self::serialize::{SerializeExt, Serialized};
pub use self::then::{Then, ThenExt};
pub use self::try_map::{TryMap, TryMapExt};
pub use self::when::WhenExt;
