// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core pull protocol for sluice producers.
//!
//! A [`Producer`] is a re-invocable source: each call to
//! [`pull`](Producer::pull) returns one future settling with a value, an
//! application rejection, or the terminal marker [`PullError::Done`].
//! Combinators (in `sluice-ops`) wrap one producer and return another.
//!
//! This crate holds what every combinator shares:
//!
//! - [`Producer`], [`PullResult`], [`PullFuture`]
//! - [`PullError`] with the `Done` terminal marker, and [`ConfigError`]
//! - [`deferred`]: settle-once pending requests
//! - [`spawn_detached`]: runtime-agnostic background tasks
//! - base producers ([`from_fn`], [`from_stream`], [`from_try_stream`]),
//!   the [`into_stream`] adapter and the [`consume`] / [`drain`] drivers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod consume;
pub mod deferred;
pub mod error;
pub mod from_fn;
pub mod mutex;
pub mod producer;
pub mod stream_adapters;
pub mod task;

pub use self::consume::{consume, drain};
pub use self::deferred::{deferred, Abandoned, Deferred, Settlement};
pub use self::error::{BoxError, ConfigError, PullError, UpstreamPanicked};
pub use self::from_fn::{from_fn, FromFn};
pub use self::producer::{pull_catching_panics, Producer, PullFuture, PullResult, SharedProducer};
pub use self::stream_adapters::{from_stream, from_try_stream, into_stream, FromStream, FromTryStream};
pub use self::task::spawn_detached;
pub use futures::future::Either;
