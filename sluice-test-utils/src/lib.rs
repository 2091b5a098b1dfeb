// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for sluice producers and combinators.
//!
//! This crate is meant for development and testing only.
//!
//! # Key Types
//!
//! ## `ProducerStub<T>`
//!
//! An upstream whose pulls stay pending until the test settles them, which makes
//! it possible to drive combinators through any interleaving of settlements:
//!
//! ```rust
//! use sluice_core::Producer;
//! use sluice_test_utils::{reason_of, ProducerStub};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let upstream = ProducerStub::<&str>::new(2);
//! let first = upstream.pull();
//! let second = upstream.pull();
//!
//! upstream.reject(1, "b");
//! upstream.resolve(0, "a");
//!
//! assert_eq!(first.await.unwrap(), "a");
//! assert_eq!(reason_of(&second.await.unwrap_err()), "b");
//! # }
//! ```
//!
//! # Module Organization
//!
//! - `producer_stub` - `ProducerStub<T>`
//! - `test_error` - `TestError` rejection reason
//! - `helpers` - assertion and timing helpers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod producer_stub;
pub mod test_error;

pub use helpers::{assert_pending, let_tasks_run, panics_on_first_pull, reason_of, settled_within};
pub use producer_stub::ProducerStub;
pub use test_error::TestError;
