// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synchronization primitives used for combinator state.
//!
//! - [`Mutex`] (`parking_lot`) guards short, non-awaiting critical sections such as
//!   queue pushes and counter updates.
//! - [`AsyncMutex`] (`futures`) is held across upstream pulls by combinators that
//!   must serialize whole calls, like the batcher and the flattener.

pub use futures::lock::Mutex as AsyncMutex;
pub use parking_lot::Mutex;
