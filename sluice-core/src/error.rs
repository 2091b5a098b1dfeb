// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for pull-based producers
//!
//! Three kinds of failure exist and they never mix:
//!
//! - [`PullError::Done`] is the terminal marker. It is not an error in the usual
//!   sense: it means the producer has no further values. It is recognised by its
//!   variant tag and nothing else.
//! - [`PullError::Rejected`] carries an opaque application reason produced by an
//!   upstream producer or by a user supplied function. Combinators never inspect
//!   its content.
//! - [`ConfigError`] is returned synchronously when a combinator is constructed
//!   with invalid parameters. It never shows up as the result of a pull.
//!
//! # Examples
//!
//! ```
//! use sluice_core::PullError;
//!
//! let done = PullError::Done;
//! let failed = PullError::rejected("connection reset");
//!
//! assert!(done.is_done());
//! assert!(failed.is_rejected());
//! assert_eq!(failed.to_string(), "connection reset");
//! ```

use std::any::Any;
use std::error::Error;

/// Boxed application error carried by a rejected pull.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Why a pull did not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum PullError {
    /// Terminal marker: the producer has no further values
    ///
    /// Combinators pass it through untouched unless they explicitly intercept it.
    #[error("producer is done")]
    Done,

    /// Application error from an upstream producer or a user callback
    #[error("{0}")]
    Rejected(#[source] BoxError),
}

impl PullError {
    /// Wrap an application reason into a rejection
    pub fn rejected(reason: impl Into<BoxError>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Returns `true` for the terminal marker.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns `true` for an application rejection.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Borrow the application reason, if this is a rejection.
    #[must_use]
    pub fn reason(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Done => None,
            Self::Rejected(reason) => Some(reason.as_ref()),
        }
    }

    /// Take the application reason, if this is a rejection.
    pub fn into_reason(self) -> Option<BoxError> {
        match self {
            Self::Done => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl From<BoxError> for PullError {
    fn from(reason: BoxError) -> Self {
        Self::Rejected(reason)
    }
}

/// Reason given to a pull whose upstream panicked.
///
/// Produced by [`pull_catching_panics`](crate::pull_catching_panics) so that
/// combinators awaiting upstream in background tasks keep their state consistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream pull panicked: {message}")]
pub struct UpstreamPanicked {
    /// Panic message, when the payload was a string
    pub message: String,
}

impl UpstreamPanicked {
    /// Extract the message from a panic payload.
    #[must_use]
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| String::from("non-string panic payload"));
        Self { message }
    }
}

/// Invalid construction parameters for a combinator
///
/// Returned eagerly by constructors, before any pull is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A size, count or limit was zero
    #[error("{parameter} must be greater than 0")]
    NotPositive {
        /// Name of the offending parameter
        parameter: &'static str,
    },

    /// The buffer cannot hold the results of every parallel operation
    #[error("buffer_size ({buffer_size}) must be at least max_parallel - 1 (max_parallel = {max_parallel})")]
    BufferTooSmall {
        /// Configured buffer size
        buffer_size: usize,
        /// Configured number of parallel operations
        max_parallel: usize,
    },
}

impl ConfigError {
    /// Check that `value` is greater than zero
    ///
    /// # Errors
    /// Returns [`ConfigError::NotPositive`] naming `parameter` when `value` is zero.
    pub const fn ensure_positive(parameter: &'static str, value: usize) -> Result<usize, Self> {
        if value == 0 {
            Err(Self::NotPositive { parameter })
        } else {
            Ok(value)
        }
    }
}
