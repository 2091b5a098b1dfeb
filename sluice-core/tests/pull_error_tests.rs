// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{BoxError, ConfigError, PullError};
use std::error::Error;
use std::io;

#[test]
fn test_done_is_not_a_rejection() {
    let done = PullError::Done;

    assert!(done.is_done());
    assert!(!done.is_rejected());
    assert!(done.reason().is_none());
    assert!(done.into_reason().is_none());
}

#[test]
fn test_rejection_keeps_application_reason() {
    let err = PullError::rejected(io::Error::other("disk on fire"));

    assert!(err.is_rejected());
    assert!(!err.is_done());
    assert_eq!(err.to_string(), "disk on fire");
    assert_eq!(err.reason().unwrap().to_string(), "disk on fire");
}

#[test]
fn test_rejection_exposes_reason_as_source() {
    let err = PullError::rejected("upstream timed out");

    let source = err.source().expect("rejection should have a source");
    assert_eq!(source.to_string(), "upstream timed out");
}

#[test]
fn test_rejection_reason_can_be_downcast() {
    let err = PullError::rejected(io::Error::new(io::ErrorKind::NotFound, "missing"));

    let reason = err.into_reason().unwrap();
    let io_err = reason.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_box_error_converts_into_rejection() {
    let reason: BoxError = "boom".into();

    let err: PullError = reason.into();

    assert!(err.is_rejected());
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_done_display() {
    assert_eq!(PullError::Done.to_string(), "producer is done");
}

#[test]
fn test_ensure_positive_rejects_zero() {
    assert_eq!(
        ConfigError::ensure_positive("batch_size", 0),
        Err(ConfigError::NotPositive {
            parameter: "batch_size"
        })
    );
    assert_eq!(ConfigError::ensure_positive("batch_size", 3), Ok(3));
}

#[test]
fn test_config_error_messages() {
    let not_positive = ConfigError::NotPositive {
        parameter: "max_parallel",
    };
    let too_small = ConfigError::BufferTooSmall {
        buffer_size: 1,
        max_parallel: 4,
    };

    assert_eq!(not_positive.to_string(), "max_parallel must be greater than 0");
    assert!(too_small.to_string().contains("buffer_size (1)"));
    assert!(too_small.to_string().contains("max_parallel = 4"));
}
