// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::ConfigError;
use sluice_ops::{BatchConfig, ParallelConfig, PoolConfig, RejectionPolicy, RetryConfig};

#[test]
fn test_pool_config_strict_validation_boundary() {
    assert!(PoolConfig::new(4, 3).validate_strict().is_ok());
    assert_eq!(
        PoolConfig::new(4, 2).validate_strict(),
        Err(ConfigError::BufferTooSmall {
            buffer_size: 2,
            max_parallel: 4
        })
    );
    assert!(PoolConfig::new(4, 2).validate().is_ok());
}

#[test]
fn test_pool_config_buffer_is_sequential() {
    assert_eq!(PoolConfig::buffer(5), PoolConfig::new(1, 5));
}

#[test]
fn test_parallel_config_buffer_defaults_to_parallel_operations() {
    let config = ParallelConfig::new(6);

    assert_eq!(config.pool_config(), Ok(PoolConfig::new(6, 6)));
    assert!(config.is_parallel());
    assert!(!ParallelConfig::default().is_parallel());
}

#[test]
fn test_batch_config_defaults_to_retain() {
    assert_eq!(BatchConfig::new(3).on_rejection, RejectionPolicy::Retain);
    assert_eq!(
        BatchConfig::new(0).validate(),
        Err(ConfigError::NotPositive {
            parameter: "batch_size"
        })
    );
}

#[test]
fn test_retry_config_unlimited_is_default() {
    assert_eq!(RetryConfig::default(), RetryConfig::unlimited());
    assert!(RetryConfig::unlimited().validate().is_ok());
    assert!(RetryConfig::new(1).validate().is_ok());
}

#[test]
fn test_config_errors_name_the_parameter() {
    assert_eq!(
        PoolConfig::new(0, 1).validate().unwrap_err().to_string(),
        "max_parallel must be greater than 0"
    );
    assert_eq!(
        PoolConfig::new(5, 1).validate_strict().unwrap_err().to_string(),
        "buffer_size (1) must be at least max_parallel - 1 (max_parallel = 5)"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_configs_deserialize_with_defaults() -> anyhow::Result<()> {
    let parallel: ParallelConfig = serde_json::from_str(r#"{ "parallel_operations": 4 }"#)?;
    let batch: BatchConfig = serde_json::from_str(r#"{ "batch_size": 10, "on_rejection": "flush" }"#)?;
    let retry: RetryConfig = serde_json::from_str(r#"{ "max_consecutive_errors": 3 }"#)?;

    assert_eq!(parallel, ParallelConfig::new(4));
    assert_eq!(batch, BatchConfig::new(10).with_rejection_policy(RejectionPolicy::Flush));
    assert_eq!(retry, RetryConfig::new(3));

    Ok(())
}

#[test]
fn test_pool_config_strict_validation_accepts_largest_buffer() {
    assert_eq!(
        PoolConfig::new(usize::MAX, usize::MAX).validate_strict(),
        Ok(PoolConfig::new(usize::MAX, usize::MAX))
    );
}
