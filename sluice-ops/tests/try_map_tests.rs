// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{drain, BoxError, ConfigError, Producer};
use sluice_ops::{RetryConfig, TryMapExt};
use sluice_test_utils::{reason_of, ProducerStub, TestError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&count), count)
}

#[tokio::test]
async fn test_try_map_transforms_values() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(3);
    upstream.resolve_all();
    let mapped = upstream
        .try_map(
            |n| async move { Ok::<_, BoxError>(format!("#{n}")) },
            |_, _| Ok(()),
            RetryConfig::new(3),
        )?;

    // Act
    let result = drain(&mapped).await.map_err(|e| anyhow::anyhow!(e))?;

    // Assert
    assert_eq!(result, vec!["#0", "#1", "#2"]);

    Ok(())
}

#[tokio::test]
async fn test_try_map_moves_on_to_the_next_value_after_a_failure() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(5);
    upstream.resolve_all();
    let (handled, handler_calls) = counter();
    let mapped = upstream.try_map(
        |n| async move {
            if n % 2 == 1 {
                Err(BoxError::from(format!("odd {n}")))
            } else {
                Ok(n * 10)
            }
        },
        move |_, _| {
            handled.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
        RetryConfig::new(3),
    )?;

    // Act
    let result = drain(&mapped).await.map_err(|e| anyhow::anyhow!(e))?;

    // Assert
    assert_eq!(result, vec![0, 20, 40]);
    assert_eq!(handler_calls.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_try_map_gives_up_after_max_consecutive_errors() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(5);
    upstream.resolve_all();
    let (attempted, attempts) = counter();
    let (handled, handler_calls) = counter();
    let mapped = upstream.clone().try_map(
        move |n: usize| {
            attempted.fetch_add(1, Ordering::SeqCst);
            async move { Err::<usize, _>(BoxError::from(format!("failed {n}"))) }
        },
        move |_, _| {
            handled.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
        RetryConfig::new(3),
    )?;

    // Act
    let first = mapped.pull().await;

    // Assert
    assert_eq!(reason_of(&first.unwrap_err()), "failed 2");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(handler_calls.load(Ordering::SeqCst), 3);
    assert_eq!(upstream.times_called(), 3);

    Ok(())
}

#[tokio::test]
async fn test_try_map_counts_errors_per_call() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(4);
    upstream.resolve_all();
    let mapped = upstream.try_map(
        |n| async move {
            if n % 2 == 0 {
                Err(BoxError::from("even"))
            } else {
                Ok(n)
            }
        },
        |_, _| Ok(()),
        RetryConfig::new(2),
    )?;

    // Act
    let result = drain(&mapped).await.map_err(|e| anyhow::anyhow!(e))?;

    // Assert
    assert_eq!(result, vec![1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_try_map_handler_sees_error_and_original_value() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<String>::new(2);
    upstream.resolve(0, "x".to_owned());
    upstream.resolve(1, "42".to_owned());
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let parsed = upstream.try_map(
        |text: String| async move { text.parse::<u32>().map_err(BoxError::from) },
        move |error, text| {
            sink.lock().unwrap().push(format!("{text}: {error}"));
            Ok(())
        },
        RetryConfig::unlimited(),
    )?;

    // Act
    let first = parsed.pull().await;

    // Assert
    assert_eq!(first?, 42);
    assert_eq!(*seen.lock().unwrap(), vec!["x: invalid digit found in string"]);

    Ok(())
}

#[tokio::test]
async fn test_try_map_rejects_call_when_handler_fails() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(3);
    upstream.resolve_all();
    let mapped = upstream.clone().try_map(
        |_| async { Err::<usize, _>(BoxError::from("transform failed")) },
        |_, _| Err(BoxError::from("handler refused")),
        RetryConfig::unlimited(),
    )?;

    // Act
    let first = mapped.pull().await;

    // Assert
    assert_eq!(reason_of(&first.unwrap_err()), "handler refused");
    assert_eq!(upstream.times_called(), 1);

    Ok(())
}

#[tokio::test]
async fn test_try_map_passes_upstream_rejections_without_transforming() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(1);
    upstream.reject(0, TestError::new("upstream failed"));
    let (attempted, attempts) = counter();
    let mapped = upstream.try_map(
        move |n: usize| {
            attempted.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, BoxError>(n) }
        },
        |_, _| Ok(()),
        RetryConfig::new(1),
    )?;

    // Act
    let first = mapped.pull().await;
    let second = mapped.pull().await;

    // Assert
    assert_eq!(reason_of(&first.unwrap_err()), "upstream failed");
    assert!(second.unwrap_err().is_done());
    assert_eq!(attempts.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn test_try_map_stops_retrying_when_upstream_is_done() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(2);
    upstream.resolve_all();
    let mapped = upstream.clone().try_map(
        |_| async { Err::<usize, _>(BoxError::from("always")) },
        |_, _| Ok(()),
        RetryConfig::unlimited(),
    )?;

    // Act
    let first = mapped.pull().await;

    // Assert
    assert!(first.unwrap_err().is_done());
    assert_eq!(upstream.times_called(), 3);

    Ok(())
}

#[tokio::test]
async fn test_try_map_rejects_zero_error_budget() {
    // Arrange
    let upstream = ProducerStub::<usize>::new(1);

    // Act
    let result = upstream.try_map(
        |n| async move { Ok::<_, BoxError>(n) },
        |_, _| Ok(()),
        RetryConfig::new(0),
    );

    // Assert
    assert_eq!(
        result.unwrap_err(),
        ConfigError::NotPositive {
            parameter: "max_consecutive_errors"
        }
    );
}
