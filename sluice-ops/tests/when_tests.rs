// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{Either, Producer};
use sluice_ops::{LimitExt, SerializeExt, WhenExt};
use sluice_test_utils::ProducerStub;

#[tokio::test]
async fn test_when_applies_combinator_if_condition_holds() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(3);
    upstream.resolve_all();

    // Act
    let producer = upstream.when(true, |p| p.serialize());

    // Assert
    assert!(matches!(producer, Either::Left(_)));
    assert_eq!(producer.pull().await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_when_returns_producer_unchanged_otherwise() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::<usize>::new(3);
    upstream.resolve_all();

    // Act
    let producer = upstream.clone().when(false, |p| p.limit(1).expect("positive limit"));

    // Assert
    assert!(matches!(producer, Either::Right(_)));
    assert_eq!(producer.pull().await?, 0);
    assert_eq!(producer.pull().await?, 1);
    assert_eq!(upstream.times_called(), 2);

    Ok(())
}
