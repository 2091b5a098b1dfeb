// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::Producer;
use sluice_test_utils::{assert_pending, reason_of, ProducerStub};

#[tokio::test]
async fn test_stub_counts_calls_and_pending_pulls() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::new(2);

    // Act
    let mut first = upstream.pull();
    let second = upstream.pull();

    // Assert
    assert_eq!(upstream.times_called(), 2);
    assert_eq!(upstream.pending(), 2);
    assert_pending(&mut first);

    upstream.resolve(0, 10);
    assert_eq!(first.await?, 10);
    assert_eq!(upstream.pending(), 1);

    upstream.resolve(1, 11);
    assert_eq!(second.await?, 11);
    assert_eq!(upstream.pending(), 0);

    Ok(())
}

#[tokio::test]
async fn test_stub_answers_done_beyond_its_slots() {
    let upstream = ProducerStub::<u8>::new(0);

    assert!(upstream.pull().await.unwrap_err().is_done());
    assert!(upstream.pull().await.unwrap_err().is_done());
    assert_eq!(upstream.times_called(), 2);
    assert_eq!(upstream.pending(), 0);
}

#[tokio::test]
async fn test_stub_settles_slots_before_they_are_pulled() -> anyhow::Result<()> {
    // Arrange
    let upstream = ProducerStub::new(3);
    upstream.resolve_all();

    // Act & Assert
    assert_eq!(upstream.pull().await?, 0);
    assert_eq!(upstream.pull().await?, 1);
    assert_eq!(upstream.pull().await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_stub_reject_all_uses_indexed_reasons() {
    let upstream = ProducerStub::<u8>::new(2);
    upstream.reject_all();

    assert_eq!(reason_of(&upstream.pull().await.unwrap_err()), "rejected 0");
    assert_eq!(reason_of(&upstream.pull().await.unwrap_err()), "rejected 1");
}

#[tokio::test]
async fn test_stub_slot_can_deliver_done() {
    let upstream = ProducerStub::<u8>::new(1);
    upstream.reject_done(0);

    assert!(upstream.pull().await.unwrap_err().is_done());
}

#[test]
#[should_panic(expected = "already settled")]
fn test_stub_refuses_to_settle_twice() {
    let upstream = ProducerStub::new(1);
    upstream.resolve(0, 1);
    upstream.resolve(0, 2);
}
