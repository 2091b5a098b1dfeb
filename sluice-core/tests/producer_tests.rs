// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{
    from_fn, pull_catching_panics, Either, Producer, PullError, PullFuture, SharedProducer, UpstreamPanicked,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting(limit: usize) -> impl Producer<Item = usize> {
    let calls = AtomicUsize::new(0);
    from_fn(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < limit {
                Ok(n)
            } else {
                Err(PullError::Done)
            }
        }
    })
}

#[tokio::test]
async fn test_from_fn_invokes_closure_once_per_pull() -> anyhow::Result<()> {
    // Arrange
    let producer = counting(2);

    // Act & Assert
    assert_eq!(producer.pull().await?, 0);
    assert_eq!(producer.pull().await?, 1);
    assert!(producer.pull().await.unwrap_err().is_done());
    assert!(producer.pull().await.unwrap_err().is_done());

    Ok(())
}

#[tokio::test]
async fn test_pulls_may_be_outstanding_concurrently() -> anyhow::Result<()> {
    // Arrange
    let producer = counting(3);

    // Act
    let first = producer.pull();
    let second = producer.pull();
    let third = producer.pull();

    // Assert
    assert_eq!(third.await?, 2);
    assert_eq!(first.await?, 0);
    assert_eq!(second.await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_shared_producer_delegates_to_inner() -> anyhow::Result<()> {
    // Arrange
    let shared: SharedProducer<usize> = Arc::new(counting(1));
    let clone = Arc::clone(&shared);

    // Act & Assert
    assert_eq!(clone.pull().await?, 0);
    assert!(shared.pull().await.unwrap_err().is_done());

    Ok(())
}

#[tokio::test]
async fn test_boxed_producer_delegates_to_inner() -> anyhow::Result<()> {
    let boxed: Box<dyn Producer<Item = usize>> = Box::new(counting(1));

    assert_eq!(boxed.pull().await?, 0);
    assert!(boxed.pull().await.unwrap_err().is_done());

    Ok(())
}

#[tokio::test]
async fn test_either_pulls_from_selected_branch() -> anyhow::Result<()> {
    // Arrange
    let left: Either<_, Arc<dyn Producer<Item = usize>>> = Either::Left(counting(1));
    let right: Either<Arc<dyn Producer<Item = usize>>, _> =
        Either::Right(from_fn(|| async { Ok::<_, PullError>(42usize) }));

    // Act & Assert
    assert_eq!(left.pull().await?, 0);
    assert!(left.pull().await.unwrap_err().is_done());
    assert_eq!(right.pull().await?, 42);
    assert_eq!(right.pull().await?, 42);

    Ok(())
}

struct PanicsWhenCalled;

impl Producer for PanicsWhenCalled {
    type Item = usize;

    fn pull(&self) -> PullFuture<usize> {
        panic!("refused to start")
    }
}

#[tokio::test]
async fn test_pull_catching_panics_passes_outcomes_through() -> anyhow::Result<()> {
    // Arrange
    let producer = counting(1);

    // Act
    let first = pull_catching_panics(&producer).await;
    let second = pull_catching_panics(&producer).await;

    // Assert
    assert_eq!(first?, 0);
    assert!(second.unwrap_err().is_done());

    Ok(())
}

#[tokio::test]
async fn test_pull_catching_panics_rejects_when_the_future_panics() {
    // Arrange
    let producer = from_fn(|| async {
        if true {
            panic!("upstream exploded");
        }
        Ok::<usize, PullError>(0)
    });

    // Act
    let result = pull_catching_panics(&producer).await;

    // Assert
    let reason = result.unwrap_err().into_reason().expect("a rejection");
    assert_eq!(
        reason.downcast_ref::<UpstreamPanicked>(),
        Some(&UpstreamPanicked {
            message: String::from("upstream exploded")
        })
    );
}

#[tokio::test]
async fn test_pull_catching_panics_rejects_when_pull_panics() {
    // Act
    let result = pull_catching_panics(&PanicsWhenCalled).await;

    // Assert
    let reason = result.unwrap_err().into_reason().expect("a rejection");
    assert_eq!(reason.to_string(), "upstream pull panicked: refused to start");
}
