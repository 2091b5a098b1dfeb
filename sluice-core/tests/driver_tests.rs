// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use sluice_core::{consume, drain, from_stream, from_try_stream, into_stream, Producer};
use std::io;

#[tokio::test]
async fn test_consume_finishes_gracefully_on_done() -> anyhow::Result<()> {
    // Arrange
    let producer = from_stream(stream::iter(vec![1, 2, 3]));

    // Act
    consume(&producer).await.map_err(|e| anyhow::anyhow!(e))?;

    // Assert
    assert!(producer.pull().await.unwrap_err().is_done());

    Ok(())
}

#[tokio::test]
async fn test_consume_stops_on_first_rejection() {
    // Arrange
    let producer = from_try_stream(stream::iter(vec![
        Ok(1),
        Err(io::Error::other("broken pipe")),
        Ok(3),
    ]));

    // Act
    let err = consume(&producer).await.unwrap_err();

    // Assert
    assert_eq!(err.to_string(), "broken pipe");
    assert_eq!(producer.pull().await.unwrap(), 3);
}

#[tokio::test]
async fn test_drain_collects_values_in_order() -> anyhow::Result<()> {
    let producer = from_stream(stream::iter("abc".chars()));

    let values = drain(&producer).await.map_err(|e| anyhow::anyhow!(e))?;

    assert_eq!(values, vec!['a', 'b', 'c']);

    Ok(())
}

#[tokio::test]
async fn test_drain_of_empty_producer_is_empty() -> anyhow::Result<()> {
    let producer = from_stream(stream::iter(Vec::<u8>::new()));

    let values = drain(&producer).await.map_err(|e| anyhow::anyhow!(e))?;

    assert!(values.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_from_stream_reports_done_repeatedly_after_end() {
    let producer = from_stream(stream::iter(vec![7]));

    assert_eq!(producer.pull().await.unwrap(), 7);
    assert!(producer.pull().await.unwrap_err().is_done());
    assert!(producer.pull().await.unwrap_err().is_done());
}

#[tokio::test]
async fn test_into_stream_yields_rejections_and_ends_at_done() {
    // Arrange
    let producer = from_try_stream(stream::iter(vec![
        Ok("a"),
        Err(io::Error::other("flaky")),
        Ok("b"),
    ]));

    // Act
    let items: Vec<_> = into_stream(producer).collect().await;

    // Assert
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap(), &"a");
    assert_eq!(items[1].as_ref().unwrap_err().to_string(), "flaky");
    assert_eq!(items[2].as_ref().unwrap(), &"b");
}
