// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::stream;
use sluice_core::{consume, from_stream, BoxError};
use sluice_ops::{ParallelConfig, ParallelizeExt, ThenExt};
use std::hint::black_box;
use tokio::runtime::Runtime;

pub fn bench_parallelize(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallelize");
    let size = 1000usize;
    let parallelism = [1usize, 4, 16];
    let rt = Runtime::new().unwrap();

    for &parallel_operations in &parallelism {
        for completed_first in [false, true] {
            let id = BenchmarkId::from_parameter(format!("p{parallel_operations}_cf{completed_first}"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(id, &parallel_operations, |bencher, &parallel_operations| {
                bencher.to_async(&rt).iter(|| async move {
                    let config = ParallelConfig::new(parallel_operations).with_completed_first(completed_first);
                    let pipeline = from_stream(stream::iter(0..size))
                        .parallelize(config, |source| {
                            source.then(|n| async move {
                                tokio::task::yield_now().await;
                                Ok::<_, BoxError>(n * 2)
                            })
                        })
                        .unwrap();
                    black_box(consume(&pipeline).await.unwrap());
                });
            });
        }
    }

    group.finish();
}
