// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::PoolConfig;
use futures::FutureExt;
use sluice_core::mutex::Mutex;
use sluice_core::{
    deferred, pull_catching_panics, spawn_detached, ConfigError, Producer, PullFuture, PullResult, Settlement,
};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Producer prefetching upstream results with bounded concurrency.
///
/// Created by [`PoolExt::pool`], [`PoolExt::parallel`] or [`PoolExt::buffer`].
pub struct Pool<P: Producer> {
    inner: Arc<Inner<P>>,
}

struct Inner<P: Producer> {
    upstream: P,
    config: PoolConfig,
    state: Mutex<State<P::Item>>,
}

struct State<T> {
    buffer: VecDeque<Settlement<T>>,
    running: usize,
}

impl<P: Producer> Pool<P> {
    /// Validated configuration of this pool.
    #[must_use]
    pub fn config(&self) -> PoolConfig {
        self.inner.config
    }

    /// Upstream pulls currently in flight.
    #[must_use]
    pub fn running(&self) -> usize {
        self.inner.state.lock().running
    }

    /// Started pulls not yet handed to a caller.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.inner.state.lock().buffer.len()
    }
}

impl<P: Producer> fmt::Debug for Pool<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Pool")
            .field("config", &self.inner.config)
            .field("running", &state.running)
            .field("buffered", &state.buffer.len())
            .finish_non_exhaustive()
    }
}

impl<P: Producer> Inner<P> {
    fn start_another(this: &Arc<Self>, state: &mut State<P::Item>) {
        let pulling = pull_catching_panics(&this.upstream);
        let (pending, settlement) = deferred();
        state.running += 1;
        state.buffer.push_back(settlement);

        let inner = Arc::clone(this);
        spawn_detached(async move {
            let result = pulling.await;
            Self::settled(&inner);
            if !pending.settle(result) {
                debug!("pool discarded a result nobody waited for");
            }
        });
    }

    fn settled(this: &Arc<Self>) {
        let mut state = this.state.lock();
        state.running -= 1;
        if state.buffer.len() < this.config.buffer_size {
            Self::start_another(this, &mut state);
        }
    }

    fn top_up(this: &Arc<Self>, state: &mut State<P::Item>) {
        let PoolConfig {
            max_parallel,
            buffer_size,
        } = this.config;
        while state.running < max_parallel && state.buffer.len() <= buffer_size {
            Self::start_another(this, state);
        }
    }
}

impl<P: Producer> Producer for Pool<P> {
    type Item = P::Item;

    fn pull(&self) -> PullFuture<P::Item> {
        let oldest = {
            let mut state = self.inner.state.lock();
            Inner::top_up(&self.inner, &mut state);
            state.buffer.pop_front()
        };

        match oldest {
            Some(settlement) => settlement.boxed(),
            None => {
                error!(
                    "pool has nothing to hand out: more concurrent callers than the configuration allows ({:?})",
                    self.inner.config
                );
                over_capacity::<P::Item>(self.inner.config).boxed()
            }
        }
    }
}

async fn over_capacity<T>(config: PoolConfig) -> PullResult<T> {
    panic!(
        "pool over capacity: max_parallel = {}, buffer_size = {}",
        config.max_parallel, config.buffer_size
    )
}

/// Extension trait providing the pool operators for producers.
pub trait PoolExt: Producer + Sized {
    /// Prefetch upstream results according to `config`.
    ///
    /// See the [module-level documentation](crate::pool) for the protocol.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `config.max_parallel` is zero.
    fn pool(self, config: PoolConfig) -> Result<Pool<Self>, ConfigError>;

    /// Shorthand for [`pool`](Self::pool) with [`PoolConfig::new`].
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `max_parallel` is zero.
    fn parallel(self, max_parallel: usize, buffer_size: usize) -> Result<Pool<Self>, ConfigError> {
        self.pool(PoolConfig::new(max_parallel, buffer_size))
    }

    /// Keep `buffer_size` results ready, pulling upstream one at a time.
    ///
    /// # Errors
    /// [`ConfigError::NotPositive`] when `buffer_size` is zero.
    fn buffer(self, buffer_size: usize) -> Result<Pool<Self>, ConfigError> {
        let buffer_size = ConfigError::ensure_positive("buffer_size", buffer_size)?;
        self.pool(PoolConfig::buffer(buffer_size))
    }
}

impl<P: Producer> PoolExt for P {
    fn pool(self, config: PoolConfig) -> Result<Pool<Self>, ConfigError> {
        let config = config.validate()?;
        Ok(Pool {
            inner: Arc::new(Inner {
                upstream: self,
                config,
                state: Mutex::new(State {
                    buffer: VecDeque::new(),
                    running: 0,
                }),
            }),
        })
    }
}
