// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-interval bounded polling
//!
//! The only waiting primitive in the engine. A check is evaluated, and if it
//! yields nothing the task sleeps for the interval and tries again, until the
//! check yields a value or the timeout elapses. There is no backoff.

use std::future::Future;
use std::time::Duration;
use tether_core::{PromiseConfig, WaitConfig};
use tokio::time::{sleep, Instant};

/// Floor for the interval; a zero interval would spin
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Poll loop settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Poller {
    interval: Duration,
    timeout: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self::from(&WaitConfig::default())
    }
}

impl From<&WaitConfig> for Poller {
    fn from(config: &WaitConfig) -> Self {
        Self::new(config.timeout).with_interval(config.poll_interval)
    }
}

impl From<&PromiseConfig> for Poller {
    fn from(config: &PromiseConfig) -> Self {
        Self::new(config.timeout).with_interval(config.poll_interval)
    }
}

impl Poller {
    /// Poller with the given timeout and the default 100ms interval
    pub fn new(timeout: Duration) -> Self {
        Self {
            interval: WaitConfig::default().poll_interval,
            timeout,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Evaluate `check` until it yields `Some`, or return `Ok(None)` on timeout.
    ///
    /// A check error stops polling and is returned as is. The check runs once
    /// more at the deadline, so a check issued just before expiry still counts;
    /// the wall-clock bound is the timeout plus one check. A timeout too large
    /// to represent as a deadline never expires.
    pub async fn poll<T, E, F, Fut>(&self, mut check: F) -> Result<Option<T>, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        let start = Instant::now();
        let deadline = start.checked_add(self.timeout);
        let mut ticks: u32 = 0;

        loop {
            ticks = ticks.saturating_add(1);
            if let Some(value) = check().await? {
                return Ok(Some(value));
            }

            let now = Instant::now();
            let pause = match deadline {
                Some(deadline) if now >= deadline => {
                    tracing::debug!(
                        ticks,
                        elapsed_ms = now.duration_since(start).as_millis() as u64,
                        "poll timed out"
                    );
                    return Ok(None);
                }
                Some(deadline) => self.interval.min(deadline - now),
                None => self.interval,
            };
            sleep(pause).await;
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
