// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition waiters over the shared store
//!
//! Each waiter is one [`Poller`] loop around a store read. Timing out is a
//! normal outcome and comes back as `None` (or `false` for
//! [`Waiter::wait_for_value`]) so callers can tell it apart from a stored
//! falsy value. Store failures stop the wait and are returned as errors.
//!
//! The multi-key waiters read each key separately within a tick. The store
//! gives no cross-key atomicity, so a key seen present early in a tick may be
//! gone by the time the last key is read.

use crate::error::WaitError;
use crate::poll::Poller;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tether_adapters::KvStore;
use tether_core::WaitConfig;

/// Parse stored text as JSON, falling back to the raw string
pub fn parse_stored(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Polls the store until a condition holds or the timeout elapses
#[derive(Clone)]
pub struct Waiter<S> {
    store: S,
    poller: Poller,
}

impl<S: KvStore> Waiter<S> {
    /// Waiter with the default 100ms interval and 30s timeout
    pub fn new(store: S) -> Self {
        Self {
            store,
            poller: Poller::default(),
        }
    }

    pub fn from_config(store: S, config: &WaitConfig) -> Self {
        Self {
            store,
            poller: Poller::from(config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.poller = self.poller.with_timeout(timeout);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.poller = self.poller.with_interval(interval);
        self
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// Wait until `key` exists and return its parsed value
    pub async fn wait_for_key(&self, key: &str) -> Result<Option<Value>, WaitError> {
        let store = &self.store;
        let found = self
            .poller
            .poll(move || async move {
                let text = store.get(key).await?;
                Ok::<_, WaitError>(text.map(|t| parse_stored(&t)))
            })
            .await?;
        log_outcome("wait_for_key", key, found.is_some());
        Ok(found)
    }

    /// Wait until the parsed value at `key` equals `expected`.
    /// Returns `false` on timeout.
    pub async fn wait_for_value(&self, key: &str, expected: &Value) -> Result<bool, WaitError> {
        let store = &self.store;
        let matched = self
            .poller
            .poll(move || async move {
                let text = store.get(key).await?;
                let hit = text.is_some_and(|t| parse_stored(&t) == *expected);
                Ok::<_, WaitError>(hit.then_some(()))
            })
            .await?;
        log_outcome("wait_for_value", key, matched.is_some());
        Ok(matched.is_some())
    }

    /// Wait until `check` yields a value.
    ///
    /// The check may run many times and must be safe to repeat. It receives
    /// a handle to the store so predicates can read whatever they need.
    pub async fn wait_for_condition<T, E, F, Fut>(&self, mut check: F) -> Result<Option<T>, E>
    where
        F: FnMut(S) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        let found = self.poller.poll(|| check(self.store.clone())).await?;
        tracing::debug!(found = found.is_some(), "wait_for_condition finished");
        Ok(found)
    }

    /// Wait until every key exists in the same tick; returns key to parsed value
    pub async fn wait_for_all_keys<K: AsRef<str>>(
        &self,
        keys: &[K],
    ) -> Result<Option<HashMap<String, Value>>, WaitError> {
        let store = &self.store;
        let found = self
            .poller
            .poll(move || async move {
                let mut values = HashMap::with_capacity(keys.len());
                for key in keys {
                    let key = key.as_ref();
                    match store.get(key).await? {
                        Some(text) => {
                            values.insert(key.to_string(), parse_stored(&text));
                        }
                        None => return Ok::<_, WaitError>(None),
                    }
                }
                Ok(Some(values))
            })
            .await?;
        tracing::debug!(keys = keys.len(), found = found.is_some(), "wait_for_all_keys finished");
        Ok(found)
    }

    /// Wait until one read of `hash` shows every field; returns field to parsed value
    pub async fn wait_for_hash_fields<F: AsRef<str>>(
        &self,
        hash: &str,
        fields: &[F],
    ) -> Result<Option<HashMap<String, Value>>, WaitError> {
        let store = &self.store;
        let found = self
            .poller
            .poll(move || async move {
                let Some(stored) = store.read_hash(hash).await? else {
                    return Ok::<_, WaitError>(None);
                };
                let mut values = HashMap::with_capacity(fields.len());
                for field in fields {
                    let field = field.as_ref();
                    let Some(text) = stored.get(field) else {
                        return Ok(None);
                    };
                    values.insert(field.to_string(), parse_stored(text));
                }
                Ok(Some(values))
            })
            .await?;
        log_outcome("wait_for_hash_fields", hash, found.is_some());
        Ok(found)
    }

    /// Wait until the integer counter at `key` reaches `target`; returns the
    /// first observed count at or above it. A missing key counts as not yet.
    pub async fn wait_for_count(&self, key: &str, target: i64) -> Result<Option<i64>, WaitError> {
        let store = &self.store;
        let found = self
            .poller
            .poll(move || async move {
                let Some(text) = store.get(key).await? else {
                    return Ok::<_, WaitError>(None);
                };
                let count = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| WaitError::InvalidCounter {
                        key: key.to_string(),
                        value: text.clone(),
                    })?;
                Ok((count >= target).then_some(count))
            })
            .await?;
        log_outcome("wait_for_count", key, found.is_some());
        Ok(found)
    }
}

fn log_outcome(waiter: &'static str, key: &str, found: bool) {
    if found {
        tracing::debug!(waiter, key, "condition met");
    } else {
        tracing::debug!(waiter, key, "condition not met before timeout");
    }
}

#[cfg(test)]
#[path = "waiters_tests.rs"]
mod tests;
