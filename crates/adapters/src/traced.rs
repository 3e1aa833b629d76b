// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use crate::store::{KvStore, SetMode, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any KvStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[async_trait]
impl<S: KvStore> KvStore for TracedStore<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let start = Instant::now();
        let result = self.inner.get(key).await;
        match &result {
            Ok(value) => tracing::trace!(
                key,
                found = value.is_some(),
                elapsed_ms = elapsed_ms(start),
                "store.get"
            ),
            Err(e) => tracing::error!(key, error = %e, "store.get failed"),
        }
        result
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
        mode: SetMode,
    ) -> Result<bool, StoreError> {
        let span = tracing::info_span!("store.set", key, ttl_secs, mode = ?mode);
        async {
            let start = Instant::now();
            let result = self.inner.set(key, value, ttl_secs, mode).await;
            match &result {
                Ok(true) => tracing::debug!(
                    value_len = value.len(),
                    elapsed_ms = elapsed_ms(start),
                    "written"
                ),
                // Losing a conditional write is an expected outcome
                Ok(false) => tracing::debug!(elapsed_ms = elapsed_ms(start), "key exists, skipped"),
                Err(e) => tracing::error!(error = %e, "set failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.del", key);
        async {
            let result = self.inner.del(key).await;
            match &result {
                Ok(()) => tracing::debug!("deleted"),
                Err(e) => tracing::error!(error = %e, "del failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn read_hash(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        let start = Instant::now();
        let result = self.inner.read_hash(key).await;
        match &result {
            Ok(fields) => tracing::trace!(
                key,
                fields = fields.as_ref().map_or(0, |f| f.len()),
                elapsed_ms = elapsed_ms(start),
                "store.read_hash"
            ),
            Err(e) => tracing::error!(key, error = %e, "store.read_hash failed"),
        }
        result
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.hset", key, field);
        async {
            let result = self.inner.hset(key, field, value).await;
            match &result {
                Ok(()) => tracing::debug!(value_len = value.len(), "field set"),
                Err(e) => tracing::error!(error = %e, "hset failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn incr(&self, key: &str, delta: i64) -> Result<i64, StoreError> {
        let span = tracing::info_span!("store.incr", key, delta);
        async {
            let result = self.inner.incr(key, delta).await;
            match &result {
                Ok(count) => tracing::debug!(count, "incremented"),
                Err(e) => tracing::error!(error = %e, "incr failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
