// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distributed promise backed by one store record
//!
//! State machine: Pending -> Resolved | Rejected, with no way out of a
//! terminal state. Pending is the absence of a record. Settling writes the
//! record with a conditional create, so among concurrent resolvers in any
//! number of processes exactly one write lands and the rest are no-ops.

use crate::error::PromiseError;
use crate::poll::Poller;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tether_adapters::{KvStore, SetMode};
use tether_core::{
    Clock, IdGen, PromiseConfig, PromiseId, PromiseKey, PromiseRecord, PromiseStatus, Rejection,
    SystemClock, UuidIdGen,
};
use tokio::time::Instant;

/// Caller-side handle to a promise stored at `<namespace>:<id>`
#[derive(Clone)]
pub struct DistributedPromise<S, C = SystemClock> {
    store: S,
    clock: C,
    id: PromiseId,
    key: PromiseKey,
    config: PromiseConfig,
}

impl<S: KvStore> DistributedPromise<S> {
    /// Handle for a known identifier
    pub fn new(store: S, id: impl Into<PromiseId>, config: PromiseConfig) -> Self {
        let id = id.into();
        let key = PromiseKey::new(&config.namespace, &id);
        Self {
            store,
            clock: SystemClock,
            id,
            key,
            config,
        }
    }

    /// Handle for a fresh random identifier
    pub fn generate(store: S, config: PromiseConfig) -> Self {
        Self::generate_with(store, config, &UuidIdGen)
    }

    pub fn generate_with(store: S, config: PromiseConfig, id_gen: &impl IdGen) -> Self {
        Self::new(store, PromiseId::generate(id_gen), config)
    }
}

impl<S: KvStore, C: Clock> DistributedPromise<S, C> {
    /// Use another clock for record timestamps
    pub fn with_clock<C2: Clock>(self, clock: C2) -> DistributedPromise<S, C2> {
        DistributedPromise {
            store: self.store,
            clock,
            id: self.id,
            key: self.key,
            config: self.config,
        }
    }

    pub fn id(&self) -> &PromiseId {
        &self.id
    }

    pub fn key(&self) -> &PromiseKey {
        &self.key
    }

    pub fn config(&self) -> &PromiseConfig {
        &self.config
    }

    /// Settle as resolved. Returns `false` if the promise was already settled.
    pub async fn resolve(&self, value: Value) -> Result<bool, PromiseError> {
        let record = PromiseRecord::resolved(value, self.clock.utc_now());
        self.settle(record).await
    }

    /// Serialize `value` and settle as resolved
    pub async fn resolve_with<T: Serialize>(&self, value: &T) -> Result<bool, PromiseError> {
        let value = serde_json::to_value(value).map_err(|source| PromiseError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.resolve(value).await
    }

    /// Settle as rejected with the error's message and source chain.
    /// Returns `false` if the promise was already settled.
    pub async fn reject(
        &self,
        error: &(dyn std::error::Error + Send + Sync + 'static),
    ) -> Result<bool, PromiseError> {
        self.reject_with(Rejection::from_error(error)).await
    }

    /// Settle as rejected with an explicit message and optional stack text
    pub async fn reject_with(&self, rejection: Rejection) -> Result<bool, PromiseError> {
        let record = PromiseRecord::rejected(rejection, self.clock.utc_now());
        self.settle(record).await
    }

    async fn settle(&self, record: PromiseRecord) -> Result<bool, PromiseError> {
        let status = record.status();
        let text = record.encode().map_err(|source| PromiseError::Encode {
            key: self.key.to_string(),
            source,
        })?;

        let written = self
            .store
            .set(
                self.key.as_str(),
                &text,
                self.config.ttl_secs(),
                SetMode::IfAbsent,
            )
            .await?;

        if written {
            tracing::info!(key = %self.key, %status, "promise settled");
        } else {
            tracing::debug!(key = %self.key, %status, "promise already settled, write skipped");
        }
        Ok(written)
    }

    /// Wait for the outcome without removing the record.
    ///
    /// Any number of observers may peek the same promise; all of them see the
    /// same outcome until the record is cleaned up or expires.
    pub async fn peek(&self) -> Result<Value, PromiseError> {
        let start = Instant::now();
        let record = Poller::from(&self.config)
            .poll(|| self.read_record())
            .await?;

        match record {
            Some(record) => record
                .into_outcome()
                .map_err(|rejection| PromiseError::Rejected {
                    id: self.id.clone(),
                    rejection,
                }),
            None => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                tracing::debug!(key = %self.key, elapsed_ms, "promise wait timed out");
                Err(PromiseError::Timeout {
                    id: self.id.clone(),
                    elapsed_ms,
                })
            }
        }
    }

    /// [`peek`](Self::peek) and deserialize the resolved value
    pub async fn peek_as<T: DeserializeOwned>(&self) -> Result<T, PromiseError> {
        let value = self.peek().await?;
        self.decode_value(value)
    }

    /// Wait for the outcome, then delete the record whatever the outcome.
    ///
    /// The record is removed after success, rejection and timeout alike. When
    /// the wait already failed, a failing delete is logged and the wait error
    /// is returned; after success, a failing delete is returned.
    pub async fn consume(&self) -> Result<Value, PromiseError> {
        let outcome = self.peek().await;

        if let Err(e) = self.store.del(self.key.as_str()).await {
            if outcome.is_ok() {
                return Err(e.into());
            }
            tracing::warn!(key = %self.key, error = %e, "cleanup after failed wait did not complete");
        } else {
            tracing::debug!(key = %self.key, ok = outcome.is_ok(), "promise consumed");
        }
        outcome
    }

    /// [`consume`](Self::consume) and deserialize the resolved value
    pub async fn consume_as<T: DeserializeOwned>(&self) -> Result<T, PromiseError> {
        let value = self.consume().await?;
        self.decode_value(value)
    }

    /// Delete the record; safe when nothing is stored
    pub async fn cleanup(&self) -> Result<(), PromiseError> {
        self.store.del(self.key.as_str()).await?;
        tracing::debug!(key = %self.key, "promise cleaned up");
        Ok(())
    }

    /// Whether no record is stored yet. Read failures report `false`.
    pub async fn is_pending(&self) -> bool {
        match self.read_record().await {
            Ok(record) => record.is_none(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "promise state read failed");
                false
            }
        }
    }

    /// Whether the stored record is resolved. Read failures report `false`.
    pub async fn is_resolved(&self) -> bool {
        self.has_status(PromiseStatus::Resolved).await
    }

    /// Whether the stored record is rejected. Read failures report `false`.
    pub async fn is_rejected(&self) -> bool {
        self.has_status(PromiseStatus::Rejected).await
    }

    /// The raw stored record, for diagnostics. Read failures report `None`.
    pub async fn state(&self) -> Option<PromiseRecord> {
        match self.try_state().await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "promise state read failed");
                None
            }
        }
    }

    /// One read of the stored record; `Ok(None)` means pending
    pub async fn try_state(&self) -> Result<Option<PromiseRecord>, PromiseError> {
        self.read_record().await
    }

    async fn has_status(&self, status: PromiseStatus) -> bool {
        self.state()
            .await
            .is_some_and(|record| record.status() == status)
    }

    async fn read_record(&self) -> Result<Option<PromiseRecord>, PromiseError> {
        let Some(text) = self.store.get(self.key.as_str()).await? else {
            return Ok(None);
        };
        PromiseRecord::decode(&text)
            .map(Some)
            .map_err(|source| PromiseError::Decode {
                key: self.key.to_string(),
                source,
            })
    }

    fn decode_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, PromiseError> {
        serde_json::from_value(value).map_err(|source| PromiseError::Decode {
            key: self.key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "promise_tests.rs"]
mod tests;
