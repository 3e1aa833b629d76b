// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared key-value store contract
//!
//! Every process coordinating through promises must see one logical store:
//! a read after a successful write, from any process, observes that write.
//! Replicated caches with divergent reads are not supported.

mod redis;

pub use self::redis::RedisStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeKvStore, StoreCall};

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("wrong value type at key {0}")]
    WrongType(String),
    #[error("{command} failed: {message}")]
    Command {
        command: &'static str,
        message: String,
    },
}

/// Write discipline for [`KvStore::set`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetMode {
    /// Overwrite any existing value
    Always,
    /// Write only when the key does not exist yet (first write wins)
    IfAbsent,
}

/// Adapter for a shared key-value store
#[async_trait]
pub trait KvStore: Clone + Send + Sync + 'static {
    /// Read a text value; `None` when the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a text value with a TTL in seconds (0 = no expiry).
    ///
    /// Returns whether the write happened. With [`SetMode::IfAbsent`] a key
    /// that already exists is left untouched and `false` is returned.
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
        mode: SetMode,
    ) -> Result<bool, StoreError>;

    /// Delete a key; deleting a missing key is not an error
    async fn del(&self, key: &str) -> Result<(), StoreError>;

    /// Read a whole hash; `None` when the key does not exist
    async fn read_hash(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError>;

    /// Set one field of a hash, creating the hash if needed
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Add `delta` to an integer counter, creating it at zero; returns the new value
    async fn incr(&self, key: &str, delta: i64) -> Result<i64, StoreError>;
}
