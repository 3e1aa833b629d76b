// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake in-memory store for testing
//!
//! Clones share one map, so two clones behave like two processes talking to
//! the same store. TTLs expire against the configured clock.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{KvStore, SetMode, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tether_core::{Clock, SystemClock};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
        ttl_secs: u64,
        mode: SetMode,
    },
    Del {
        key: String,
    },
    ReadHash {
        key: String,
    },
    HSet {
        key: String,
        field: String,
        value: String,
    },
    Incr {
        key: String,
        delta: i64,
    },
}

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    expires_at: Option<Instant>,
}

#[derive(Default)]
struct FakeState {
    slots: HashMap<String, Slot>,
    calls: Vec<StoreCall>,
    unavailable: bool,
}

impl FakeState {
    /// Record the call, purge the key if expired, and fail if unavailable
    fn begin(&mut self, call: StoreCall, key: &str, now: Instant) -> Result<(), StoreError> {
        self.calls.push(call);
        if self.unavailable {
            return Err(StoreError::Unavailable("fake store offline".to_string()));
        }
        if let Some(slot) = self.slots.get(key) {
            if slot.expires_at.is_some_and(|at| at <= now) {
                self.slots.remove(key);
            }
        }
        Ok(())
    }
}

/// Fake key-value store for testing
#[derive(Clone)]
pub struct FakeKvStore<C: Clock = SystemClock> {
    state: Arc<Mutex<FakeState>>,
    clock: C,
}

impl FakeKvStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FakeKvStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FakeKvStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            clock,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Simulate the store going offline (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Whether a live (unexpired) key exists, without recording a call
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.lock()
            .slots
            .get(key)
            .is_some_and(|slot| slot.expires_at.map_or(true, |at| at > now))
    }

    /// Remaining TTL of a key, without recording a call
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.lock()
            .slots
            .get(key)
            .and_then(|slot| slot.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }

    /// Raw text at a key, without recording a call
    pub fn raw(&self, key: &str) -> Option<String> {
        match self.lock().slots.get(key).map(|slot| &slot.value) {
            Some(Value::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl<C: Clock> KvStore for FakeKvStore<C> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(StoreCall::Get { key: key.to_string() }, key, now)?;

        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text.clone())),
            Some(Value::Hash(_)) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
        mode: SetMode,
    ) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(
            StoreCall::Set {
                key: key.to_string(),
                value: value.to_string(),
                ttl_secs,
                mode,
            },
            key,
            now,
        )?;

        if mode == SetMode::IfAbsent && state.slots.contains_key(key) {
            return Ok(false);
        }

        // A TTL past the clock's range never expires within the test
        let expires_at = if ttl_secs > 0 {
            now.checked_add(Duration::from_secs(ttl_secs))
        } else {
            None
        };
        state.slots.insert(
            key.to_string(),
            Slot {
                value: Value::Text(value.to_string()),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(StoreCall::Del { key: key.to_string() }, key, now)?;
        state.slots.remove(key);
        Ok(())
    }

    async fn read_hash(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(StoreCall::ReadHash { key: key.to_string() }, key, now)?;

        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(None),
            Some(Value::Hash(fields)) => Ok(Some(fields.clone())),
            Some(Value::Text(_)) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(
            StoreCall::HSet {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            },
            key,
            now,
        )?;

        let slot = state.slots.entry(key.to_string()).or_insert_with(|| Slot {
            value: Value::Hash(HashMap::new()),
            expires_at: None,
        });
        match &mut slot.value {
            Value::Hash(fields) => {
                fields.insert(field.to_string(), value.to_string());
                Ok(())
            }
            Value::Text(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    async fn incr(&self, key: &str, delta: i64) -> Result<i64, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.begin(
            StoreCall::Incr {
                key: key.to_string(),
                delta,
            },
            key,
            now,
        )?;

        let slot = state.slots.entry(key.to_string()).or_insert_with(|| Slot {
            value: Value::Text("0".to_string()),
            expires_at: None,
        });
        let current = match &slot.value {
            Value::Text(text) => text.parse::<i64>().map_err(|_| StoreError::Command {
                command: "INCRBY",
                message: "value is not an integer".to_string(),
            })?,
            Value::Hash(_) => return Err(StoreError::WrongType(key.to_string())),
        };
        let next = current.checked_add(delta).ok_or(StoreError::Command {
            command: "INCRBY",
            message: "increment would overflow".to_string(),
        })?;
        slot.value = Value::Text(next.to_string());
        Ok(next)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
