// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed store adapter
//!
//! Conditional writes map to `SET key value NX EX ttl`, which Redis applies
//! atomically, so concurrent resolvers across processes get exactly one winner.

use super::{KvStore, SetMode, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::collections::HashMap;

/// Store adapter talking to a Redis (or Redis-compatible) server
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to `url` (e.g. `redis://127.0.0.1:6379/0`)
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid url {}: {}", url, e)))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }
}

fn map_err(command: &'static str, key: &str, e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        StoreError::Unavailable(e.to_string())
    } else if e.code() == Some("WRONGTYPE") {
        StoreError::WrongType(key.to_string())
    } else {
        StoreError::Command {
            command,
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| map_err("GET", key, e))
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
        mode: SetMode,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if mode == SetMode::IfAbsent {
            cmd.arg("NX");
        }
        if ttl_secs > 0 {
            cmd.arg("EX").arg(ttl_secs);
        }

        // Nil reply means NX refused the write
        let reply: Option<String> = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| map_err("SET", key, e))?;
        Ok(reply.is_some())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| map_err("DEL", key, e))
    }

    async fn read_hash(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(key)
            .await
            .map_err(|e| map_err("HGETALL", key, e))?;
        // Redis reports a missing hash as an empty one
        Ok((!fields.is_empty()).then_some(fields))
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(key, field, value)
            .await
            .map_err(|e| map_err("HSET", key, e))
    }

    async fn incr(&self, key: &str, delta: i64) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        conn.incr::<_, _, i64>(key, delta)
            .await
            .map_err(|e| map_err("INCRBY", key, e))
    }
}
