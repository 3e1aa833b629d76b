// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Producer commands that feed the hash and counter waiters

use super::Outcome;
use anyhow::Result;
use tether_adapters::KvStore;

pub async fn hset<S: KvStore>(store: S, hash: &str, field: &str, value: &str) -> Result<Outcome> {
    store.hset(hash, field, value).await?;
    println!("set {} {}", hash, field);
    Ok(Outcome::Done)
}

pub async fn incr<S: KvStore>(store: S, key: &str, by: i64) -> Result<Outcome> {
    let count = store.incr(key, by).await?;
    println!("{}", count);
    Ok(Outcome::Done)
}

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;
