// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Promise commands

use super::Outcome;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use serde_json::Value;
use tether_adapters::KvStore;
use tether_core::{PromiseConfig, Rejection};
use tether_engine::{parse_stored, DistributedPromise};

fn handle<S: KvStore>(store: S, config: &PromiseConfig, id: String) -> DistributedPromise<S> {
    DistributedPromise::new(store, id, config.clone())
}

fn report_settled(written: bool) {
    if written {
        println!("accepted");
    } else {
        println!("already settled");
    }
}

pub async fn resolve<S: KvStore>(
    store: S,
    config: &PromiseConfig,
    id: String,
    value: &str,
) -> Result<Outcome> {
    let written = handle(store, config, id).resolve(parse_stored(value)).await?;
    report_settled(written);
    Ok(Outcome::Done)
}

pub async fn reject<S: KvStore>(
    store: S,
    config: &PromiseConfig,
    id: String,
    message: String,
    stack: Option<String>,
) -> Result<Outcome> {
    let mut rejection = Rejection::new(message);
    if let Some(stack) = stack {
        rejection = rejection.with_stack(stack);
    }
    let written = handle(store, config, id).reject_with(rejection).await?;
    report_settled(written);
    Ok(Outcome::Done)
}

pub async fn peek<S: KvStore>(
    store: S,
    config: &PromiseConfig,
    id: String,
    format: OutputFormat,
) -> Result<Outcome> {
    let value = handle(store, config, id).peek().await?;
    output::print_value(&value, format);
    Ok(Outcome::Done)
}

pub async fn consume<S: KvStore>(
    store: S,
    config: &PromiseConfig,
    id: String,
    format: OutputFormat,
) -> Result<Outcome> {
    let value = handle(store, config, id).consume().await?;
    output::print_value(&value, format);
    Ok(Outcome::Done)
}

pub async fn state<S: KvStore>(
    store: S,
    config: &PromiseConfig,
    id: String,
    format: OutputFormat,
) -> Result<Outcome> {
    match handle(store, config, id).try_state().await? {
        Some(record) => output::print_value(&serde_json::to_value(&record)?, format),
        None => output::print_value(&Value::from("pending"), format),
    }
    Ok(Outcome::Done)
}

pub async fn cleanup<S: KvStore>(store: S, config: &PromiseConfig, id: String) -> Result<Outcome> {
    let promise = handle(store, config, id);
    promise.cleanup().await?;
    println!("removed {}", promise.key());
    Ok(Outcome::Done)
}

#[cfg(test)]
#[path = "promise_tests.rs"]
mod tests;
