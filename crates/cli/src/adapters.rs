// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config resolution and store factory for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tether_adapters::{RedisStore, TracedStore};
use tether_core::{Config, StoreConfig};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "tether.toml";

/// The store every command talks to
pub type Store = TracedStore<RedisStore>;

/// Values from command-line flags; these win over file and environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub namespace: Option<String>,
    pub timeout: Option<Duration>,
    pub interval: Option<Duration>,
}

/// Resolve config: file, then environment, then flags
pub fn load_config(explicit: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    build_config(explicit, Path::new(DEFAULT_CONFIG), overrides, |key| {
        std::env::var(key).ok()
    })
}

fn build_config<F>(
    explicit: Option<&Path>,
    fallback: &Path,
    overrides: &Overrides,
    lookup: F,
) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if fallback.is_file() => Config::load(fallback)
            .with_context(|| format!("loading config {}", fallback.display()))?,
        None => Config::default(),
    };

    let mut config = config.with_env_overrides(lookup);
    if let Some(url) = &overrides.url {
        config.store.url = url.clone();
    }
    if let Some(namespace) = &overrides.namespace {
        config.promise.namespace = namespace.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.promise.timeout = timeout;
        config.wait.timeout = timeout;
    }
    if let Some(interval) = overrides.interval {
        config.promise.poll_interval = interval;
        config.wait.poll_interval = interval;
    }
    config.validate()?;
    Ok(config)
}

/// Connect to the configured store, wrapped for tracing
pub async fn connect(config: &StoreConfig) -> Result<Store> {
    tracing::debug!(url = %config.url, "connecting to store");
    let store = RedisStore::connect(&config.url)
        .await
        .with_context(|| format!("connecting to {}", config.url))?;
    Ok(TracedStore::new(store))
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
