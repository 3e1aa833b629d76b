// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wait commands

use super::Outcome;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;
use tether_adapters::KvStore;
use tether_core::WaitConfig;
use tether_engine::{parse_stored, Waiter};

#[derive(Args)]
pub struct WaitArgs {
    #[command(subcommand)]
    pub command: WaitCommand,
}

#[derive(Subcommand)]
pub enum WaitCommand {
    /// Wait until a key exists and print its value
    Key {
        key: String,
    },
    /// Wait until a key holds the given JSON value
    Value {
        key: String,
        /// Expected value as JSON; bare text compares as a string
        expected: String,
    },
    /// Wait until every key exists
    Keys {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Wait until a hash holds every field
    Hash {
        hash: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Wait until an integer counter reaches a target
    Count {
        key: String,
        target: i64,
    },
}

fn timed_out() -> Outcome {
    println!("timed out");
    Outcome::TimedOut
}

pub async fn handle<S: KvStore>(
    store: S,
    config: &WaitConfig,
    command: WaitCommand,
    format: OutputFormat,
) -> Result<Outcome> {
    let waiter = Waiter::from_config(store, config);

    let outcome = match command {
        WaitCommand::Key { key } => match waiter.wait_for_key(&key).await? {
            Some(value) => {
                output::print_value(&value, format);
                Outcome::Done
            }
            None => timed_out(),
        },
        WaitCommand::Value { key, expected } => {
            let expected = parse_stored(&expected);
            if waiter.wait_for_value(&key, &expected).await? {
                output::print_value(&expected, format);
                Outcome::Done
            } else {
                timed_out()
            }
        }
        WaitCommand::Keys { keys } => match waiter.wait_for_all_keys(&keys).await? {
            Some(values) => {
                output::print_map(&values, format);
                Outcome::Done
            }
            None => timed_out(),
        },
        WaitCommand::Hash { hash, fields } => {
            match waiter.wait_for_hash_fields(&hash, &fields).await? {
                Some(values) => {
                    output::print_map(&values, format);
                    Outcome::Done
                }
                None => timed_out(),
            }
        }
        WaitCommand::Count { key, target } => match waiter.wait_for_count(&key, target).await? {
            Some(count) => {
                output::print_value(&Value::from(count), format);
                Outcome::Done
            }
            None => timed_out(),
        },
    };
    Ok(outcome)
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
