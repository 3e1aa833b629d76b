// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether - distributed promises over a shared store

mod adapters;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{producer, promise, wait};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "tether",
    version,
    about = "Tether - promises and waiters over a shared key-value store"
)]
struct Cli {
    /// Config file (defaults to ./tether.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store URL, e.g. redis://127.0.0.1:6379
    #[arg(long, global = true)]
    url: Option<String>,

    /// Promise key namespace
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Wait timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    timeout: Option<u64>,

    /// Poll interval in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    interval: Option<u64>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log store calls and poll outcomes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a promise with a JSON value
    Resolve {
        /// Promise identifier
        id: String,
        /// Value as JSON; bare text is stored as a string
        value: String,
    },
    /// Reject a promise with an error message
    Reject {
        /// Promise identifier
        id: String,
        /// Error message
        message: String,
        /// Diagnostic text stored alongside the message
        #[arg(long)]
        stack: Option<String>,
    },
    /// Wait for a promise and print its value, leaving the record in place
    Peek {
        /// Promise identifier
        id: String,
    },
    /// Wait for a promise, print its value and delete the record
    Consume {
        /// Promise identifier
        id: String,
    },
    /// Print the stored record, or `pending`
    State {
        /// Promise identifier
        id: String,
    },
    /// Delete a promise record
    Cleanup {
        /// Promise identifier
        id: String,
    },
    /// Set one field of a hash
    Hset {
        hash: String,
        field: String,
        value: String,
    },
    /// Add to an integer counter and print the new value
    Incr {
        key: String,
        /// Amount to add
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },
    /// Wait for a condition on the store
    Wait(wait::WaitArgs),
}

impl Cli {
    fn overrides(&self) -> adapters::Overrides {
        adapters::Overrides {
            url: self.url.clone(),
            namespace: self.namespace.clone(),
            timeout: self.timeout.map(Duration::from_millis),
            interval: self.interval.map(Duration::from_millis),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = adapters::load_config(cli.config.as_deref(), &cli.overrides())?;
    let store = adapters::connect(&config.store).await?;

    let outcome = match cli.command {
        Commands::Resolve { id, value } => {
            promise::resolve(store, &config.promise, id, &value).await
        }
        Commands::Reject { id, message, stack } => {
            promise::reject(store, &config.promise, id, message, stack).await
        }
        Commands::Peek { id } => promise::peek(store, &config.promise, id, cli.format).await,
        Commands::Consume { id } => {
            promise::consume(store, &config.promise, id, cli.format).await
        }
        Commands::State { id } => promise::state(store, &config.promise, id, cli.format).await,
        Commands::Cleanup { id } => promise::cleanup(store, &config.promise, id).await,
        Commands::Hset { hash, field, value } => {
            producer::hset(store, &hash, &field, &value).await
        }
        Commands::Incr { key, by } => producer::incr(store, &key, by).await,
        Commands::Wait(args) => wait::handle(store, &config.wait, args.command, cli.format).await,
    }?;
    Ok(outcome.into())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
