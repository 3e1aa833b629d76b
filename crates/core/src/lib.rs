// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether-core: pure types for store-backed distributed promises
//!
//! This crate provides:
//! - Clock abstraction shared by timeouts, record timestamps and fake stores
//! - Promise identifiers and store key derivation
//! - The persisted promise record and its JSON codec
//! - TOML configuration with defaults for TTL, poll interval and timeout

pub mod clock;
pub mod config;
pub mod id;
pub mod record;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError, PromiseConfig, StoreConfig, WaitConfig};
pub use id::{IdGen, PromiseId, PromiseKey, SequentialIdGen, UuidIdGen, DEFAULT_NAMESPACE};
pub use record::{PromiseRecord, PromiseStatus, Rejection};
