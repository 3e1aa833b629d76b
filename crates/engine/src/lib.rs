// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tether coordination engine
//!
//! Distributed promises and condition waiters built on a shared key-value
//! store. All waiting is poll-based: nothing is pushed between processes.

mod error;
mod poll;
mod promise;
mod waiters;

pub use error::{PromiseError, WaitError};
pub use poll::Poller;
pub use promise::DistributedPromise;
pub use waiters::{parse_stored, Waiter};
