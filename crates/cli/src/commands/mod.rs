// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod promise;
pub mod producer;
pub mod wait;

use std::process::ExitCode;

/// Exit status when a wait ends without its condition being met
const TIMED_OUT_STATUS: u8 = 2;

/// How a command finished, when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    TimedOut,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::TimedOut => ExitCode::from(TIMED_OUT_STATUS),
        }
    }
}
