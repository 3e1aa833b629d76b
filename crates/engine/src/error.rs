// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for promises and waiters

use tether_adapters::StoreError;
use tether_core::{PromiseId, Rejection};
use thiserror::Error;

/// Errors from distributed promise operations
#[derive(Debug, Error)]
pub enum PromiseError {
    #[error("promise {id} timed out after {elapsed_ms}ms")]
    Timeout { id: PromiseId, elapsed_ms: u64 },
    /// Displays as the original rejection message
    #[error("{rejection}")]
    Rejected { id: PromiseId, rejection: Rejection },
    #[error("malformed record at {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PromiseError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PromiseError::Timeout { .. })
    }

    /// The captured rejection, if the promise was rejected
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            PromiseError::Rejected { rejection, .. } => Some(rejection),
            _ => None,
        }
    }
}

/// Errors from condition waiters
///
/// Timing out is not an error for waiters; see [`crate::Waiter`].
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("counter at {key} is not an integer: {value:?}")]
    InvalidCounter { key: String, value: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
