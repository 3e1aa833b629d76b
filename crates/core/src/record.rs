// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted promise record
//!
//! A record is the JSON document stored under a promise key once the promise
//! settles. Absence of a record means the promise is still pending:
//!
//! ```text
//! {"status":"resolved","value":<json>,"timestamp":"2026-01-02T03:04:05Z"}
//! {"status":"rejected","error":"<message>","stack":"<text>","timestamp":"..."}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Terminal status of a settled promise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromiseStatus {
    Resolved,
    Rejected,
}

impl fmt::Display for PromiseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseStatus::Resolved => write!(f, "resolved"),
            PromiseStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Failure captured at reject time and rebuilt for every observer
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
    pub stack: Option<String>,
}

impl Rejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error's message, with its `source()` chain as the stack text
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {}", cause));
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            stack: (!chain.is_empty()).then(|| chain.join("\n")),
        }
    }
}

/// A settled promise as stored in the shared store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PromiseRecord {
    Resolved {
        /// Missing values (e.g. written by producers that drop `undefined`) decode as null
        #[serde(default)]
        value: Value,
        timestamp: DateTime<Utc>,
    },
    Rejected {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl PromiseRecord {
    pub fn resolved(value: Value, timestamp: DateTime<Utc>) -> Self {
        PromiseRecord::Resolved { value, timestamp }
    }

    pub fn rejected(rejection: Rejection, timestamp: DateTime<Utc>) -> Self {
        PromiseRecord::Rejected {
            error: rejection.message,
            stack: rejection.stack,
            timestamp,
        }
    }

    pub fn status(&self) -> PromiseStatus {
        match self {
            PromiseRecord::Resolved { .. } => PromiseStatus::Resolved,
            PromiseRecord::Rejected { .. } => PromiseStatus::Rejected,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PromiseRecord::Resolved { timestamp, .. } | PromiseRecord::Rejected { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// Serialize to the stored text form
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the stored text form
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The settled outcome: the resolved value, or the rebuilt rejection
    pub fn into_outcome(self) -> Result<Value, Rejection> {
        match self {
            PromiseRecord::Resolved { value, .. } => Ok(value),
            PromiseRecord::Rejected { error, stack, .. } => Err(Rejection {
                message: error,
                stack,
            }),
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
