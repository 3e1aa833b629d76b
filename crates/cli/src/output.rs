// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render a single value. Text prints strings bare and everything else as
/// compact JSON; Json always prints pretty JSON.
pub fn render_value(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        OutputFormat::Json => pretty(value),
    }
}

/// Render a key to value mapping sorted by key
pub fn render_map(map: &HashMap<String, Value>, format: OutputFormat) -> String {
    let sorted: BTreeMap<&String, &Value> = map.iter().collect();
    match format {
        OutputFormat::Text => sorted
            .into_iter()
            .map(|(k, v)| format!("{}\t{}", k, render_value(v, OutputFormat::Text)))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&sorted).unwrap_or_default(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Print a single value in the specified format
pub fn print_value(value: &Value, format: OutputFormat) {
    println!("{}", render_value(value, format));
}

/// Print a mapping in the specified format
pub fn print_map(map: &HashMap<String, Value>, format: OutputFormat) {
    let text = render_map(map, format);
    if !text.is_empty() {
        println!("{}", text);
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
