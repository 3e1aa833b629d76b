//! CLI help specs
//!
//! Verify the command surface is discoverable without a store.

use crate::prelude::*;

#[test]
fn help_lists_promise_commands() {
    let temp = Project::empty();

    temp.tether()
        .args(&["--help"])
        .passes()
        .stdout_has("resolve")
        .stdout_has("consume")
        .stdout_has("hset")
        .stdout_has("incr")
        .stdout_has("wait");
}

#[test]
fn wait_help_lists_conditions() {
    let temp = Project::empty();

    temp.tether()
        .args(&["wait", "--help"])
        .passes()
        .stdout_has("key")
        .stdout_has("hash")
        .stdout_has("count");
}

#[test]
fn missing_command_fails() {
    let temp = Project::empty();

    temp.tether().args(&[]).fails().stderr_has("Usage");
}

#[test]
fn wait_keys_requires_at_least_one_key() {
    let temp = Project::empty();

    temp.tether()
        .args(&["wait", "keys"])
        .fails()
        .stderr_has("required");
}
