//! Config specs
//!
//! Configuration problems are reported before any store is contacted.

use crate::prelude::*;

#[test]
fn explicit_missing_config_fails() {
    let temp = Project::empty();

    temp.tether()
        .args(&["--config", "absent.toml", "state", "x"])
        .fails()
        .stderr_has("absent.toml");
}

#[test]
fn unknown_config_field_fails() {
    let temp = Project::empty();
    temp.file("tether.toml", "[promise]\nnamspace = \"typo\"\n");

    temp.tether()
        .args(&["state", "x"])
        .fails()
        .stderr_has("namspace");
}

#[test]
fn zero_ttl_fails_validation() {
    let temp = Project::empty();
    temp.file("custom.toml", "[promise]\nttl = \"0s\"\n");

    temp.tether()
        .args(&["--config", "custom.toml", "resolve", "x", "1"])
        .fails()
        .stderr_has("promise.ttl must be positive");
}

#[test]
fn unsupported_store_url_fails() {
    let temp = Project::empty();

    temp.tether()
        .args(&["--url", "http://127.0.0.1:1", "state", "x"])
        .fails()
        .stderr_has("invalid url");
}

#[test]
fn store_url_from_environment_is_used() {
    let temp = Project::empty();

    temp.tether()
        .env("TETHER_STORE_URL", "http://from-env")
        .args(&["state", "x"])
        .fails()
        .stderr_has("http://from-env");
}
