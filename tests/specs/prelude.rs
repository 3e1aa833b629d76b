//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

pub use predicates::str::contains;

/// Scratch working directory for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
    }

    /// `tether` run from the project root with a clean environment
    pub fn tether(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("tether").expect("tether binary");
        cmd.current_dir(self.dir.path())
            .env_remove("TETHER_STORE_URL")
            .env_remove("TETHER_NAMESPACE")
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        Outcome(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> Outcome {
        Outcome(self.cmd.assert().failure())
    }

    pub fn exits_with(mut self, code: i32) -> Outcome {
        Outcome(self.cmd.assert().code(code))
    }
}

pub struct Outcome(Assert);

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        Outcome(self.0.stdout(contains(needle)))
    }

    pub fn stdout_is(self, expected: &str) -> Self {
        Outcome(self.0.stdout(predicate::eq(expected.to_string())))
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Outcome(self.0.stderr(contains(needle)))
    }
}

/// Live store URL for specs that need one
pub fn redis_url() -> Option<String> {
    std::env::var("TETHER_TEST_REDIS_URL").ok()
}

/// Namespace unique to this run so parallel specs do not collide
pub fn unique_namespace(name: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("tether-spec-{}-{}-{}", name, nanos % 1_000_000_000, n)
}
