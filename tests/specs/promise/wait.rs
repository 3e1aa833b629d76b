//! Wait command specs against a live store

use crate::prelude::*;

#[test]
fn wait_for_missing_key_exits_with_timeout_status() {
    let Some(url) = redis_url() else { return };
    let temp = Project::empty();
    let key = unique_namespace("wait-key");

    temp.tether()
        .args(&["--url", url.as_str(), "--timeout", "200"])
        .args(&["wait", "key", key.as_str()])
        .exits_with(2)
        .stdout_is("timed out\n");
}

#[test]
fn wait_for_settled_promise_key() {
    let Some(url) = redis_url() else { return };
    let temp = Project::empty();
    let ns = unique_namespace("wait-promise");
    let key = format!("{}:job", ns);

    temp.tether()
        .args(&["--url", url.as_str(), "--namespace", ns.as_str()])
        .args(&["resolve", "job", "7"])
        .passes();
    temp.tether()
        .args(&["--url", url.as_str(), "--timeout", "500"])
        .args(&["wait", "key", key.as_str()])
        .passes()
        .stdout_has("\"status\":\"resolved\"");
    temp.tether()
        .args(&["--url", url.as_str(), "--namespace", ns.as_str()])
        .args(&["cleanup", "job"])
        .passes();
}
