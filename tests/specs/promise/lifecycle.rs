//! Promise lifecycle specs against a live store

use crate::prelude::*;

#[test]
fn resolve_then_peek_then_consume() {
    let Some(url) = redis_url() else { return };
    let temp = Project::empty();
    let ns = unique_namespace("lifecycle");
    let base = ["--url", url.as_str(), "--namespace", ns.as_str()];

    temp.tether()
        .args(&base)
        .args(&["resolve", "job", r#"{"files":2}"#])
        .passes()
        .stdout_is("accepted\n");
    temp.tether()
        .args(&base)
        .args(&["reject", "job", "too late"])
        .passes()
        .stdout_is("already settled\n");
    temp.tether()
        .args(&base)
        .args(&["peek", "job"])
        .passes()
        .stdout_is("{\"files\":2}\n");
    temp.tether()
        .args(&base)
        .args(&["consume", "job"])
        .passes();
    temp.tether()
        .args(&base)
        .args(&["state", "job"])
        .passes()
        .stdout_is("pending\n");
}

#[test]
fn rejected_promise_fails_peek_with_message() {
    let Some(url) = redis_url() else { return };
    let temp = Project::empty();
    let ns = unique_namespace("rejected");
    let base = ["--url", url.as_str(), "--namespace", ns.as_str()];

    temp.tether()
        .args(&base)
        .args(&["reject", "job", "disk full"])
        .passes();
    temp.tether()
        .args(&base)
        .args(&["peek", "job"])
        .fails()
        .stderr_has("disk full");
    temp.tether().args(&base).args(&["cleanup", "job"]).passes();
}

#[test]
fn peek_of_unsettled_promise_times_out() {
    let Some(url) = redis_url() else { return };
    let temp = Project::empty();
    let ns = unique_namespace("timeout");

    temp.tether()
        .args(&["--url", url.as_str(), "--namespace", ns.as_str()])
        .args(&["--timeout", "200", "peek", "never"])
        .fails()
        .stderr_has("timed out");
}
