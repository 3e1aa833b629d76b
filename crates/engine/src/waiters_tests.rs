// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use std::convert::Infallible;
use tether_adapters::{FakeKvStore, SetMode, StoreError};
use tokio::time::{sleep, Instant};
use yare::parameterized;

fn waiter(store: &FakeKvStore) -> Waiter<FakeKvStore> {
    Waiter::new(store.clone())
        .with_timeout(Duration::from_millis(500))
        .with_interval(Duration::from_millis(100))
}

async fn put(store: &FakeKvStore, key: &str, value: &str) {
    store.set(key, value, 0, SetMode::Always).await.unwrap();
}

/// Write `value` at `key` after `delay_ms`, from another task
fn put_later(store: &FakeKvStore, key: &'static str, value: &'static str, delay_ms: u64) {
    let store = store.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(delay_ms)).await;
        store.set(key, value, 0, SetMode::Always).await.unwrap();
    });
}

#[parameterized(
    object = { r#"{"a":1}"#, json!({"a": 1}) },
    number = { "42", json!(42) },
    quoted = { r#""done""#, json!("done") },
    bare_word = { "done", json!("done") },
    empty = { "", json!("") },
    truncated = { r#"{"a":"#, json!(r#"{"a":"#) },
)]
fn parse_stored_prefers_json(text: &str, expected: Value) {
    assert_eq!(parse_stored(text), expected);
}

#[test]
fn from_config_uses_its_timing() {
    let config = WaitConfig {
        poll_interval: Duration::from_millis(25),
        timeout: Duration::from_secs(2),
    };
    let w = Waiter::from_config(FakeKvStore::new(), &config);
    assert_eq!(w.poller().interval(), Duration::from_millis(25));
    assert_eq!(w.poller().timeout(), Duration::from_secs(2));
}

// =============================================================================
// wait_for_key
// =============================================================================

#[tokio::test(start_paused = true)]
async fn key_present_returns_immediately() {
    let store = FakeKvStore::new();
    put(&store, "job:1", r#"{"ok":true}"#).await;
    let start = Instant::now();

    let value = waiter(&store).wait_for_key("job:1").await.unwrap();

    assert_eq!(value, Some(json!({"ok": true})));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn key_written_later_is_observed() {
    let store = FakeKvStore::new();
    put_later(&store, "job:1", "finished", 250);

    let value = waiter(&store).wait_for_key("job:1").await.unwrap();

    assert_eq!(value, Some(json!("finished")));
}

#[tokio::test(start_paused = true)]
async fn missing_key_times_out_with_none() {
    let store = FakeKvStore::new();
    let start = Instant::now();

    let value = Waiter::new(store.clone())
        .with_timeout(Duration::from_millis(200))
        .wait_for_key("job:1")
        .await
        .unwrap();

    assert_eq!(value, None);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed <= Duration::from_millis(300), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn stored_falsy_value_is_not_a_timeout() {
    let store = FakeKvStore::new();
    put(&store, "flag", "false").await;

    let value = waiter(&store).wait_for_key("flag").await.unwrap();

    assert_eq!(value, Some(json!(false)));
}

#[tokio::test]
async fn store_failure_stops_wait() {
    let store = FakeKvStore::new();
    store.set_unavailable(true);

    let err = waiter(&store).wait_for_key("job:1").await.unwrap_err();

    assert!(matches!(err, WaitError::Store(StoreError::Unavailable(_))));
}

// =============================================================================
// wait_for_value
// =============================================================================

#[tokio::test(start_paused = true)]
async fn value_match_after_change() {
    let store = FakeKvStore::new();
    put(&store, "status", r#""running""#).await;
    put_later(&store, "status", r#""done""#, 150);

    let matched = waiter(&store)
        .wait_for_value("status", &json!("done"))
        .await
        .unwrap();

    assert!(matched);
}

#[tokio::test(start_paused = true)]
async fn value_never_matching_returns_false() {
    let store = FakeKvStore::new();
    put(&store, "status", r#""running""#).await;

    let matched = waiter(&store)
        .wait_for_value("status", &json!("done"))
        .await
        .unwrap();

    assert!(!matched);
}

#[tokio::test]
async fn value_compares_parsed_structures() {
    let store = FakeKvStore::new();
    put(&store, "result", r#"{ "b": [1, 2], "a": null }"#).await;

    let matched = waiter(&store)
        .wait_for_value("result", &json!({"a": null, "b": [1, 2]}))
        .await
        .unwrap();

    assert!(matched);
}

// =============================================================================
// wait_for_condition
// =============================================================================

#[tokio::test(start_paused = true)]
async fn condition_reads_through_store_handle() {
    let store = FakeKvStore::new();
    put_later(&store, "a", "1", 120);
    put_later(&store, "b", "2", 320);

    let both = waiter(&store)
        .wait_for_condition(|s| async move {
            let a = s.get("a").await?;
            let b = s.get("b").await?;
            Ok::<_, StoreError>(a.zip(b))
        })
        .await
        .unwrap();

    assert_eq!(both, Some(("1".to_string(), "2".to_string())));
}

#[tokio::test(start_paused = true)]
async fn condition_timeout_returns_none() {
    let store = FakeKvStore::new();
    let mut calls = 0;

    let result = waiter(&store)
        .wait_for_condition(|_| {
            calls += 1;
            async { Ok::<Option<()>, Infallible>(None) }
        })
        .await;

    assert_eq!(result.unwrap(), None);
    // 0, 100, 200, 300, 400 and the deadline at 500
    assert_eq!(calls, 6);
}

// =============================================================================
// wait_for_all_keys
// =============================================================================

#[tokio::test(start_paused = true)]
async fn all_keys_returns_once_every_key_present() {
    let store = FakeKvStore::new();
    put(&store, "worker:1", r#""ready""#).await;
    put_later(&store, "worker:2", r#""ready""#, 100);
    put_later(&store, "worker:3", "3", 300);

    let values = waiter(&store)
        .wait_for_all_keys(&["worker:1", "worker:2", "worker:3"])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(values.len(), 3);
    assert_eq!(values["worker:1"], json!("ready"));
    assert_eq!(values["worker:3"], json!(3));
}

#[tokio::test(start_paused = true)]
async fn all_keys_with_one_missing_times_out() {
    let store = FakeKvStore::new();
    put(&store, "worker:1", "1").await;

    let values = waiter(&store)
        .wait_for_all_keys(&["worker:1".to_string(), "worker:2".to_string()])
        .await
        .unwrap();

    assert_eq!(values, None);
}

#[tokio::test]
async fn all_keys_with_empty_set_is_immediately_met() {
    let store = FakeKvStore::new();
    let keys: [&str; 0] = [];

    let values = waiter(&store).wait_for_all_keys(&keys).await.unwrap();

    assert_eq!(values, Some(HashMap::new()));
}

// =============================================================================
// wait_for_hash_fields
// =============================================================================

#[tokio::test(start_paused = true)]
async fn hash_fields_returns_requested_fields_only() {
    let store = FakeKvStore::new();
    store.hset("results", "w1", r#"{"n":1}"#).await.unwrap();
    store.hset("results", "extra", "x").await.unwrap();
    let later = store.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        later.hset("results", "w2", "done").await.unwrap();
    });

    let values = waiter(&store)
        .wait_for_hash_fields("results", &["w1", "w2"])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(values["w1"], json!({"n": 1}));
    assert_eq!(values["w2"], json!("done"));
}

#[tokio::test(start_paused = true)]
async fn hash_missing_entirely_times_out() {
    let store = FakeKvStore::new();

    let values = waiter(&store)
        .wait_for_hash_fields("results", &["w1"])
        .await
        .unwrap();

    assert_eq!(values, None);
}

#[tokio::test]
async fn hash_at_text_key_is_wrong_type() {
    let store = FakeKvStore::new();
    put(&store, "results", "plain").await;

    let err = waiter(&store)
        .wait_for_hash_fields("results", &["w1"])
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::Store(StoreError::WrongType(_))));
}

// =============================================================================
// wait_for_count
// =============================================================================

#[tokio::test(start_paused = true)]
async fn count_returns_first_value_at_or_above_target() {
    let store = FakeKvStore::new();
    let producer = store.clone();
    tokio::spawn(async move {
        for _ in 0..5 {
            sleep(Duration::from_millis(60)).await;
            producer.incr("done", 1).await.unwrap();
        }
    });

    let count = waiter(&store).wait_for_count("done", 3).await.unwrap();

    // Ticks at 100 and 200 see 1 and 3
    assert_eq!(count, Some(3));
}

#[tokio::test]
async fn count_already_past_target_returns_observed() {
    let store = FakeKvStore::new();
    store.incr("done", 9).await.unwrap();

    let count = waiter(&store).wait_for_count("done", 4).await.unwrap();

    assert_eq!(count, Some(9));
}

#[tokio::test(start_paused = true)]
async fn count_below_target_times_out() {
    let store = FakeKvStore::new();
    store.incr("done", 2).await.unwrap();

    let count = waiter(&store).wait_for_count("done", 3).await.unwrap();

    assert_eq!(count, None);
}

#[tokio::test]
async fn non_integer_counter_is_an_error() {
    let store = FakeKvStore::new();
    put(&store, "done", "three").await;

    let err = waiter(&store).wait_for_count("done", 3).await.unwrap_err();

    assert!(
        matches!(err, WaitError::InvalidCounter { ref key, ref value } if key == "done" && value == "three")
    );
}
