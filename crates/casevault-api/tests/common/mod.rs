//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use casevault_api::routes;
use casevault_api::state::AppState;
use casevault_playback::reveal::RevealScheduler;
use casevault_session::registry::SessionRegistry;
use casevault_session::session::TracingUnlockSink;
use casevault_test_support::{fixed_clock, mini_pack};

/// Build the full app router over the two-case fixture pack with a fast
/// reveal cadence, so whole-body reveals finish in a few milliseconds.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with_cps(1_000)
}

/// Build the app with a custom reveal rate, for tests that need a reveal
/// slow enough to observe mid-reveal states.
pub fn build_test_app_with_cps(chars_per_second: u32) -> Router {
    let app_state = AppState::new(
        Arc::new(mini_pack()),
        Arc::new(SessionRegistry::new()),
        Arc::new(fixed_clock()),
        RevealScheduler::from_chars_per_second(chars_per_second),
        Arc::new(TracingUnlockSink),
    );

    routes::api_router().with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
///
/// Takes the router by reference: the in-memory session registry lives in
/// the app state, so one router must serve every request in a scenario.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with no body and return the response.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Poll GET /playback until the render state matches `want`, or panic
/// after a generous deadline. Yields between polls so the reveal timer
/// task can make progress.
pub async fn poll_until_state(app: &Router, session_id: &str, want: &str) -> serde_json::Value {
    let uri = format!("/api/v1/sessions/{session_id}/playback");
    for _ in 0..200 {
        let (status, json) = get_json(app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        if json["state"] == want {
            return json;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("playback never reached state {want:?}");
}
