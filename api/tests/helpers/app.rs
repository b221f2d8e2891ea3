use api::{routes::app, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::{
    authorization::AuthorizationPolicy,
    credentials::{CredentialVerifier, PlaintextVerifier},
};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory database, using the plaintext scheme.
pub async fn make_test_app(policy: AuthorizationPolicy) -> (Router, AppState) {
    make_test_app_with(policy, Arc::new(PlaintextVerifier)).await
}

pub async fn make_test_app_with(
    policy: AuthorizationPolicy,
    verifier: Arc<dyn CredentialVerifier>,
) -> (Router, AppState) {
    let db = setup_test_db().await;
    let state = AppState::new(db, policy, verifier);
    (app(state.clone()), state)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

/// Sends the request and decodes the JSON envelope.
pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, req).await;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
