//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use codementor::{config::Config, create_router, state::AppState};

/// Router plus the state behind it
pub fn create_test_app(config: Config) -> (Router, AppState) {
    let state = AppState::new(config);
    (create_router(state.clone()), state)
}

/// Serve the router on an ephemeral port, returning its base URL
pub async fn spawn_server(config: Config) -> String {
    let (app, _) = create_test_app(config);
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server stopped");
    });

    format!("http://{}", addr)
}

/// Send one request through the router and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("valid request")
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn post_json_with_token(uri: &str, body: Value, token: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Log in through the API and return the issued token
pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        post_json("/api/login", serde_json::json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["user"]["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}
