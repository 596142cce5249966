// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helpers for driving the router in-process.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use serde_json::{Value, json};
use servicedesk_domain::{DirectoryUser, Role};
use servicedesk_persistence::Persistence;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::identity::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::routes::build_router;
use crate::state::AppState;

pub const REQUESTER: (&str, &str) = ("alice", "END_USER");
pub const BYSTANDER: (&str, &str) = ("bob", "END_USER");
pub const AGENT: (&str, &str) = ("sam", "SUPPORT_STAFF");
pub const MANAGER: (&str, &str) = ("maria", "SUPPORT_MANAGER");
pub const ADMIN: (&str, &str) = ("root", "ADMIN");

/// Creates app state over an in-memory store with `sam` as an assignable
/// agent and `alice` as a known requester.
pub fn create_test_app_state() -> AppState {
    let mut persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    for (user_id, display_name, role) in [
        ("alice", "Alice Archer", Role::EndUser),
        ("sam", "Sam Support", Role::SupportStaff),
    ] {
        persistence
            .upsert_directory_user(&DirectoryUser {
                user_id: user_id.to_string(),
                display_name: display_name.to_string(),
                email: format!("{user_id}@example.com"),
                role,
                is_active: true,
            })
            .unwrap();
    }
    AppState::new(persistence, ServerConfig::default())
}

pub fn create_test_app() -> (AppState, Router) {
    let app_state = create_test_app_state();
    let app = build_router(app_state.clone());
    (app_state, app)
}

/// Sends one request as `actor` and returns the response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: (&str, &str),
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(ACTOR_ID_HEADER, actor.0)
        .header(ACTOR_ROLE_HEADER, actor.1);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Sends a request and asserts the status, returning the JSON body.
pub async fn send_expect(
    app: &Router,
    method: &str,
    uri: &str,
    actor: (&str, &str),
    body: Option<Value>,
    status: StatusCode,
) -> Value {
    let response = send(app, method, uri, actor, body).await;
    assert_eq!(response.status(), status, "{method} {uri}");
    if status == StatusCode::NO_CONTENT {
        return Value::Null;
    }
    body_json(response).await
}

/// Opens a ticket as `alice` and returns its id.
pub async fn create_test_ticket(app: &Router, title: &str) -> i64 {
    let body = send_expect(
        app,
        "POST",
        "/tickets",
        REQUESTER,
        Some(json!({
            "title": title,
            "description": "Monitor shows no signal",
            "category": "HARDWARE",
        })),
        StatusCode::CREATED,
    )
    .await;
    body["ticket_id"].as_i64().unwrap()
}
