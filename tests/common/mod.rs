#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn test_config() -> practice_cms::config::Config {
    let mut cfg = practice_cms::config::Config::default();
    cfg.admin.email = ADMIN_EMAIL.to_string();
    cfg.admin.password = ADMIN_PASSWORD.to_string();
    cfg.basic.insecure_cookie = true;
    cfg.basic.body_limit_bytes = 64 * 1024;
    cfg
}

pub async fn app_with(cfg: practice_cms::config::Config) -> Router {
    let pool = practice_cms::db::open("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    let state = practice_cms::CmsState::new(pool, &cfg);
    practice_cms::cms_router(state, cfg.basic.body_limit_bytes)
}

pub async fn app() -> Router {
    app_with(test_config()).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

pub const LOCAL_PEER: &str = "127.0.0.1:40000";

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    send_from(app, LOCAL_PEER, method, uri, cookie, body).await
}

/// Like [`send`], with the connection's peer address set to `peer`.
pub async fn send_from(
    app: &Router,
    peer: &str,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let peer: SocketAddr = peer.parse().expect("invalid peer address");
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");
    let mut req = req;
    req.extensions_mut().insert(ConnectInfo(peer));

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    TestResponse {
        status,
        set_cookie,
        body,
    }
}

/// Log in as the configured admin and return the `Cookie` header value.
pub async fn login(app: &Router) -> String {
    let resp = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK, "login failed: {}", resp.body);
    resp.set_cookie.expect("login did not set a session cookie")
}
