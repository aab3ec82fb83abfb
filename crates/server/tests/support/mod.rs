#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use configs::{AppConfig, AuthConfig, DatabaseConfig};

pub const PASSWORD: &str = "hunter22";

pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig::in_memory_sqlite(),
        auth: AuthConfig { jwt_secret: "router-tests-secret-0123456789".into(), ..AuthConfig::default() },
        ..AppConfig::default()
    }
}

/// Fresh app on its own in-memory database.
pub async fn build_app() -> anyhow::Result<Router> {
    server::build_app(&test_config()).await
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<Reply> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok(Reply { status, set_cookie, body })
}

/// Registers `email` and returns the session body.
pub async fn register(app: &Router, email: &str, first_name: &str) -> anyhow::Result<Value> {
    let reply = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "firstName": first_name,
            "lastName": "Tester",
            "email": email,
            "password": PASSWORD,
            "zipCode": "80202"
        })),
    )
    .await?;
    assert_eq!(reply.status, StatusCode::CREATED, "register failed: {}", reply.body);
    Ok(reply.body)
}

pub fn token(session: &Value) -> String {
    session["token"].as_str().unwrap_or_default().to_string()
}
