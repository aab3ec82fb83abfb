mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{build_app, register, send, token, PASSWORD};

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_app().await?;

    let session = register(&app, "jo@example.com", "Jo").await?;
    assert_eq!(session["user"]["email"], "jo@example.com");
    assert_eq!(session["user"]["firstName"], "Jo");
    assert!(session["refreshToken"].as_str().is_some_and(|t| t.contains('.')));
    assert!(session["expiration"].is_string());

    let reply = send(&app, "POST", "/api/auth/login", None, Some(json!({"email": "jo@example.com", "password": PASSWORD}))).await?;
    assert_eq!(reply.status, StatusCode::OK);
    let cookie = reply.set_cookie.unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_register_is_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app, "dup@example.com", "Dee").await?;

    let body = json!({"firstName": "Dee", "lastName": "Two", "email": "dup@example.com", "password": PASSWORD});
    let reply = send(&app, "POST", "/api/auth/register", None, Some(body)).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "user with this email already exists");
    Ok(())
}

#[tokio::test]
async fn test_email_is_matched_without_case() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app, "a@x.com", "Ada").await?;

    let body = json!({"firstName": "Ada", "lastName": "Two", "email": "A@X.com", "password": PASSWORD});
    let reply = send(&app, "POST", "/api/auth/register", None, Some(body)).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(&app, "POST", "/api/auth/login", None, Some(json!({"email": "A@X.COM", "password": PASSWORD}))).await?;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], "a@x.com");
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app, "wrong@example.com", "Wren").await?;

    let reply = send(&app, "POST", "/api/auth/login", None, Some(json!({"email": "wrong@example.com", "password": "nope-nope"}))).await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "invalid email or password");

    let reply = send(&app, "POST", "/api/auth/login", None, Some(json!({"email": "ghost@example.com", "password": PASSWORD}))).await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> anyhow::Result<()> {
    let app = build_app().await?;
    for body in [
        json!({"firstName": "A", "lastName": "B", "email": "a@b.com", "password": "short"}),
        json!({"firstName": "A", "lastName": "B", "email": "not-an-email", "password": PASSWORD}),
        json!({"firstName": "", "lastName": "B", "email": "c@d.com", "password": PASSWORD}),
    ] {
        let reply = send(&app, "POST", "/api/auth/register", None, Some(body)).await?;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.body["details"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn test_protected_routes_need_a_token() -> anyhow::Result<()> {
    let app = build_app().await?;
    let session = register(&app, "guard@example.com", "Gus").await?;

    assert_eq!(send(&app, "GET", "/api/pets", None, None).await?.status, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, "GET", "/api/pets", Some("garbage"), None).await?.status, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, "GET", "/api/pets", Some(&token(&session)), None).await?.status, StatusCode::OK);
    assert_eq!(send(&app, "GET", "/health", None, None).await?.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_validate_token_never_errors() -> anyhow::Result<()> {
    let app = build_app().await?;
    let session = register(&app, "valid@example.com", "Val").await?;

    let reply = send(&app, "POST", "/api/auth/validate-token", None, Some(json!({"token": token(&session)}))).await?;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"isValid": true}));

    let reply = send(&app, "POST", "/api/auth/validate-token", None, Some(json!({"token": "x.y.z"}))).await?;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"isValid": false}));
    Ok(())
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() -> anyhow::Result<()> {
    let app = build_app().await?;
    let session = register(&app, "rot@example.com", "Ro").await?;
    let first = session["refreshToken"].clone();

    let reply = send(&app, "POST", "/api/auth/refresh", None, Some(json!({"refreshToken": first}))).await?;
    assert_eq!(reply.status, StatusCode::OK);
    let second = reply.body["refreshToken"].clone();
    assert_ne!(first, second);

    let reused = send(&app, "POST", "/api/auth/refresh", None, Some(json!({"refreshToken": first}))).await?;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);

    let access = token(&reply.body);
    let out = send(&app, "POST", "/api/auth/logout", Some(&access), None).await?;
    assert_eq!(out.status, StatusCode::NO_CONTENT);
    assert!(out.set_cookie.unwrap_or_default().starts_with("auth_token="));

    let after = send(&app, "POST", "/api/auth/refresh", None, Some(json!({"refreshToken": second}))).await?;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_social_login_creates_then_reuses_account() -> anyhow::Result<()> {
    let app = build_app().await?;

    let body = json!({"provider": "myspace", "token": "t", "email": "s@example.com"});
    assert_eq!(send(&app, "POST", "/api/auth/social-login", None, Some(body)).await?.status, StatusCode::BAD_REQUEST);

    let body = json!({"provider": "google", "token": "t"});
    assert_eq!(send(&app, "POST", "/api/auth/social-login", None, Some(body)).await?.status, StatusCode::BAD_REQUEST);

    let body = json!({"provider": "google", "token": "t", "email": "social@example.com", "firstName": "Soo"});
    let first = send(&app, "POST", "/api/auth/social-login", None, Some(body.clone())).await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["user"]["firstName"], "Soo");

    let again = send(&app, "POST", "/api/auth/social-login", None, Some(json!({"provider": "facebook", "token": "u", "email": "social@example.com"}))).await?;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["user"]["id"], first.body["user"]["id"]);
    Ok(())
}
