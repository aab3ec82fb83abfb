//! Request authentication: bearer token, falling back to the `auth_token`
//! cookie set at sign-in.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// The signed-in caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

fn bearer(headers: &HeaderMap) -> Option<Result<String, ApiError>> {
    let raw = headers.get(AUTHORIZATION)?;
    let token = raw
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::unauthorized("Authorization header must be 'Bearer <token>'"));
    Some(token)
}

/// Extract the access token from the request.
pub fn request_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(token) = bearer(headers) {
        return token;
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::unauthorized("authentication required"))
}

/// Rejects the request with 401 unless it carries a valid access token.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = request_token(req.headers()).inspect_err(|_| {
        tracing::warn!(%path, "missing access token");
    })?;
    let claims = state.auth.verify_access_token(&token).map_err(|e| {
        tracing::warn!(%path, err = %e, "token validation failed");
        ApiError::from(e)
    })?;
    let id = claims.user_id()?;
    req.extensions_mut().insert(CurrentUser { id, email: claims.email });
    Ok(next.run(req).await)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}
