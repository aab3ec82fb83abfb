use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use service::auth::domain::{AuthSession, LoginInput, RegisterInput, SocialLoginInput};

use crate::auth::{clear_session_cookie, session_cookie, CurrentUser};
use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub is_valid: bool,
}

fn with_cookie(jar: CookieJar, session: &AuthSession) -> CookieJar {
    jar.add(session_cookie(session.token.clone()))
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered and signed in", body = crate::openapi::AuthSessionDoc), (status = 400, description = "Invalid input or email taken")))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, with_cookie(jar, &session), Json(session)))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Signed in", body = crate::openapi::AuthSessionDoc), (status = 401, description = "Invalid email or password")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.login(input).await?;
    Ok((with_cookie(jar, &session), Json(session)))
}

#[utoipa::path(post, path = "/api/auth/social-login", tag = "auth", request_body = crate::openapi::SocialLoginRequest,
    responses((status = 200, description = "Signed in", body = crate::openapi::AuthSessionDoc), (status = 400, description = "Unsupported provider or missing email")))]
pub async fn social_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<SocialLoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.social_login(input).await?;
    Ok((with_cookie(jar, &session), Json(session)))
}

#[utoipa::path(post, path = "/api/auth/refresh", tag = "auth", request_body = crate::openapi::RefreshRequestDoc,
    responses((status = 200, description = "New token pair", body = crate::openapi::AuthSessionDoc), (status = 401, description = "Invalid, expired or reused refresh token")))]
pub async fn refresh(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.refresh(&input.refresh_token).await?;
    Ok((with_cookie(jar, &session), Json(session)))
}

#[utoipa::path(post, path = "/api/auth/validate-token", tag = "auth", request_body = crate::openapi::ValidateTokenDoc,
    responses((status = 200, description = "Whether the token is valid", body = crate::openapi::ValidateTokenResponseDoc)))]
pub async fn validate_token(State(state): State<ServerState>, Json(input): Json<ValidateTokenRequest>) -> Json<ValidateTokenResponse> {
    Json(ValidateTokenResponse { is_valid: state.auth.validate_token(&input.token) })
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", security(("bearer" = [])),
    responses((status = 204, description = "Signed out"), (status = 401, description = "Not signed in")))]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    state.auth.logout(me.id).await?;
    Ok((clear_session_cookie(jar), StatusCode::NO_CONTENT))
}
