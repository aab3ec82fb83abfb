//! The caller's own account: profile and notification settings.

use axum::extract::State;
use axum::{Extension, Json};

use service::notifications::{self, UpdateNotificationSettings};
use service::users::{self, UpdateProfile};
use service::views::{NotificationSettingsView, UserView};

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/users/profile", tag = "users", security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::UserDoc)))]
pub async fn profile(State(state): State<ServerState>, Extension(me): Extension<CurrentUser>) -> Result<Json<UserView>, ApiError> {
    Ok(Json(users::get_profile(&state.db, me.id).await?))
}

#[utoipa::path(put, path = "/api/users/profile", tag = "users", security(("bearer" = [])), request_body = crate::openapi::ProfileUpdateDoc,
    responses((status = 200, body = crate::openapi::UserDoc), (status = 400, description = "Invalid input or email taken")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<UserView>, ApiError> {
    Ok(Json(users::update_profile(&state.db, me.id, input).await?))
}

#[utoipa::path(get, path = "/api/notifications/settings", tag = "notifications", security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::NotificationSettingsDoc)))]
pub async fn settings(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
) -> Result<Json<NotificationSettingsView>, ApiError> {
    Ok(Json(notifications::get_settings(&state.db, me.id).await?))
}

#[utoipa::path(put, path = "/api/notifications/settings", tag = "notifications", security(("bearer" = [])),
    request_body = crate::openapi::NotificationSettingsUpdateDoc,
    responses((status = 200, body = crate::openapi::NotificationSettingsDoc), (status = 400, description = "A toggle was null")))]
pub async fn update_settings(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<UpdateNotificationSettings>,
) -> Result<Json<NotificationSettingsView>, ApiError> {
    Ok(Json(notifications::update_settings(&state.db, me.id, input).await?))
}
