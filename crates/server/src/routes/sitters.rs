use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use service::errors::ServiceError;
use service::sitters::{self, CreateReview, CreateSitter, SitterSearch, UpdateSitter};
use service::views::{ReviewView, SitterView};

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/petsitters", tag = "petsitters", security(("bearer" = [])), request_body = crate::openapi::SitterInputDoc,
    responses((status = 201, body = crate::openapi::SitterDoc), (status = 400, description = "Invalid input or profile exists")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<CreateSitter>,
) -> Result<(StatusCode, Json<SitterView>), ApiError> {
    let sitter = sitters::create_profile(&state.db, me.id, input).await?;
    Ok((StatusCode::CREATED, Json(sitter)))
}

#[utoipa::path(get, path = "/api/petsitters/profile", tag = "petsitters", security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::SitterDoc), (status = 404, description = "Caller is not a sitter")))]
pub async fn profile(State(state): State<ServerState>, Extension(me): Extension<CurrentUser>) -> Result<Json<SitterView>, ApiError> {
    Ok(Json(sitters::get_by_user(&state.db, me.id).await?))
}

#[utoipa::path(put, path = "/api/petsitters", tag = "petsitters", security(("bearer" = [])), request_body = crate::openapi::SitterInputDoc,
    responses((status = 200, body = crate::openapi::SitterDoc), (status = 404, description = "Caller is not a sitter")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<UpdateSitter>,
) -> Result<Json<SitterView>, ApiError> {
    Ok(Json(sitters::update_profile(&state.db, me.id, input).await?))
}

#[utoipa::path(delete, path = "/api/petsitters", tag = "petsitters", security(("bearer" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Caller is not a sitter")))]
pub async fn delete(State(state): State<ServerState>, Extension(me): Extension<CurrentUser>) -> Result<StatusCode, ApiError> {
    if sitters::delete_profile(&state.db, me.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::not_found("pet sitter profile").into())
    }
}

#[utoipa::path(get, path = "/api/petsitters/search", tag = "petsitters", params(crate::openapi::SitterSearchParams),
    responses((status = 200, description = "Up to 50 available sitters", body = [crate::openapi::SitterDoc])))]
pub async fn search(State(state): State<ServerState>, Query(q): Query<SitterSearch>) -> Result<Json<Vec<SitterView>>, ApiError> {
    Ok(Json(sitters::search_sitters(&state.db, &q).await?))
}

#[utoipa::path(get, path = "/api/petsitters/{id}", tag = "petsitters", params(("id" = Uuid, Path,)),
    responses((status = 200, body = crate::openapi::SitterDoc), (status = 404, description = "No such sitter")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<SitterView>, ApiError> {
    Ok(Json(sitters::get_by_id(&state.db, id).await?))
}

#[utoipa::path(get, path = "/api/petsitters/{id}/reviews", tag = "petsitters", params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Newest first", body = [crate::openapi::ReviewDoc]), (status = 404, description = "No such sitter")))]
pub async fn reviews(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Vec<ReviewView>>, ApiError> {
    Ok(Json(sitters::list_reviews(&state.db, id).await?))
}

#[utoipa::path(post, path = "/api/petsitters/reviews", tag = "petsitters", security(("bearer" = [])), request_body = crate::openapi::ReviewInputDoc,
    responses((status = 201, body = crate::openapi::ReviewDoc), (status = 400, description = "Invalid rating, booking not completed or already reviewed"),
        (status = 403, description = "Not the booking's customer"), (status = 404, description = "No such booking")))]
pub async fn create_review(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<CreateReview>,
) -> Result<(StatusCode, Json<ReviewView>), ApiError> {
    let review = sitters::create_review(&state.db, me.id, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
