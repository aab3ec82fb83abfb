use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use service::pets::{self, CreatePet, UpdatePet};
use service::views::PetView;

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/pets", tag = "pets", security(("bearer" = [])),
    responses((status = 200, description = "Caller's pets ordered by name", body = [crate::openapi::PetDoc])))]
pub async fn list(State(state): State<ServerState>, Extension(me): Extension<CurrentUser>) -> Result<Json<Vec<PetView>>, ApiError> {
    Ok(Json(pets::list_pets(&state.db, me.id).await?))
}

#[utoipa::path(post, path = "/api/pets", tag = "pets", security(("bearer" = [])), request_body = crate::openapi::PetInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::PetDoc), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<CreatePet>,
) -> Result<(StatusCode, Json<PetView>), ApiError> {
    let pet = pets::create_pet(&state.db, me.id, input).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

#[utoipa::path(get, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 200, body = crate::openapi::PetDoc), (status = 404, description = "No such pet")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PetView>, ApiError> {
    Ok(Json(pets::get_pet(&state.db, me.id, id).await?))
}

#[utoipa::path(put, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    request_body = crate::openapi::PetInputDoc,
    responses((status = 200, body = crate::openapi::PetDoc), (status = 404, description = "No such pet")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePet>,
) -> Result<Json<PetView>, ApiError> {
    Ok(Json(pets::update_pet(&state.db, me.id, id, input).await?))
}

#[utoipa::path(delete, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 204, description = "Deleted"), (status = 404, description = "No such pet"), (status = 400, description = "Pet has bookings")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if pets::delete_pet(&state.db, me.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(service::errors::ServiceError::not_found("pet").into())
    }
}
