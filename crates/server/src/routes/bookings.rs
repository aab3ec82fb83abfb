use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use service::bookings::{self, CreateBooking, PostMessage, UpdateBooking};
use service::pagination::{Page, Pagination};
use service::views::{BookingView, MessageView};

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/bookings", tag = "bookings", security(("bearer" = [])), params(crate::openapi::PageParams),
    responses((status = 200, description = "Caller's bookings, latest start first", body = crate::openapi::BookingPageDoc)))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Query(p): Query<Pagination>,
) -> Result<Json<Page<BookingView>>, ApiError> {
    Ok(Json(bookings::list_bookings(&state.db, me.id, p).await?))
}

#[utoipa::path(post, path = "/api/bookings", tag = "bookings", security(("bearer" = [])), request_body = crate::openapi::BookingInputDoc,
    responses((status = 201, body = crate::openapi::BookingDoc), (status = 400, description = "Invalid request"), (status = 404, description = "Unknown pet or sitter")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Json(input): Json<CreateBooking>,
) -> Result<(StatusCode, Json<BookingView>), ApiError> {
    let booking = bookings::create_booking(&state.db, me.id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(get, path = "/api/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 200, body = crate::openapi::BookingDoc), (status = 404, description = "No such booking")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, ApiError> {
    Ok(Json(bookings::get_booking(&state.db, me.id, id).await?))
}

#[utoipa::path(put, path = "/api/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    request_body = crate::openapi::BookingUpdateDoc,
    responses((status = 200, body = crate::openapi::BookingDoc), (status = 400, description = "Invalid change"),
        (status = 403, description = "Other party's move"), (status = 404, description = "No such booking")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBooking>,
) -> Result<Json<BookingView>, ApiError> {
    Ok(Json(bookings::update_booking(&state.db, me.id, id, input).await?))
}

#[utoipa::path(delete, path = "/api/bookings/{id}", tag = "bookings", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 204, description = "Deleted"), (status = 400, description = "Booking already went ahead"), (status = 404, description = "No such booking")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    bookings::delete_booking(&state.db, me.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/bookings/{id}/messages", tag = "bookings", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Oldest first", body = [crate::openapi::MessageDoc]), (status = 404, description = "No such booking")))]
pub async fn messages(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    Ok(Json(bookings::list_messages(&state.db, me.id, id).await?))
}

#[utoipa::path(post, path = "/api/bookings/{id}/messages", tag = "bookings", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    request_body = crate::openapi::MessageInputDoc,
    responses((status = 201, body = crate::openapi::MessageDoc), (status = 404, description = "No such booking")))]
pub async fn post_message(
    State(state): State<ServerState>,
    Extension(me): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<PostMessage>,
) -> Result<(StatusCode, Json<MessageView>), ApiError> {
    let msg = bookings::post_message(&state.db, me.id, id, input).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}
