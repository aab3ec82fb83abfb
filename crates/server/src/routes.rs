pub mod account;
pub mod auth;
pub mod bookings;
pub mod pets;
pub mod sitters;

use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;

use crate::openapi::openapi_json;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Routes reachable without signing in.
fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/social-login", post(auth::social_login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/validate-token", post(auth::validate_token))
        .route("/api/petsitters/search", get(sitters::search))
        .route("/api/petsitters/:id", get(sitters::get))
        .route("/api/petsitters/:id/reviews", get(sitters::reviews))
}

fn protected_routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/pets", get(pets::list).post(pets::create))
        .route("/api/pets/:id", get(pets::get).put(pets::update).delete(pets::delete))
        .route("/api/petsitters", post(sitters::create).put(sitters::update).delete(sitters::delete))
        .route("/api/petsitters/profile", get(sitters::profile))
        .route("/api/petsitters/reviews", post(sitters::create_review))
        .route("/api/bookings", get(bookings::list).post(bookings::create))
        .route("/api/bookings/:id", get(bookings::get).put(bookings::update).delete(bookings::delete))
        .route("/api/bookings/:id/messages", get(bookings::messages).post(bookings::post_message))
        .route("/api/notifications/settings", get(account::settings).put(account::update_settings))
        .route("/api/users/profile", get(account::profile).put(account::update_profile))
        .route_layer(middleware::from_fn_with_state(state, crate::auth::require_auth))
}

/// Build the full application router: public and bearer-protected routes,
/// CORS and request tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    public_routes()
        .merge(protected_routes(state.clone()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
