use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate and assemble the application for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = ServerState::new(db, &cfg.auth);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    init_logging(&cfg.logging.format);
    if cfg.auth.jwt_secret == configs::DEV_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set; using the development secret");
    }

    let app = build_app(&cfg).await?;
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
