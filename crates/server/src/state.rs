use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::SeaOrmAuthRepository;
use service::auth::social::ClaimedEmailVerifier;
use service::auth::{AuthService, AuthSettings, JwtTokenIssuer};

pub type Auth = AuthService<SeaOrmAuthRepository>;

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<Auth>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &configs::AuthConfig) -> Self {
        let auth = AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(db.clone())),
            Arc::new(JwtTokenIssuer::from_config(cfg)),
            Arc::new(ClaimedEmailVerifier),
            AuthSettings::from_config(cfg),
        );
        Self { db, auth: Arc::new(auth) }
    }
}
