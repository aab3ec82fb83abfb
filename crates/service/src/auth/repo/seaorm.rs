use chrono::{DateTime, FixedOffset};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use models::errors::ModelError;
use models::{notification_settings, refresh_token, user, user_credentials};

use crate::auth::domain::{AuthUser, Credentials, NewAccount, StoredRefreshToken};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: impl ToString) -> AuthError {
    AuthError::Repository(e.to_string())
}

fn model_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
        ModelError::Conflict(_) => AuthError::Conflict,
        ModelError::Db(msg) => AuthError::Repository(msg),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user::find_by_email(&self.db, email).await.map_err(model_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find_by_id(user_id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_account(&self, account: NewAccount, credentials: Option<(String, String)>) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        let created = user::create(
            &txn,
            user::NewUser {
                email: account.email,
                first_name: account.first_name,
                last_name: account.last_name,
                zip_code: account.zip_code,
                how_did_you_hear: account.how_did_you_hear,
            },
        )
        .await
        .map_err(model_err)?;
        if let Some((password_hash, algorithm)) = credentials {
            user_credentials::upsert_password(&txn, created.id, password_hash, &algorithm)
                .await
                .map_err(model_err)?;
        }
        notification_settings::create_default(&txn, created.id).await.map_err(model_err)?;
        txn.commit().await.map_err(repo_err)?;
        Ok(AuthUser::from(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = user_credentials::find_by_user(&self.db, user_id).await.map_err(model_err)?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn store_refresh_token(&self, id: Uuid, user_id: Uuid, secret_hash: String, expires_at: DateTime<FixedOffset>) -> Result<(), AuthError> {
        refresh_token::create(&self.db, id, user_id, secret_hash, expires_at)
            .await
            .map_err(model_err)?;
        Ok(())
    }

    async fn find_refresh_token(&self, id: Uuid) -> Result<Option<StoredRefreshToken>, AuthError> {
        let res = refresh_token::Entity::find_by_id(id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(|t| StoredRefreshToken {
            id: t.id,
            user_id: t.user_id,
            revoked: t.revoked_at.is_some(),
            secret_hash: t.secret_hash,
            expires_at: t.expires_at,
        }))
    }

    async fn revoke_refresh_token(&self, id: Uuid) -> Result<(), AuthError> {
        refresh_token::revoke(&self.db, id).await.map_err(model_err)
    }

    async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<u64, AuthError> {
        refresh_token::revoke_all_for_user(&self.db, user_id).await.map_err(model_err)
    }
}
