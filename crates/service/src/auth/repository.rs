use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, NewAccount, StoredRefreshToken};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user(&self, user_id: Uuid) -> Result<Option<AuthUser>, AuthError>;

    /// Creates the user, its credentials (when given) and default
    /// notification settings atomically. Duplicate emails yield `Conflict`.
    async fn create_account(&self, account: NewAccount, credentials: Option<(String, String)>) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;

    async fn store_refresh_token(&self, id: Uuid, user_id: Uuid, secret_hash: String, expires_at: DateTime<FixedOffset>) -> Result<(), AuthError>;
    async fn find_refresh_token(&self, id: Uuid) -> Result<Option<StoredRefreshToken>, AuthError>;
    async fn revoke_refresh_token(&self, id: Uuid) -> Result<(), AuthError>;
    async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<u64, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>,              // key: email
        creds: Mutex<HashMap<Uuid, Credentials>>,             // key: user_id
        refresh: Mutex<HashMap<Uuid, StoredRefreshToken>>,    // key: token id
    }

    impl MockAuthRepository {
        /// Number of non-revoked refresh tokens held for a user.
        pub fn live_refresh_tokens(&self, user_id: Uuid) -> usize {
            let refresh = self.refresh.lock().unwrap();
            refresh.values().filter(|t| t.user_id == user_id && !t.revoked).count()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).cloned())
        }

        async fn find_user(&self, user_id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.id == user_id).cloned())
        }

        async fn create_account(&self, account: NewAccount, credentials: Option<(String, String)>) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&account.email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email.clone(),
                zip_code: account.zip_code,
                how_did_you_hear: account.how_did_you_hear,
                created_at: Utc::now().into(),
            };
            users.insert(account.email, user.clone());
            if let Some((password_hash, password_algorithm)) = credentials {
                let mut creds = self.creds.lock().unwrap();
                creds.insert(user.id, Credentials { user_id: user.id, password_hash, password_algorithm });
            }
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn store_refresh_token(&self, id: Uuid, user_id: Uuid, secret_hash: String, expires_at: DateTime<FixedOffset>) -> Result<(), AuthError> {
            let mut refresh = self.refresh.lock().unwrap();
            refresh.insert(id, StoredRefreshToken { id, user_id, secret_hash, expires_at, revoked: false });
            Ok(())
        }

        async fn find_refresh_token(&self, id: Uuid) -> Result<Option<StoredRefreshToken>, AuthError> {
            let refresh = self.refresh.lock().unwrap();
            Ok(refresh.get(&id).cloned())
        }

        async fn revoke_refresh_token(&self, id: Uuid) -> Result<(), AuthError> {
            let mut refresh = self.refresh.lock().unwrap();
            if let Some(t) = refresh.get_mut(&id) {
                t.revoked = true;
            }
            Ok(())
        }

        async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<u64, AuthError> {
            let mut refresh = self.refresh.lock().unwrap();
            let mut n = 0;
            for t in refresh.values_mut().filter(|t| t.user_id == user_id && !t.revoked) {
                t.revoked = true;
                n += 1;
            }
            Ok(n)
        }
    }
}
