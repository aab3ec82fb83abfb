use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::errors::optional_max_len;
use models::user::{normalize_email, validate_email, validate_name};

use super::domain::{AuthSession, AuthUser, LoginInput, NewAccount, RegisterInput, SocialLoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::social::{ClaimedIdentity, SocialProvider, SocialTokenVerifier};
use super::token::{Claims, TokenIssuer};

const MIN_PASSWORD_LEN: usize = 6;
const REFRESH_SECRET_LEN: usize = 48;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub password_algorithm: String,
    pub refresh_ttl: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { password_algorithm: "argon2".into(), refresh_ttl: Duration::days(30) }
    }
}

impl AuthSettings {
    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self { refresh_ttl: Duration::days(cfg.refresh_ttl_days), ..Self::default() }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: Arc<dyn TokenIssuer>,
    social: Arc<dyn SocialTokenVerifier>,
    cfg: AuthSettings,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<dyn TokenIssuer>, social: Arc<dyn SocialTokenVerifier>, cfg: AuthSettings) -> Self {
        Self { repo, tokens, social, cfg }
    }

    /// Register a new user with a hashed password and sign them in.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, AuthSettings, JwtTokenIssuer};
    /// use service::auth::domain::RegisterInput;
    /// use service::auth::repository::mock::MockAuthRepository;
    /// use service::auth::social::ClaimedEmailVerifier;
    /// let tokens = Arc::new(JwtTokenIssuer::new("doc-secret-0123456789", "iss", "aud", chrono::Duration::days(7)));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), tokens, Arc::new(ClaimedEmailVerifier), AuthSettings::default());
    /// let input = RegisterInput {
    ///     first_name: "Jo".into(), last_name: "Reyes".into(), email: "jo@example.com".into(),
    ///     password: "secret1".into(), zip_code: None, how_did_you_hear: None,
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "jo@example.com");
    /// assert!(!session.refresh_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, mut input: RegisterInput) -> Result<AuthSession, AuthError> {
        input.email = normalize_email(&input.email);
        validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        validate_name("first_name", &input.first_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        validate_name("last_name", &input.last_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        optional_max_len("zip_code", input.zip_code.as_deref(), 10).map_err(|e| AuthError::Validation(e.to_string()))?;
        optional_max_len("how_did_you_hear", input.how_did_you_hear.as_deref(), 500)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = hash_secret(&input.password)?;
        let account = NewAccount {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            zip_code: input.zip_code,
            how_did_you_hear: input.how_did_you_hear,
        };
        let user = self.repo.create_account(account, Some((hash, self.cfg.password_algorithm.clone()))).await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        self.issue_session(user).await
    }

    /// Authenticate with email and password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_secret(&input.password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }

        info!(user_id = %user.id, "user_logged_in");
        self.issue_session(user).await
    }

    /// Sign in through a social provider, creating the account on first use.
    #[instrument(skip(self, input), fields(provider = %input.provider))]
    pub async fn social_login(&self, input: SocialLoginInput) -> Result<AuthSession, AuthError> {
        let provider = SocialProvider::parse(&input.provider)?;
        let claimed = ClaimedIdentity { email: input.email, first_name: input.first_name, last_name: input.last_name };
        let mut identity = self.social.verify(provider, &input.token, claimed).await?;
        identity.email = normalize_email(&identity.email);
        validate_email(&identity.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = match self.repo.find_user_by_email(&identity.email).await? {
            Some(u) => u,
            None => {
                let first_name = identity
                    .first_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| email_local_part(&identity.email));
                let account = NewAccount {
                    email: identity.email.clone(),
                    first_name,
                    last_name: identity.last_name.unwrap_or_default(),
                    ..Default::default()
                };
                let created = self.repo.create_account(account, None).await?;
                info!(user_id = %created.id, provider = provider.as_str(), "user_registered_social");
                created
            }
        };
        self.issue_session(user).await
    }

    /// Exchange a refresh token for a new session. The presented token is
    /// revoked; reusing it fails.
    #[instrument(skip(self, raw))]
    pub async fn refresh(&self, raw: &str) -> Result<AuthSession, AuthError> {
        let (id, secret) = split_refresh_token(raw)?;
        let stored = self.repo.find_refresh_token(id).await?.ok_or(AuthError::InvalidToken)?;
        if stored.revoked || stored.expires_at <= Utc::now() {
            return Err(AuthError::InvalidToken);
        }
        if !verify_secret(secret, &stored.secret_hash)? {
            return Err(AuthError::InvalidToken);
        }
        self.repo.revoke_refresh_token(stored.id).await?;
        let user = self.repo.find_user(stored.user_id).await?.ok_or(AuthError::InvalidToken)?;
        info!(user_id = %user.id, "refresh_token_rotated");
        self.issue_session(user).await
    }

    /// Whether `token` is a currently valid access token.
    pub fn validate_token(&self, token: &str) -> bool {
        self.tokens.verify(token).is_ok()
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    /// Revoke every refresh token of the user.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Uuid) -> Result<u64, AuthError> {
        let revoked = self.repo.revoke_user_refresh_tokens(user_id).await?;
        info!(user_id = %user_id, revoked, "user_logged_out");
        Ok(revoked)
    }

    async fn issue_session(&self, user: AuthUser) -> Result<AuthSession, AuthError> {
        let access = self.tokens.issue(&user)?;
        let id = Uuid::new_v4();
        let secret: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(REFRESH_SECRET_LEN)
            .map(char::from)
            .collect();
        let expires_at = (Utc::now() + self.cfg.refresh_ttl).into();
        self.repo.store_refresh_token(id, user.id, hash_secret(&secret)?, expires_at).await?;
        Ok(AuthSession {
            token: access.token,
            refresh_token: format!("{id}.{secret}"),
            expiration: access.expires_at,
            user,
        })
    }
}

fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

fn verify_secret(secret: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}

fn split_refresh_token(raw: &str) -> Result<(Uuid, &str), AuthError> {
    let (id, secret) = raw.split_once('.').ok_or(AuthError::InvalidToken)?;
    let id = Uuid::parse_str(id).map_err(|_| AuthError::InvalidToken)?;
    if secret.is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok((id, secret))
}

fn email_local_part(email: &str) -> String {
    email.split('@').next().unwrap_or_default().chars().take(50).collect()
}
