//! Access-token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{AccessToken, AuthUser};
use super::errors::AuthError;

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// Capability to mint and check access tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthUser) -> Result<AccessToken, AuthError>;
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 JWTs bound to an issuer and audience.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str, issuer: &str, audience: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl,
        }
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(&cfg.jwt_secret, &cfg.issuer, &cfg.audience, Duration::hours(cfg.token_ttl_hours))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &AuthUser) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.full_name(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(AccessToken { token, expires_at: expires_at.into() })
    }

    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|_| AuthError::InvalidToken)?;
        Ok(data.claims)
    }
}
