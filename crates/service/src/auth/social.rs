//! Social-provider token verification.

use async_trait::async_trait;
use tracing::warn;

use super::errors::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            other => Err(AuthError::Validation(format!("unsupported provider: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
        }
    }
}

/// What the client says about itself alongside the provider token.
#[derive(Debug, Clone, Default)]
pub struct ClaimedIdentity {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Identity confirmed for a provider token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[async_trait]
pub trait SocialTokenVerifier: Send + Sync {
    async fn verify(&self, provider: SocialProvider, token: &str, claimed: ClaimedIdentity) -> Result<VerifiedIdentity, AuthError>;
}

/// Accepts the client's claimed email without contacting the provider.
///
/// Only suitable until a real provider integration is wired in; every use is
/// logged at WARN.
#[derive(Debug, Default, Clone)]
pub struct ClaimedEmailVerifier;

#[async_trait]
impl SocialTokenVerifier for ClaimedEmailVerifier {
    async fn verify(&self, provider: SocialProvider, token: &str, claimed: ClaimedIdentity) -> Result<VerifiedIdentity, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::Validation("provider token is required".into()));
        }
        let email = claimed
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AuthError::Validation("email is required for social login".into()))?;
        warn!(provider = provider.as_str(), email = %email, "social_token_not_verified");
        Ok(VerifiedIdentity { email, first_name: claimed.first_name, last_name: claimed.last_name })
    }
}
