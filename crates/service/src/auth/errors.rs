use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user with this email already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("invalid email or password")]
    Unauthorized,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::InvalidToken => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => ServiceError::Validation(msg),
            AuthError::Conflict => ServiceError::Conflict(AuthError::Conflict.to_string()),
            AuthError::NotFound => ServiceError::not_found("user"),
            AuthError::Unauthorized | AuthError::InvalidToken => ServiceError::Unauthorized(e.to_string()),
            AuthError::Repository(msg) => ServiceError::Db(msg),
            AuthError::HashError(_) | AuthError::TokenError(_) => ServiceError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AuthError::Validation("x".into()).code(), 1001);
        assert_eq!(AuthError::Conflict.code(), 1002);
        assert_eq!(AuthError::Unauthorized.code(), 1004);
        assert_eq!(AuthError::InvalidToken.code(), 1005);
        assert_eq!(AuthError::Repository("x".into()).code(), 1200);
    }

    #[test]
    fn maps_into_service_errors() {
        let e: ServiceError = AuthError::Unauthorized.into();
        assert!(matches!(e, ServiceError::Unauthorized(m) if m == "invalid email or password"));
        let e: ServiceError = AuthError::Conflict.into();
        assert!(matches!(e, ServiceError::Conflict(_)));
        let e: ServiceError = AuthError::TokenError("bad key".into()).into();
        assert!(matches!(e, ServiceError::Internal(_)));
    }
}
