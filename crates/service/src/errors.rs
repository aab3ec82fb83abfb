use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }

    /// Rewrites a store-level conflict (constraint violation) with a
    /// caller-facing message, leaving other errors untouched.
    pub fn conflict_as(self, message: &str) -> Self {
        match self {
            ServiceError::Conflict(_) => ServiceError::Conflict(message.to_string()),
            other => other,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Conflict(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        ModelError::from(e).into()
    }
}
