use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Handler error: a service failure rendered as `{message, details?}`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn unauthorized(msg: &str) -> Self {
        Self(ServiceError::Unauthorized(msg.to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Db(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if e.code() >= 1100 {
            error!(code = e.code(), err = %e, "auth_failure");
        }
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            ServiceError::Validation(msg) => ErrorBody::new("Validation failed", Some(msg)),
            ServiceError::Conflict(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::Forbidden(msg) => {
                warn!(status = status.as_u16(), %msg, "request_rejected");
                ErrorBody::new(msg, None)
            }
            ServiceError::Db(msg) | ServiceError::Internal(msg) => {
                error!(status = status.as_u16(), err = %msg, "request_failed");
                ErrorBody::new(INTERNAL_MESSAGE, None)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn internal_details_are_not_echoed() {
        let resp = ApiError(ServiceError::Db("relation \"pet\" does not exist".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn wrong_password_maps_to_401() {
        let e: ApiError = AuthError::Unauthorized.into();
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
    }
}
