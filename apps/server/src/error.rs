//! # API Error Type
//!
//! Single error type for all handlers. Implements actix's `ResponseError`, so
//! handlers just return `Result<_, ApiError>` and every failure leaves the
//! server as `{"detail": "..."}` with the right status code.
//!
//! ## Status Mapping
//! ```text
//! Unauthorized        401   missing/invalid/expired token
//! Forbidden           403   authenticated but wrong role
//! NotFound            404   bill, inventory row, customer, user
//! BadRequest          400   validation, unknown vegetable, short stock
//! Conflict            409   duplicate username / bill number / mobile
//! Internal            500   everything else (details logged, not leaked)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use veggie_core::{CoreError, ValidationError};
use veggie_db::DbError;

/// What HTTP clients see.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    /// Message is logged; the client only sees a generic line.
    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            tracing::error!(%detail, "internal error");
        }
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            DbError::ForeignKeyViolation(_) | DbError::CheckViolation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            DbError::Core(core) => core.into(),
            DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) | DbError::Query(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidItem { .. } | CoreError::InsufficientStock { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            CoreError::BillNotFound(id) => ApiError::NotFound(format!("Bill not found: {id}")),
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::Internal(format!("password hashing failed: {err}"))
    }
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_error_maps_to_bad_request() {
        let err: ApiError = CoreError::InsufficientStock {
            name: "Tomato".into(),
            available_grams: 100,
            requested_grams: 500,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err: ApiError = DbError::UniqueViolation {
            constraint: "users_username_key".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_hides_detail_from_clients() {
        let err = ApiError::Internal("connection string leaked".into());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
