//! Shared HTTP plumbing: response envelope, error mapping, validated JSON

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult};
use crate::shared::ids::parse_record_id;

pub use validated_json::ValidatedJson;

/// Standard API response envelope
///
/// Every endpoint answers with `{"success": .., "message": "..", "data": ..}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<Value> {
    pub fn error(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Successful handler output: status code plus envelope.
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn ok<T>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(message, data))))
}

pub fn created<T>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(message, data))))
}

/// An error rendered as a failed envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: Value::Object(Default::default()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Map a domain error. Store failures are reported under `context`
    /// with the underlying cause as `data`.
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::InvalidArgument(_) | DomainError::Conflict(_) => {
                Self::bad_request(err.to_string())
            }
            DomainError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            DomainError::Unauthorized(message) => Self::unauthorized(message),
            DomainError::Forbidden(message) => Self::new(StatusCode::FORBIDDEN, message),
            DomainError::Persistence(cause) => {
                error!(%cause, "{}", context);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.to_string(),
                    data: Value::String(cause),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::error(self.message, self.data))).into_response()
    }
}

/// Attach the failure message used when the store itself fails.
pub trait OrFail<T> {
    fn or_fail(self, context: &str) -> Result<T, ApiError>;
}

impl<T> OrFail<T> for DomainResult<T> {
    fn or_fail(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_domain(e, context))
    }
}

/// Parse a raw path segment into a record id before any store access.
pub fn record_id(entity: &str, raw: &str) -> Result<i32, ApiError> {
    parse_record_id(entity, raw).map_err(|e| ApiError::bad_request(e.to_string()))
}
