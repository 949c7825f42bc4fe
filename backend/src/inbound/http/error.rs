//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`crate::domain::Error`] into Actix responses here. Internal failures are
//! redacted so storage detail never leaks to callers.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error as DomainError, ErrorCode};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Standard error envelope returned by HTTP handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Construct an API error from a domain failure, capturing any ambient
    /// trace identifier.
    pub fn from_domain(error: DomainError) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: error.details().cloned(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn redacted_message(&self) -> Option<&'static str> {
        match self.code {
            ErrorCode::InternalError => Some("Internal server error"),
            ErrorCode::ServiceUnavailable => Some("Service temporarily unavailable"),
            _ => None,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        ApiError::from_domain(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        if let Some(redacted_message) = self.redacted_message() {
            error!(
                code = ?self.code,
                message = %self.message,
                "request failed with redacted error"
            );
            let mut redacted = self.clone();
            redacted.message = redacted_message.to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::invalid_request("x"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("x"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::forbidden("x"), StatusCode::FORBIDDEN)]
    #[case(DomainError::not_found("x"), StatusCode::NOT_FOUND)]
    #[case(DomainError::conflict("x"), StatusCode::CONFLICT)]
    #[case(DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(DomainError::service_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE)]
    fn codes_map_to_statuses(#[case] error: DomainError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), status);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = ApiError::from(DomainError::internal("pool checkout failed: secret"));
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["message"], "Internal server error");
        assert!(value.get("details").is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_their_message() {
        let error = ApiError::from(DomainError::conflict("You have already claimed this deal"));
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["message"], "You have already claimed this deal");
        assert_eq!(value["code"], "conflict");
    }
}
