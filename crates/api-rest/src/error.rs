//! HTTP error mapping.

use api_shared::{AuthError, ErrorRes};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prestadores_core::{ProviderError, RecordId};

/// Error returned by every handler, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match &err {
            ProviderError::InvalidInput(_) | ProviderError::ReasonRequired { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProviderError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProviderError::LockPoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected request body");
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected query string");
        Self::bad_request(format!("invalid query string: {}", rejection.body_text()))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorRes { error: self.message })).into_response()
    }
}

/// Parses a numeric path segment, rejecting anything but a positive integer with `400`.
pub fn path_id(name: &str, raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).map_err(|err| {
        tracing::warn!(param = name, value = raw, "invalid path identifier");
        ApiError::bad_request(format!("invalid {name}: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_status_codes() {
        let cases = [
            (ProviderError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                ProviderError::ReasonRequired { status: "RECHAZADO" },
                StatusCode::BAD_REQUEST,
            ),
            (
                ProviderError::NotFound {
                    entity: "authorization",
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ProviderError::LockPoisoned("authorization"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn path_ids_must_be_positive_integers() {
        assert_eq!(path_id("id", "12001").unwrap().get(), 12001);
        for raw in ["0", "-4", "abc", ""] {
            assert_eq!(path_id("id", raw).unwrap_err().status(), StatusCode::BAD_REQUEST);
        }
    }
}
