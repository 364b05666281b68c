/*
 * Responsibility
 * - the error taxonomy shared by the login handler and the auth gate
 * - IntoResponse (HTTP status / JSON error body)
 * - the Display text of each variant is the message clients see
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid request")]
    InvalidRequestBody,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Missing auth token")]
    MissingToken,

    #[error("Invalid/Malformed auth token")]
    MalformedHeader,

    #[error("Malformed authentication token")]
    MalformedToken,

    #[error("Token is not valid.")]
    InvalidToken,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// Every authentication failure shares 403 so the status code does not
    /// reveal which check failed; only the message differs.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequestBody => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingToken
            | AppError::MalformedHeader
            | AppError::MalformedToken
            | AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.to_string());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_share_forbidden_status() {
        for err in [
            AppError::MissingToken,
            AppError::MalformedHeader,
            AppError::MalformedToken,
            AppError::InvalidToken,
        ] {
            assert_eq!(err.status(), StatusCode::FORBIDDEN, "{err:?}");
        }
        assert_eq!(
            AppError::InvalidRequestBody.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn error_body_uses_status_and_message() {
        let body = serde_json::to_value(ErrorResponse::new(AppError::MissingToken.to_string()))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "error", "message": "Missing auth token"})
        );
    }
}
