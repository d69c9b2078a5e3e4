/*
 * Responsibility
 * - Infrastructure failures that are NOT admission decisions (store down, upstream down, timeout)
 * - IntoResponse (HTTP status / JSON error body)
 *
 * Denials are never built here: they are `gate::Outcome` values rendered by `gate::emit`.
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::gate::AdmissionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication backend unavailable")]
    ServiceUnavailable,

    #[error("upstream unavailable")]
    BadGateway,

    #[error("request timed out")]
    GatewayTimeout,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            AppError::BadGateway => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            AppError::GatewayTimeout => (StatusCode::GATEWAY_TIMEOUT, "GATEWAY_TIMEOUT"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AdmissionError> for AppError {
    fn from(e: AdmissionError) -> Self {
        tracing::error!(error = %e, "admission decision could not be computed");
        AppError::ServiceUnavailable
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        tracing::error!(error = %e, "configuration error");
        AppError::Internal
    }
}
