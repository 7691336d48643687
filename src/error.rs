use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Transport-level failures. Everything anticipated (missing tools, remote
/// AI errors, unsupported languages) is degraded into the normal result
/// payloads instead; only these reach the caller as HTTP errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("report error: {0}")]
    Report(String),
}

/// Failures of the remote completion call. The `Display` renderings are the
/// exact strings returned to callers inside `ai_review`; the adapter
/// flattens an `Err` into text rather than propagating it.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Error: OPENROUTER_API_KEY not set")]
    MissingKey,

    /// The endpoint answered with a non-success status; carries the body.
    #[error("AI Error: {0}")]
    Api(String),

    /// Transport failure, timeout, or an unreadable response.
    #[error("AI Review failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Failed(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Report(_) => "REPORT_ERROR",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details: None,
        })
    }
}
