use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failure talking to the remote timetable API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    /// Non-2xx status. `message` is the response body text.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Api(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::Validation(_) => StatusCode::BAD_REQUEST,
            ConsoleError::UnknownPanel(_) => StatusCode::NOT_FOUND,
            ConsoleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ConsoleError::Config(msg) => {
                error!("configuration error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
