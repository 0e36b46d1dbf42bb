use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const POST_REQUIRED_MESSAGE: &str = "POST request required";
pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("POST request required")]
    PostRequired,

    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PostRequired | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the response body. Decoder details
    /// stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::PostRequired => POST_REQUIRED_MESSAGE,
            Self::InvalidBody(_) => INVALID_BODY_MESSAGE,
            Self::Config(_) | Self::Internal(_) => "Internal server error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.user_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
