use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Proxy-level failures. Every variant leaves the server as a JSON envelope
/// `{ "error": "..." }` with the mapped status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Failed to fetch benefits")]
    BenefitsUnavailable,

    #[error("Failed to fetch user details")]
    UserUnavailable,

    #[error("Server responded with non-JSON data ({status})")]
    NonJsonUpstream { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingEmail => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
