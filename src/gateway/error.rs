use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::auth::error::AuthError;

/// Failures a resource gateway translates into the inbound response.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The cloud API answered outside the accepted statuses for the
    /// route; status and body are relayed unchanged.
    #[error("upstream error ({status})")]
    Upstream { status: u16, body: String },

    /// The cloud API could not be reached.
    #[error("cannot reach cloud API: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            GatewayError::Auth(AuthError::UpstreamRejected { status, .. }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Failed to authenticate with the cloud identity endpoint".to_string(),
            ),
            GatewayError::Auth(err @ AuthError::MalformedResponse { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            GatewayError::Auth(err @ AuthError::Connectivity { .. }) => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            GatewayError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            ),
            GatewayError::Transport(reason) => (
                StatusCode::BAD_GATEWAY,
                format!("Cannot connect to cloud API: {reason}"),
            ),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
