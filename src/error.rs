use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_QUERY_MESSAGE: &str = "Query parameter is required";
pub const QUERY_TOO_SHORT_MESSAGE: &str = "Your query is too short. Minimum 4 characters required.";
pub const NOTHING_FOUND_MESSAGE: &str = "Nothing Found";
pub const NOTHING_FOUND_DETAILS: &str = "The API response did not contain the expected fields.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Every way a proxied search can fail. Each variant maps to one JSON error
/// envelope; nothing escapes the handler as a panic.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("query parameter missing")]
    MissingQuery,

    /// The upstream answered with a non-success status. The message sent to
    /// the client is a fixed guess and does not reflect the real cause.
    #[error("upstream responded with {0}")]
    Upstream(StatusCode),

    #[error("upstream response lacks lines/count")]
    NothingFound,

    #[error("unexpected failure: {0}")]
    Unexpected(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingQuery => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(status) => *status,
            ProxyError::NothingFound | ProxyError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::MissingQuery => json!({ "error": MISSING_QUERY_MESSAGE }),
            ProxyError::Upstream(_) => json!({ "error": QUERY_TOO_SHORT_MESSAGE }),
            ProxyError::NothingFound => json!({
                "error": NOTHING_FOUND_MESSAGE,
                "details": NOTHING_FOUND_DETAILS,
            }),
            ProxyError::Unexpected(_) => json!({ "error": INTERNAL_ERROR_MESSAGE }),
        };
        (self.status(), Json(body)).into_response()
    }
}
