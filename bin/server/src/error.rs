//! HTTP error mapping for the song endpoints.
//!
//! Upstream failures keep their detail in the logs; the response body carries
//! only a user-safe message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use top_songs_ai::{LlmError, OutputError};

/// Errors surfaced by the song endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// The chat-completion provider failed or returned nothing usable.
    Upstream(LlmError),
    /// The provider's text did not decode into the expected record.
    MalformedOutput(OutputError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "upstream LLM error: {e}"),
            Self::MalformedOutput(e) => write!(f, "malformed model output: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        Self::Upstream(e)
    }
}

impl From<OutputError> for ApiError {
    fn from(e: OutputError) -> Self {
        Self::MalformedOutput(e)
    }
}

/// JSON error payload returned to callers.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "song endpoint failed");

        let message = match &self {
            ApiError::Upstream(LlmError::EmptyResponse) => "The model returned no answer",
            ApiError::Upstream(LlmError::Timeout) => "The model did not answer in time",
            ApiError::Upstream(_) => "The model provider is unavailable",
            ApiError::MalformedOutput(_) => "The model returned an unparseable answer",
        };

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let response = ApiError::Upstream(LlmError::EmptyResponse).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn malformed_output_is_user_safe() {
        let err = ApiError::MalformedOutput(OutputError::ParseFailed {
            reason: "expected value".to_string(),
            text: "secret raw model output".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
