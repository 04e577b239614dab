//! Request-scoped pipeline errors and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use refract_query::QueryError;
use thiserror::Error;

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A failure in one stage of the request pipeline.
///
/// Each stage maps to a fixed status, so a caller can distinguish a bad
/// request (400), an unreachable backend (502), and a backend that
/// answered with a payload the transform rejected (500).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The inbound body was not a valid identifier request.
    #[error("invalid request body: {0}")]
    Decode(String),

    /// The forwarded request never produced a response.
    #[error("backend request failed: {0}")]
    Forward(String),

    /// The backend response body could not be read.
    #[error("failed to read backend response: {0}")]
    Receive(String),

    /// The transform failed against the backend payload.
    #[error(transparent)]
    Transform(#[from] QueryError),
}

impl PipelineError {
    /// The status this failure terminates the request with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Forward(_) | Self::Receive(_) => StatusCode::BAD_GATEWAY,
            Self::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::warn!(%status, error = %message, "request failed");
        } else {
            tracing::debug!(%status, error = %message, "request rejected");
        }
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_status_mapping() {
        assert_eq!(
            PipelineError::Decode("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PipelineError::Forward("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            PipelineError::Receive("cut off".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            PipelineError::Transform(QueryError::TooMuchData).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_parse_failure_is_500_not_502() {
        // A backend that answered with junk is a transform problem, not a
        // gateway problem.
        let parse = serde_json::from_slice::<serde_json::Value>(b"junk").unwrap_err();
        let err = PipelineError::Transform(QueryError::Parse(parse));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
