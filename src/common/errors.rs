use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to callers of the info endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing \"url\" parameter")]
    MissingParameter,

    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Request timed out while fetching YouTube info")]
    ExtractionTimeout,

    #[error("{0}")]
    ExtractionFailure(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter | Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ExtractionTimeout | Self::ExtractionFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingParameter.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::ExtractionTimeout.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ExtractionFailure("Video unavailable".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_failure_message_is_passed_through() {
        let err = ApiError::ExtractionFailure("This video is private".into());
        assert_eq!(err.to_string(), "This video is private");
        assert_eq!(
            ApiError::ExtractionTimeout.to_string(),
            "Request timed out while fetching YouTube info"
        );
    }
}
