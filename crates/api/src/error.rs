//! Mapping of failures to HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use studio_common::StudioError;
use studio_triage::ErrorBody;
use tracing::{debug, error};

/// Every way a request to the studio API can fail.
#[derive(Debug)]
pub enum ApiError {
    /// A required field is missing or empty. Carries the client-facing message.
    Validation(String),

    /// The body is not valid JSON for the endpoint.
    MalformedBody,

    /// The body exceeds the configured size limit.
    PayloadTooLarge,

    /// The agent runtime failed. The cause is logged, never returned.
    Upstream(StudioError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::MalformedBody => "Invalid request body".into(),
            Self::PayloadTooLarge => "Request body too large".into(),
            Self::Upstream(_) => "Internal server error".into(),
        }
    }
}

impl From<StudioError> for ApiError {
    fn from(e: StudioError) -> Self {
        match e {
            StudioError::Validation(message) => Self::Validation(message),
            other => Self::Upstream(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::MalformedBody
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream(ref e) = self {
            error!(error = %e, "Triage agent error");
        }
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
