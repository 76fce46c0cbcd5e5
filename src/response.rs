use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::SubmissionFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// JSON body returned for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub result: Outcome,
    pub message: String,
}

impl ResponseEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            result: Outcome::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: Outcome::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == Outcome::Success
    }
}

impl From<SubmissionFailure> for ResponseEnvelope {
    fn from(failure: SubmissionFailure) -> Self {
        ResponseEnvelope::failure(failure.to_string())
    }
}

// Errors are reported in the body; the status is 200 either way.
impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
