//! REST error envelope and status-code mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::task::ports::TaskRepositoryError;
use crate::task::services::{SweepError, TaskTransitionError};
use crate::task::domain::TransitionRejection;

/// Error response carrying the HTTP status and a user-facing message.
///
/// Serialized as `{"success": false, "message": …}`, matching the
/// success envelopes of the task endpoints.
#[derive(Debug, Clone)]
pub struct RestError {
    status: StatusCode,
    message: String,
}

impl RestError {
    /// Creates an error response.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<TaskRepositoryError> for RestError {
    fn from(err: TaskRepositoryError) -> Self {
        let status = match err {
            TaskRepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::StatusConflict { .. } => {
                StatusCode::CONFLICT
            }
            TaskRepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, err.to_string())
    }
}

impl From<TaskTransitionError> for RestError {
    fn from(err: TaskTransitionError) -> Self {
        match err {
            TaskTransitionError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            TaskTransitionError::Rejected(reason) => {
                let status = match reason {
                    TransitionRejection::MissingStatus => StatusCode::BAD_REQUEST,
                    TransitionRejection::InvalidBackwardFromOverdue => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    TransitionRejection::RequiresPrivilegeToClose => StatusCode::FORBIDDEN,
                };
                Self::new(status, reason.to_string())
            }
            TaskTransitionError::UnknownStatus(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            TaskTransitionError::OverdueNotRequestable => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            TaskTransitionError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<SweepError> for RestError {
    fn from(err: SweepError) -> Self {
        match err {
            SweepError::Repository(repo_err) => repo_err.into(),
        }
    }
}
