//! PUT /api/tasks/{id}/status — guarded status transitions.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::{AppState, RestError};
use crate::task::domain::{TaskId, TaskStatus};
use crate::task::ports::TaskRepository;
use crate::task::services::UpdateStatusRequest;

/// Request header carrying the caller's role indicator.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Role value granting elevated privilege.
const ADMIN_ROLE: &str = "admin";

/// Request body for a status update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusBody {
    /// Requested status; absence is rejected by the transition guard.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response payload for a committed status update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusResponse {
    /// Always `true` for a committed update.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Identifier of the updated task.
    pub task_id: TaskId,
    /// Status the task now holds.
    pub new_status: TaskStatus,
}

/// Validates and commits a requested status change.
///
/// Privilege is asserted by the surrounding deployment through the
/// `X-User-Role` header; this layer only translates it into the boolean
/// capability the transition guard expects.
pub async fn update_status<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<UpdateStatusResponse>, RestError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let is_privileged = headers
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|role| role == ADMIN_ROLE);

    let request = UpdateStatusRequest::new(TaskId::from_uuid(id), body.status, is_privileged);
    let updated = state.transitions().update_status(request).await?;

    let new_status = updated.status();
    Ok(Json(UpdateStatusResponse {
        success: true,
        message: format!("task status updated to {new_status}"),
        task_id: updated.id(),
        new_status,
    }))
}
