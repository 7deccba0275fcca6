//! Read-only listing and aggregate reporting endpoints.

use axum::Json;
use axum::extract::{Query, State};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::super::{AppState, RestError};
use crate::task::domain::{Task, TaskStatus, UserId};
use crate::task::ports::TaskRepository;

/// Response payload for task listings.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    /// Always `true` for a completed listing.
    pub success: bool,
    /// The matching tasks.
    pub data: Vec<Task>,
}

/// GET /api/overdue-tasks — all tasks currently overdue.
pub async fn overdue_tasks<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<TaskListResponse>, RestError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let data = state
        .repository()
        .list_by_status(TaskStatus::Overdue)
        .await?;
    Ok(Json(TaskListResponse {
        success: true,
        data,
    }))
}

/// Query parameters for the assignee listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MyTasksQuery {
    /// Assignee whose tasks to list.
    pub assignee: Uuid,
}

/// GET /api/my-tasks?assignee=… — all tasks assigned to one user.
pub async fn my_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    Query(query): Query<MyTasksQuery>,
) -> Result<Json<TaskListResponse>, RestError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let data = state
        .repository()
        .list_by_assignee(UserId::from_uuid(query.assignee))
        .await?;
    Ok(Json(TaskListResponse {
        success: true,
        data,
    }))
}

/// GET /api/stats — task counts keyed by status.
pub async fn stats<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<Value>, RestError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let counts = state.repository().status_counts().await?;
    let mut data = Map::new();
    for (status, count) in counts {
        data.insert(status.as_str().to_owned(), Value::from(count));
    }
    Ok(Json(serde_json::json!({
        "success": true,
        "data": data,
    })))
}
