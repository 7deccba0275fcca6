//! POST /api/mark-overdue — runs the overdue sweep.
//!
//! Exposed to a cron-equivalent scheduling trigger; the sweep itself is
//! synchronous and stateless, so retry policy belongs to the caller.

use axum::Json;
use axum::extract::State;
use mockable::Clock;
use serde::Serialize;

use super::super::{AppState, RestError};
use crate::task::ports::TaskRepository;

/// Response payload for a completed sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    /// Always `true` for a completed sweep.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Number of tasks promoted to `OVERDUE`.
    pub count: u64,
}

/// Promotes every eligible task to `OVERDUE` and reports the count.
pub async fn mark_overdue<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<SweepResponse>, RestError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let count = state.sweeper().sweep().await?;
    Ok(Json(SweepResponse {
        success: true,
        message: format!("{count} task(s) marked as OVERDUE"),
        count,
    }))
}
