//! Orchestration services for the overdue sweep and status transitions.

mod sweeper;
mod transition;

pub use sweeper::{OverdueSweeper, SweepError, SweepResult};
pub use transition::{
    TaskTransitionError, TaskTransitionResult, TaskTransitionService, UpdateStatusRequest,
};
