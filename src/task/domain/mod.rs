//! Domain model for task lifecycle tracking.
//!
//! The task domain models the four-status lifecycle (`TODO`, `WIP`,
//! `DONE`, and the derived `OVERDUE` side-state), the transition guard
//! that validates requested status changes, and the overdue selection
//! predicate, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod status;
mod task;
mod transition;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{ProjectId, TaskId, TaskTitle, UserId};
pub use status::{Priority, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task};
pub use transition::{TransitionOutcome, TransitionRejection, decide};
