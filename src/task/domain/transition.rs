//! Transition guard for requested task status changes.
//!
//! The guard is a pure decision function: it knows nothing about
//! persistence and the caller is responsible for committing an allowed
//! transition and for mapping each rejection to a response.

use super::TaskStatus;
use thiserror::Error;

/// Reasons a requested status change is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    /// No status was supplied with the request.
    #[error("status is required")]
    MissingStatus,
    /// Overdue tasks cannot be moved back to an open status.
    #[error("overdue tasks cannot be moved back to WIP or TODO")]
    InvalidBackwardFromOverdue,
    /// Closing an overdue task requires elevated privilege.
    #[error("only privileged callers can close overdue tasks")]
    RequiresPrivilegeToClose,
}

/// Outcome of a transition decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition is permitted; commit the new status.
    Allowed(TaskStatus),
    /// The transition is rejected; surface the reason to the caller.
    Rejected(TransitionRejection),
}

impl TransitionOutcome {
    /// Returns `true` when the outcome permits the transition.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Decides whether a requested status change is permitted.
///
/// Rules are evaluated in order, first match wins:
///
/// 1. An absent `requested` status is rejected as missing.
/// 2. When the current status is `Overdue`, moving back to `Todo` or
///    `Wip` is rejected outright, and moving to `Done` is rejected
///    unless the caller is privileged.
/// 3. Every other combination is allowed, including no-op transitions.
///
/// `requested` is already a parsed enum member: unrecognized status
/// strings are rejected as malformed input before this function is
/// invoked (see the transition service).
#[must_use]
pub const fn decide(
    current: TaskStatus,
    requested: Option<TaskStatus>,
    is_privileged: bool,
) -> TransitionOutcome {
    let requested = match requested {
        Some(status) => status,
        None => return TransitionOutcome::Rejected(TransitionRejection::MissingStatus),
    };

    if matches!(current, TaskStatus::Overdue) {
        if matches!(requested, TaskStatus::Todo | TaskStatus::Wip) {
            return TransitionOutcome::Rejected(TransitionRejection::InvalidBackwardFromOverdue);
        }
        if matches!(requested, TaskStatus::Done) && !is_privileged {
            return TransitionOutcome::Rejected(TransitionRejection::RequiresPrivilegeToClose);
        }
    }

    TransitionOutcome::Allowed(requested)
}
