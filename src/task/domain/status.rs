//! Task status and priority enumerations.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// `Overdue` is a derived side-state: it is only ever set by the overdue
/// sweep, never directly by a client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "TODO")]
    Todo,
    /// Work is in progress.
    #[serde(rename = "WIP")]
    Wip,
    /// Work is complete.
    #[serde(rename = "DONE")]
    Done,
    /// The due date passed before the task was completed.
    #[serde(rename = "OVERDUE")]
    Overdue,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Wip => "WIP",
            Self::Done => "DONE",
            Self::Overdue => "OVERDUE",
        }
    }

    /// Returns `true` for the statuses the overdue sweep must never touch.
    ///
    /// Tasks that are already `Done` or `Overdue` are excluded from the
    /// sweep's selection predicate.
    #[must_use]
    pub const fn is_sweep_exempt(self) -> bool {
        matches!(self, Self::Done | Self::Overdue)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "WIP" => Ok(Self::Wip),
            "DONE" => Ok(Self::Done),
            "OVERDUE" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority.
///
/// Carried and reported as plain metadata; neither the overdue sweep nor
/// the transition guard consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    #[serde(rename = "LOW")]
    Low,
    /// Medium priority.
    #[serde(rename = "MEDIUM")]
    Medium,
    /// High priority.
    #[serde(rename = "HIGH")]
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
