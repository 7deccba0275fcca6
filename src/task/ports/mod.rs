//! Port contracts for task infrastructure.

mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
