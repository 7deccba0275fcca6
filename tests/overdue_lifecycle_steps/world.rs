//! Shared world state for overdue lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{OverdueSweeper, TaskTransitionError, TaskTransitionService},
};

/// Repository type used by the BDD world.
pub type TestRepo = InMemoryTaskRepository<DefaultClock>;

/// Scenario world for overdue lifecycle behaviour tests.
pub struct OverdueLifecycleWorld {
    pub repository: Arc<TestRepo>,
    pub sweeper: OverdueSweeper<TestRepo, DefaultClock>,
    pub transitions: TaskTransitionService<TestRepo>,
    pub task: Option<Task>,
    pub last_sweep_count: Option<u64>,
    pub last_transition_result: Option<Result<Task, TaskTransitionError>>,
}

impl OverdueLifecycleWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let sweeper = OverdueSweeper::new(Arc::clone(&repository), Arc::new(DefaultClock));
        let transitions = TaskTransitionService::new(Arc::clone(&repository));

        Self {
            repository,
            sweeper,
            transitions,
            task: None,
            last_sweep_count: None,
            last_transition_result: None,
        }
    }
}

impl Default for OverdueLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OverdueLifecycleWorld {
    OverdueLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
