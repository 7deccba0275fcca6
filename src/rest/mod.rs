//! REST surface for the task lifecycle service.
//!
//! Thin glue over the task services: request parsing, the role-header
//! privilege translation, and the rejection-to-status-code mapping live
//! here; every business rule lives in [`crate::task`].
//!
//! Endpoints:
//!   POST /api/mark-overdue
//!   PUT  /api/tasks/{id}/status
//!   GET  /api/overdue-tasks
//!   GET  /api/my-tasks?assignee=…
//!   GET  /api/stats
//!   GET  /api/health

mod error;
pub mod routes;

pub use error::RestError;

use axum::Router;
use axum::routing::{get, post, put};
use mockable::Clock;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::task::ports::TaskRepository;
use crate::task::services::{OverdueSweeper, TaskTransitionService};

/// Shared handler state: the task services over one repository.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    inner: Arc<AppStateInner<R, C>>,
}

struct AppStateInner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    transitions: TaskTransitionService<R>,
    sweeper: OverdueSweeper<R, C>,
    repository: Arc<R>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Builds handler state over a repository and a clock.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        let transitions = TaskTransitionService::new(Arc::clone(&repository));
        let sweeper = OverdueSweeper::new(Arc::clone(&repository), clock);
        Self {
            inner: Arc::new(AppStateInner {
                transitions,
                sweeper,
                repository,
            }),
        }
    }

    /// Returns the transition service.
    #[must_use]
    pub fn transitions(&self) -> &TaskTransitionService<R> {
        &self.inner.transitions
    }

    /// Returns the overdue sweeper.
    #[must_use]
    pub fn sweeper(&self) -> &OverdueSweeper<R, C> {
        &self.inner.sweeper
    }

    /// Returns the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<R> {
        &self.inner.repository
    }
}

/// Builds the service router over the given state.
#[must_use]
pub fn build_router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/mark-overdue", post(routes::sweep::mark_overdue))
        .route("/api/tasks/{id}/status", put(routes::tasks::update_status))
        .route("/api/overdue-tasks", get(routes::reports::overdue_tasks))
        .route("/api/my-tasks", get(routes::reports::my_tasks))
        .route("/api/stats", get(routes::reports::stats))
        .with_state(state)
}

/// Binds the listener and serves the router until the process exits.
///
/// # Errors
///
/// Returns an [`std::io::Error`] when the address cannot be bound or the
/// accept loop fails.
pub async fn serve<R, C>(state: AppState<R, C>, addr: SocketAddr) -> std::io::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let router = build_router(state);
    info!("REST API listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}
