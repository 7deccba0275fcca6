//! Taskwarden server daemon.
//!
//! Serves the task lifecycle REST API over a `PostgreSQL` store. The
//! overdue sweep is exposed as an endpoint for a cron-equivalent
//! trigger; the daemon owns no background tasks of its own.

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use taskwarden::rest::{self, AppState};
use taskwarden::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(
    name = "taskwardend",
    about = "Taskwarden — task lifecycle tracking daemon",
    version
)]
struct Args {
    /// Bind address for the REST API
    #[arg(long, env = "TASKWARDEN_BIND", default_value = "127.0.0.1:4320")]
    bind: SocketAddr,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, env = "TASKWARDEN_LOG", default_value = "info")]
    log: String,
}

fn init_tracing(filter: &str) -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

fn build_pool(database_url: &str) -> Result<TaskPgPool, BoxError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().build(manager)?)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    init_tracing(&args.log)?;

    let pool = build_pool(&args.database_url)?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let state = AppState::new(repository, Arc::new(DefaultClock));

    info!(bind = %args.bind, "starting taskwardend");
    rest::serve(state, args.bind).await?;
    Ok(())
}
