//! Task lifecycle tracking.
//!
//! Tasks move through `TODO`, `WIP`, and `DONE`, with an `OVERDUE`
//! side-state derived from due dates. The two operations with real
//! business rules are the overdue sweep (batch scan-and-promote) and the
//! transition guard (per-request decide-then-commit); everything around
//! them is thin glue. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
