//! Taskwarden: task lifecycle tracking with overdue detection.
//!
//! This crate tracks tasks through a `TODO` → `WIP` → `DONE` lifecycle
//! with an `OVERDUE` side-state derived from due dates, and exposes
//! status transitions and aggregate reporting over HTTP.
//!
//! # Architecture
//!
//! Taskwarden follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task domain, overdue sweep, and transition guard
//! - [`rest`]: Thin HTTP glue over the task services

pub mod rest;
pub mod task;
