//! # Prism Database Crate
//!
//! This crate acts as a high-level, application-specific interface to
//! the PostgreSQL database that backs the analysis domain.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the workspace sees a
//!   clean repository API and row structs, never query strings.
//! - **Asynchronous & Pooled:** All operations are asynchronous and run
//!   on a shared connection pool (`PgPool`); each request task borrows
//!   a pooled handle for the duration of its queries only.
//!
//! ## Public API
//!
//! - `connect`: establishes the connection pool from `DATABASE_URL`.
//! - `run_migrations`: applies the embedded migrations at startup.
//! - `DbRepository`: the high-level data access methods.
//! - `DbError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{AggregateRow, DbRepository, RecordRow};
