//! # Prism Core Types
//!
//! This crate defines the shared vocabulary of the Prism analysis
//! service. Every other crate in the workspace speaks in these types.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate has no knowledge of databases, HTTP, or
//!   computation strategies. It holds pure data definitions only.
//! - **Single Error Taxonomy:** All domain failures are expressed as a
//!   [`DomainError`], a closed set of kinds each carrying a message and
//!   a structured detail map. Higher layers classify failures by
//!   [`ErrorKind`] instead of matching on strings.
//! - **Uniform Envelope:** Orchestration calls return an [`Outcome`],
//!   never a raw error, so the transport boundary has exactly one shape
//!   to unwrap.
//!
//! ## Public API
//!
//! - `AnalysisKind`: the closed selector for computation strategies.
//! - `DomainError` / `ErrorKind`: the failure taxonomy.
//! - `Outcome`: the success/failure envelope.
//! - `Identity`: the optional caller identity threaded for attribution.

pub mod enums;
pub mod error;
pub mod outcome;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::AnalysisKind;
pub use error::{DomainError, ErrorDetails, ErrorKind};
pub use outcome::Outcome;
pub use structs::Identity;
