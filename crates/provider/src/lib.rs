//! # Prism Provider Crate
//!
//! Providers resolve external data into domain-shaped outputs. They are
//! the only components in the core that touch a data source, and they
//! translate every lower-level failure into the shared error taxonomy
//! before it reaches the service layer.
//!
//! ## Architectural Principles
//!
//! - **One seam:** All data access goes through the [`RecordStore`]
//!   trait. The Postgres repository implements it for production; the
//!   [`MemoryStore`] implements it for tests and the dev `--memory`
//!   mode.
//! - **Classify or wrap:** A provider surfaces `NotFound` and
//!   `Validation` untouched and wraps anything else into the `Provider`
//!   kind, always attaching the identifier that was being looked up.
//!
//! ## Public API
//!
//! - `RecordStore`: the async data-access seam.
//! - `RecordProvider` / `ProviderInput` / `ProviderOutput`: single and
//!   ordered-batch record resolution.
//! - `AggregateProvider` / `AggregateReport`: table-wide statistics.
//! - `MemoryStore`: the in-memory `RecordStore` implementation.

pub mod aggregate;
pub mod memory;
pub mod record;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{AggregateProvider, AggregateReport};
pub use memory::MemoryStore;
pub use record::{ProviderInput, ProviderOutput, RecordProvider};
pub use store::RecordStore;
