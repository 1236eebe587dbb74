//! Flashcard study backend.
//!
//! The [`domain`] owns selection, progress and statistics rules behind port
//! traits; [`inbound`] exposes them over HTTP and [`outbound`] provides the
//! PostgreSQL, in-memory and CSV adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
