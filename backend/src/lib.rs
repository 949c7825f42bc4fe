//! Claim ledger backend for the startup benefits marketplace.
//!
//! The crate follows a hexagonal layout: domain entities and services live
//! under [`domain`] behind driving and driven ports, [`inbound`] adapts HTTP
//! requests onto those ports, and [`outbound`] implements the driven ports
//! against PostgreSQL and the identity provider.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{Trace, TraceId};
