//! Registration backend library.
//!
//! The crate follows a hexagonal layout: `domain` holds the registration
//! and authentication logic behind driving/driven ports, `inbound` exposes
//! the REST adapter, and `outbound` implements the driven ports against
//! PostgreSQL and the hosted identity service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::{Trace, TraceId};
