//! HTTP adapter for the hosted identity service.
//!
//! Implements the domain's `IdentityService` port against the provider's
//! REST API. Requests and responses pass through transport DTOs before any
//! domain type is constructed, so wire-format drift surfaces as decode
//! errors rather than silent misreads.

mod dto;
mod http_client;

pub use http_client::{HttpIdentityService, IdentityClientConfig};
