//! Outbound (driven) adapters.
//!
//! Concrete implementations of the domain's driven ports: PostgreSQL
//! lookups behind the directory port and the identity provider's REST API
//! behind the identity port.

pub mod identity;
pub mod persistence;
