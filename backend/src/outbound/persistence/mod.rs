//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the domain's
//! directory port backed by PostgreSQL via the Diesel ORM with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the directory only translates between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to the
//!   domain's `DirectoryError`.

mod diesel_registration_directory;
mod models;
mod pool;
mod schema;

pub use diesel_registration_directory::DieselRegistrationDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
