//! Driven port for read-only uniqueness lookups against the persistent store.
//!
//! Registration consults this port before touching the identity service.
//! The lookups are a soft pre-check: the store's unique indexes on e-mail
//! and slug remain the authoritative guard against check-then-act races.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::OrganizationSlug;

/// Persistence errors raised by directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Store connection could not be established.
    #[error("directory connection failed: {message}")]
    Connection { message: String },
    /// Lookup failed during execution.
    #[error("directory query failed: {message}")]
    Query { message: String },
}

impl DirectoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Existing account surfaced by an e-mail lookup.
///
/// The identity service owns the account's full lifecycle; this record only
/// carries what the registration flow needs to report a collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Stable account identifier.
    pub id: Uuid,
    /// Registered e-mail address.
    pub email: String,
}

/// Existing organization surfaced by a slug lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    /// Stable organization identifier.
    pub id: Uuid,
    /// Display name as originally registered.
    pub name: String,
    /// Unique URL-safe key.
    pub slug: OrganizationSlug,
}

/// Read-only uniqueness lookups consumed by the registration orchestrator.
#[async_trait]
pub trait RegistrationDirectory: Send + Sync {
    /// Look up an account by e-mail address.
    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<UserRecord>, DirectoryError>;

    /// Look up an organization by slug.
    async fn find_organization_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<OrganizationRecord>, DirectoryError>;
}
