//! PostgreSQL-backed `RegistrationDirectory` implementation using Diesel ORM.
//!
//! A thin read-only adapter: it translates between Diesel rows and the
//! domain's directory records. No business logic resides here.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::OrganizationSlug;
use crate::domain::ports::{
    DirectoryError, OrganizationRecord, RegistrationDirectory, UserRecord,
};

use super::models::{OrganizationLookupRow, UserLookupRow};
use super::pool::{DbPool, PoolError};
use super::schema::{organizations, users};

/// Diesel-backed implementation of the `RegistrationDirectory` port.
#[derive(Clone)]
pub struct DieselRegistrationDirectory {
    pool: DbPool,
}

impl DieselRegistrationDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain directory errors.
fn map_pool_error(error: PoolError) -> DirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DirectoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain directory errors.
fn map_diesel_error(error: diesel::result::Error) -> DirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::QueryBuilderError(_) => DirectoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DirectoryError::connection("database connection error")
        }
        _ => DirectoryError::query("database error"),
    }
}

fn row_to_organization(row: OrganizationLookupRow) -> Result<OrganizationRecord, DirectoryError> {
    let slug = OrganizationSlug::from_stored(row.slug)
        .ok_or_else(|| DirectoryError::query("stored organization slug is malformed"))?;
    Ok(OrganizationRecord {
        id: row.id,
        name: row.name,
        slug,
    })
}

#[async_trait]
impl RegistrationDirectory for DieselRegistrationDirectory {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserLookupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| UserRecord {
            id: row.id,
            email: row.email,
        }))
    }

    async fn find_organization_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<OrganizationRecord>, DirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = organizations::table
            .filter(organizations::slug.eq(slug.as_ref()))
            .select(OrganizationLookupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_organization).transpose()
    }
}
