//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for the read-only lookups this adapter performs.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{organizations, users};

/// Row struct for the e-mail existence lookup against the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserLookupRow {
    pub id: Uuid,
    pub email: String,
}

/// Row struct for the slug existence lookup against the organizations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationLookupRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}
