//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the identity provider's database exactly.
//! The unique indexes on `users.email` and `organizations.slug` are the
//! authoritative uniqueness guard; the registration pre-checks are only an
//! optimization over them.

diesel::table! {
    /// Account records owned by the identity service.
    ///
    /// The backend only reads this table (existence check by e-mail); the
    /// identity service owns the full lifecycle and the remaining columns.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// User's full name.
        name -> Varchar,
        /// E-mail address; carries a unique index.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organization records created through the identity service.
    organizations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name as registered.
        name -> Varchar,
        /// URL-safe key; carries a unique index.
        slug -> Varchar,
        /// Account that owns the organization.
        owner_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(organizations -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(organizations, users);
