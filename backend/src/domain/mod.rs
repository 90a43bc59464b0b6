//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed registration/authentication entities and
//! the use-case services over them. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `RegistrationForm` / `RegistrationOutcome` — the registration contract.
//! - `OrganizationSlug` — deterministic URL-safe organization key.
//! - `RegistrationService` / `AuthService` — use-case implementations
//!   behind the driving ports in [`ports`].

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod slug;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordReset, PasswordResetValidationError,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration::{
    FieldErrors, FieldName, RegistrationForm, RegistrationInput, RegistrationOutcome,
};
pub use self::registration_service::RegistrationService;
pub use self::slug::OrganizationSlug;
