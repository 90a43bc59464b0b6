//! Driven port for the hosted identity service.
//!
//! The identity service owns credential storage, password hashing, session
//! token issuance, and verification/reset e-mail delivery. This port only
//! models the operations the backend drives and the structured error codes
//! it must translate into field-scoped messages.

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{LoginCredentials, OrganizationSlug, PasswordReset, RegistrationInput};

/// Machine-readable rejection codes exposed by the identity service.
///
/// Unknown codes are preserved verbatim so logs keep the original value
/// even when the orchestrator treats them as generic failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityErrorCode {
    /// An account with this e-mail already exists.
    UserAlreadyExists,
    /// An organization with this slug already exists.
    OrganizationAlreadyExists,
    /// Sign-in credentials were rejected.
    InvalidCredentials,
    /// Password-reset token is invalid or expired.
    InvalidToken,
    /// Any other code the service may emit.
    Other(String),
}

impl IdentityErrorCode {
    /// Parse a wire code string into a known variant.
    pub fn from_code(code: &str) -> Self {
        match code {
            "USER_ALREADY_EXISTS" => Self::UserAlreadyExists,
            "ORGANIZATION_ALREADY_EXISTS" => Self::OrganizationAlreadyExists,
            "INVALID_EMAIL_OR_PASSWORD" => Self::InvalidCredentials,
            "INVALID_TOKEN" => Self::InvalidToken,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire representation of the code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::OrganizationAlreadyExists => "ORGANIZATION_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_EMAIL_OR_PASSWORD",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Other(code) => code.as_str(),
        }
    }
}

impl fmt::Display for IdentityErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by identity service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The service processed the request and rejected it with a code.
    #[error("identity service rejected the request ({code}): {message}")]
    Rejected {
        code: IdentityErrorCode,
        message: String,
    },
    /// The service could not be reached or timed out.
    #[error("identity service transport failure: {message}")]
    Transport { message: String },
    /// The service answered with a payload the adapter could not decode.
    #[error("identity service returned an unreadable response: {message}")]
    Decode { message: String },
}

impl IdentityError {
    /// Create a rejection with a parsed code.
    pub fn rejected(code: IdentityErrorCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Request payload for account creation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Build an account request from validated registration input.
    pub fn from_registration(input: &RegistrationInput) -> Self {
        Self {
            name: input.name().to_owned(),
            email: input.email().to_owned(),
            password: Zeroizing::new(input.password().to_owned()),
        }
    }

    /// User's full name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// E-mail address to register.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password; the service performs the hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Account created (or authenticated) by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedAccount {
    /// Stable account identifier.
    pub id: Uuid,
    /// E-mail address as stored by the service.
    pub email: String,
}

/// Request payload for organization creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    /// Organization display name.
    pub name: String,
    /// Derived URL-safe key.
    pub slug: OrganizationSlug,
    /// Account that owns the organization.
    pub owner_id: Uuid,
}

/// Operations the backend drives against the identity service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a user credential; the service also sends the verification
    /// e-mail as a side effect.
    async fn create_account(&self, account: &NewAccount)
    -> Result<ProvisionedAccount, IdentityError>;

    /// Create an organization bound to its owner.
    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<(), IdentityError>;

    /// Validate credentials and return the authenticated account.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ProvisionedAccount, IdentityError>;

    /// Ask the service to e-mail a password-reset link.
    async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError>;

    /// Exchange a reset token for a new password.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), IdentityError>;
}
