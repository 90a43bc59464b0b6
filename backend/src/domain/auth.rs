//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::registration::{PASSWORD_MIN, is_valid_email};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// E-mail was missing or not syntactically valid.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and syntactically valid.
/// - `password` is non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("joshua@gartmeier.dev", "hunter22").unwrap();
/// assert_eq!(creds.email(), "joshua@gartmeier.dev");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if !is_valid_email(normalized) {
            return Err(LoginValidationError::InvalidEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// E-mail string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a password reset payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetValidationError {
    /// Token was missing or blank once trimmed.
    EmptyToken,
    /// Replacement password fails the minimum-length rule.
    PasswordTooShort,
}

impl fmt::Display for PasswordResetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "reset token must not be empty"),
            Self::PasswordTooShort => {
                write!(f, "password must be at least {PASSWORD_MIN} characters")
            }
        }
    }
}

impl std::error::Error for PasswordResetValidationError {}

/// Validated password-reset request.
///
/// ## Invariants
/// - `token` is trimmed and non-empty; its authenticity is the identity
///   service's concern.
/// - `new_password` satisfies the same minimum-length rule as registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    token: String,
    new_password: Zeroizing<String>,
}

impl PasswordReset {
    /// Construct a reset request from raw token/password inputs.
    pub fn try_from_parts(
        token: &str,
        new_password: &str,
    ) -> Result<Self, PasswordResetValidationError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PasswordResetValidationError::EmptyToken);
        }

        if new_password.chars().count() < PASSWORD_MIN {
            return Err(PasswordResetValidationError::PasswordTooShort);
        }

        Ok(Self {
            token: token.to_owned(),
            new_password: Zeroizing::new(new_password.to_owned()),
        })
    }

    /// Opaque single-use token issued by the identity service.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Replacement password.
    pub fn new_password(&self) -> &str {
        self.new_password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("joshua@gartmeier.dev", "hunter22", None)]
    #[case("  joshua@gartmeier.dev  ", "hunter22", None)]
    #[case("not-an-email", "hunter22", Some(LoginValidationError::InvalidEmail))]
    #[case("joshua@gartmeier.dev", "", Some(LoginValidationError::EmptyPassword))]
    fn login_credentials_validation(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected_err: Option<LoginValidationError>,
    ) {
        let result = LoginCredentials::try_from_parts(email, password);
        match expected_err {
            None => {
                let creds = result.expect("valid credentials");
                assert_eq!(creds.email(), email.trim());
                assert_eq!(creds.password(), password);
            }
            Some(err) => assert_eq!(result.expect_err("invalid credentials"), err),
        }
    }

    #[rstest]
    #[case("tok-123", "horseflyhorsefly", None)]
    #[case("", "horseflyhorsefly", Some(PasswordResetValidationError::EmptyToken))]
    #[case("  ", "horseflyhorsefly", Some(PasswordResetValidationError::EmptyToken))]
    #[case("tok-123", "short", Some(PasswordResetValidationError::PasswordTooShort))]
    fn password_reset_validation(
        #[case] token: &str,
        #[case] password: &str,
        #[case] expected_err: Option<PasswordResetValidationError>,
    ) {
        let result = PasswordReset::try_from_parts(token, password);
        match expected_err {
            None => {
                let reset = result.expect("valid reset request");
                assert_eq!(reset.token(), token.trim());
                assert_eq!(reset.new_password(), password);
            }
            Some(err) => assert_eq!(result.expect_err("invalid reset request"), err),
        }
    }
}
