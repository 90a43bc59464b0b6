//! Driving port for login and password-reset use-cases.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, PasswordReset};

use super::ProvisionedAccount;

/// Domain use-case port for authentication flows.
#[async_trait]
pub trait AuthFlow: Send + Sync {
    /// Validate credentials and return the authenticated account.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<ProvisionedAccount, Error>;

    /// Trigger a password-reset e-mail for `email`.
    ///
    /// Succeeds whether or not the address is registered so the endpoint
    /// cannot be used to enumerate accounts.
    async fn request_password_reset(&self, email: &str) -> Result<(), Error>;

    /// Exchange a reset token for a new password.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), Error>;
}
