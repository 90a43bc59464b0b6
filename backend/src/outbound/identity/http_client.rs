//! HTTP client for the hosted identity service.
//!
//! A thin adapter over the identity provider's REST API: it serializes
//! domain requests into the provider's JSON shapes, decodes responses
//! DTO-first, and maps every failure onto the `IdentityError` taxonomy.
//! No retry or caching happens here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{
    IdentityError, IdentityErrorCode, IdentityService, NewAccount, NewOrganization,
    ProvisionedAccount,
};
use crate::domain::{LoginCredentials, PasswordReset};

use super::dto::{
    AccountEnvelopeDto, CreateOrganizationRequestDto, ErrorBodyDto, PasswordResetRequestDto,
    ResetPasswordRequestDto, SignInRequestDto, SignUpRequestDto,
};

/// Default request timeout for identity calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpIdentityService`].
#[derive(Debug, Clone)]
pub struct IdentityClientConfig {
    base_url: Url,
    timeout: Duration,
    secret: Option<String>,
}

impl IdentityClientConfig {
    /// Create a configuration pointing at the identity service root.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            secret: None,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach the shared API secret sent as a bearer token on every call.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Reqwest-backed implementation of the `IdentityService` port.
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    client: Client,
    base_url: Url,
}

impl HttpIdentityService {
    /// Build a client from the given configuration.
    pub fn new(config: IdentityClientConfig) -> Result<Self, IdentityError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(secret) = &config.secret {
            let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {secret}"))
                .map_err(|error| {
                    IdentityError::transport(format!("identity secret is not header safe: {error}"))
                })?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| IdentityError::transport(error.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        self.base_url
            .join(path)
            .map_err(|error| IdentityError::transport(format!("invalid endpoint {path}: {error}")))
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, IdentityError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|error| {
                debug!(path, %error, "identity request failed to complete");
                IdentityError::transport(error.to_string())
            })?;
        check_status(path, response).await
    }

    async fn post_for_account<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ProvisionedAccount, IdentityError> {
        let response = self.post(path, body).await?;
        let envelope: AccountEnvelopeDto = response.json().await.map_err(|error| {
            debug!(path, %error, "identity response body failed to decode");
            IdentityError::decode(error.to_string())
        })?;
        envelope.user.into_domain_account().map_err(IdentityError::decode)
    }
}

/// Turn a non-success status into a structured rejection.
///
/// The provider reports expected rejections (duplicate user, bad
/// credentials, stale token) as 4xx responses with a `{code, message}`
/// body. Anything without a decodable body is a decode failure.
async fn check_status(path: &str, response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    debug!(path, %status, "identity request rejected");
    if status.is_server_error() {
        return Err(IdentityError::transport(format!(
            "identity service returned {status}"
        )));
    }

    let body: ErrorBodyDto = response.json().await.map_err(|error| {
        IdentityError::decode(format!("undecodable {status} error body: {error}"))
    })?;
    Err(IdentityError::rejected(
        IdentityErrorCode::from_code(&body.code),
        body.message,
    ))
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<ProvisionedAccount, IdentityError> {
        let body = SignUpRequestDto {
            name: account.name(),
            email: account.email(),
            password: account.password(),
        };
        self.post_for_account("sign-up/email", &body).await
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<(), IdentityError> {
        let body = CreateOrganizationRequestDto {
            name: &organization.name,
            slug: organization.slug.as_ref(),
            user_id: organization.owner_id,
        };
        self.post("organization/create", &body).await?;
        Ok(())
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ProvisionedAccount, IdentityError> {
        let body = SignInRequestDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        self.post_for_account("sign-in/email", &body).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let body = PasswordResetRequestDto { email };
        self.post("request-password-reset", &body).await?;
        Ok(())
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), IdentityError> {
        let body = ResetPasswordRequestDto {
            token: reset.token(),
            new_password: reset.new_password(),
        };
        self.post("reset-password", &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Construction and URL handling; wire behaviour is covered by the
    //! service-level tests with stub ports.
    use super::*;

    fn config() -> IdentityClientConfig {
        let base = Url::parse("https://identity.example.net/api/auth/").expect("valid url");
        IdentityClientConfig::new(base)
    }

    #[test]
    fn endpoints_join_relative_to_the_base_path() {
        let service = HttpIdentityService::new(config()).expect("client builds");
        let url = service.endpoint("sign-up/email").expect("joins");
        assert_eq!(
            url.as_str(),
            "https://identity.example.net/api/auth/sign-up/email"
        );
    }

    #[test]
    fn timeout_override_is_applied() {
        let config = config().with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
