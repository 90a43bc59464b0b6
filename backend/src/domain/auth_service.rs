//! Login and password-reset use-cases over the identity service port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    AuthFlow, IdentityError, IdentityErrorCode, IdentityService, ProvisionedAccount,
};
use crate::domain::{Error, LoginCredentials, PasswordReset};

/// Authentication service implementing the [`AuthFlow`] driving port.
#[derive(Clone)]
pub struct AuthService<I> {
    identity: Arc<I>,
}

impl<I> AuthService<I> {
    /// Create a new service over the identity port.
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }
}

fn map_infrastructure_error(error: &IdentityError) -> Error {
    match error {
        IdentityError::Transport { message } => {
            Error::service_unavailable(format!("identity service unreachable: {message}"))
        }
        other => Error::internal(format!("identity service failure: {other}")),
    }
}

#[async_trait]
impl<I> AuthFlow for AuthService<I>
where
    I: IdentityService,
{
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<ProvisionedAccount, Error> {
        match self.identity.sign_in(credentials).await {
            Ok(account) => Ok(account),
            Err(IdentityError::Rejected {
                code: IdentityErrorCode::InvalidCredentials,
                ..
            }) => Err(Error::unauthorized("Invalid email or password")),
            Err(error) => {
                error!(%error, "sign-in failed");
                Err(map_infrastructure_error(&error))
            }
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        match self.identity.request_password_reset(email).await {
            Ok(()) => Ok(()),
            // An unknown address is indistinguishable from success so the
            // endpoint cannot enumerate accounts.
            Err(IdentityError::Rejected { code, message }) => {
                debug!(code = %code, message, "password-reset request rejected");
                Ok(())
            }
            Err(error) => {
                error!(%error, "password-reset request failed");
                Err(map_infrastructure_error(&error))
            }
        }
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), Error> {
        match self.identity.reset_password(reset).await {
            Ok(()) => Ok(()),
            Err(IdentityError::Rejected {
                code: IdentityErrorCode::InvalidToken,
                ..
            }) => Err(Error::invalid_request(
                "Reset link is invalid or has expired",
            )),
            Err(error) => {
                error!(%error, "password reset failed");
                Err(map_infrastructure_error(&error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{NewAccount, NewOrganization};

    #[derive(Default)]
    struct StubIdentity {
        sign_in_result: Mutex<Option<Result<ProvisionedAccount, IdentityError>>>,
        reset_request_result: Mutex<Option<Result<(), IdentityError>>>,
        reset_result: Mutex<Option<Result<(), IdentityError>>>,
    }

    #[async_trait]
    impl IdentityService for StubIdentity {
        async fn create_account(
            &self,
            _account: &NewAccount,
        ) -> Result<ProvisionedAccount, IdentityError> {
            unimplemented!("not exercised by auth tests")
        }

        async fn create_organization(
            &self,
            _organization: &NewOrganization,
        ) -> Result<(), IdentityError> {
            unimplemented!("not exercised by auth tests")
        }

        async fn sign_in(
            &self,
            _credentials: &LoginCredentials,
        ) -> Result<ProvisionedAccount, IdentityError> {
            self.sign_in_result
                .lock()
                .expect("state lock")
                .take()
                .expect("sign_in result configured")
        }

        async fn request_password_reset(&self, _email: &str) -> Result<(), IdentityError> {
            self.reset_request_result
                .lock()
                .expect("state lock")
                .take()
                .expect("reset request result configured")
        }

        async fn reset_password(&self, _reset: &PasswordReset) -> Result<(), IdentityError> {
            self.reset_result
                .lock()
                .expect("state lock")
                .take()
                .expect("reset result configured")
        }
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts("joshua@gartmeier.dev", "horseflyhorsefly")
            .expect("valid credentials")
    }

    fn account() -> ProvisionedAccount {
        ProvisionedAccount {
            id: Uuid::new_v4(),
            email: "joshua@gartmeier.dev".to_owned(),
        }
    }

    #[tokio::test]
    async fn sign_in_returns_the_authenticated_account() {
        let stub = StubIdentity::default();
        let expected = account();
        *stub.sign_in_result.lock().expect("state lock") = Some(Ok(expected.clone()));
        let service = AuthService::new(Arc::new(stub));

        let result = service.sign_in(&credentials()).await.expect("signs in");
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case(
        IdentityError::rejected(IdentityErrorCode::InvalidCredentials, "nope"),
        ErrorCode::Unauthorized
    )]
    #[case(IdentityError::transport("timeout"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityError::decode("bad json"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn sign_in_failures_map_to_domain_codes(
        #[case] error: IdentityError,
        #[case] expected: ErrorCode,
    ) {
        let stub = StubIdentity::default();
        *stub.sign_in_result.lock().expect("state lock") = Some(Err(error));
        let service = AuthService::new(Arc::new(stub));

        let err = service
            .sign_in(&credentials())
            .await
            .expect_err("sign-in fails");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn reset_request_swallows_unknown_address_rejections() {
        let stub = StubIdentity::default();
        *stub.reset_request_result.lock().expect("state lock") = Some(Err(
            IdentityError::rejected(IdentityErrorCode::Other("USER_NOT_FOUND".to_owned()), "no"),
        ));
        let service = AuthService::new(Arc::new(stub));

        service
            .request_password_reset("nobody@gartmeier.dev")
            .await
            .expect("request succeeds regardless");
    }

    #[tokio::test]
    async fn reset_request_surfaces_transport_failures() {
        let stub = StubIdentity::default();
        *stub.reset_request_result.lock().expect("state lock") =
            Some(Err(IdentityError::transport("connection refused")));
        let service = AuthService::new(Arc::new(stub));

        let err = service
            .request_password_reset("joshua@gartmeier.dev")
            .await
            .expect_err("transport failure surfaces");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case(
        IdentityError::rejected(IdentityErrorCode::InvalidToken, "expired"),
        ErrorCode::InvalidRequest
    )]
    #[case(IdentityError::transport("timeout"), ErrorCode::ServiceUnavailable)]
    #[tokio::test]
    async fn reset_password_failures_map_to_domain_codes(
        #[case] error: IdentityError,
        #[case] expected: ErrorCode,
    ) {
        let stub = StubIdentity::default();
        *stub.reset_result.lock().expect("state lock") = Some(Err(error));
        let service = AuthService::new(Arc::new(stub));

        let reset =
            PasswordReset::try_from_parts("tok-123", "horseflyhorsefly").expect("valid reset");
        let err = service
            .reset_password(&reset)
            .await
            .expect_err("reset fails");
        assert_eq!(err.code(), expected);
    }
}
