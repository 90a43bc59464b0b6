//! Regression coverage for the registration orchestrator.

use std::sync::Mutex;

use async_trait::async_trait;
use rstest::rstest;
use uuid::Uuid;

use super::{GENERIC_FAILURE, ORGANIZATION_EXISTS, USER_EXISTS};
use crate::domain::ports::{
    DirectoryError, IdentityError, IdentityErrorCode, IdentityService, NewAccount,
    NewOrganization, OrganizationRecord, ProvisionedAccount, RegistrationDirectory,
    RegistrationFlow, UserRecord,
};
use crate::domain::{
    FieldErrors, FieldName, LoginCredentials, OrganizationSlug, PasswordReset, RegistrationForm,
    RegistrationOutcome, RegistrationService,
};
use std::sync::Arc;

const ACCOUNT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        name: "Joshua Gartmeier".to_owned(),
        email: "joshua@gartmeier.dev".to_owned(),
        password: "horseflyhorsefly".to_owned(),
        organization: "Helping Hands".to_owned(),
    }
}

fn account_id() -> Uuid {
    Uuid::parse_str(ACCOUNT_ID).expect("fixture uuid")
}

#[derive(Default)]
struct DirectoryState {
    user: Option<UserRecord>,
    organization: Option<OrganizationRecord>,
    fail: Option<DirectoryError>,
    email_lookups: Vec<String>,
    slug_lookups: Vec<String>,
}

#[derive(Default)]
struct StubDirectory {
    state: Mutex<DirectoryState>,
}

impl StubDirectory {
    fn with_user(email: &str) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").user = Some(UserRecord {
            id: Uuid::new_v4(),
            email: email.to_owned(),
        });
        stub
    }

    fn with_organization(slug: &str) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").organization = Some(OrganizationRecord {
            id: Uuid::new_v4(),
            name: "Helping Hands".to_owned(),
            slug: OrganizationSlug::from_stored(slug).expect("valid fixture slug"),
        });
        stub
    }

    fn failing(error: DirectoryError) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").fail = Some(error);
        stub
    }

    fn email_lookups(&self) -> Vec<String> {
        self.state.lock().expect("state lock").email_lookups.clone()
    }

    fn slug_lookups(&self) -> Vec<String> {
        self.state.lock().expect("state lock").slug_lookups.clone()
    }
}

#[async_trait]
impl RegistrationDirectory for StubDirectory {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let mut state = self.state.lock().expect("state lock");
        state.email_lookups.push(email.to_owned());
        if let Some(error) = state.fail.clone() {
            return Err(error);
        }
        Ok(state
            .user
            .as_ref()
            .filter(|user| user.email == email)
            .cloned())
    }

    async fn find_organization_by_slug(
        &self,
        slug: &OrganizationSlug,
    ) -> Result<Option<OrganizationRecord>, DirectoryError> {
        let mut state = self.state.lock().expect("state lock");
        state.slug_lookups.push(slug.as_ref().to_owned());
        if let Some(error) = state.fail.clone() {
            return Err(error);
        }
        Ok(state
            .organization
            .as_ref()
            .filter(|organization| &organization.slug == slug)
            .cloned())
    }
}

#[derive(Default)]
struct IdentityState {
    account_error: Option<IdentityError>,
    organization_error: Option<IdentityError>,
    accounts: Vec<(String, String, String)>,
    organizations: Vec<NewOrganization>,
}

#[derive(Default)]
struct StubIdentity {
    state: Mutex<IdentityState>,
}

impl StubIdentity {
    fn rejecting_account(code: IdentityErrorCode) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").account_error =
            Some(IdentityError::rejected(code, "rejected"));
        stub
    }

    fn failing_account(error: IdentityError) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").account_error = Some(error);
        stub
    }

    fn rejecting_organization(code: IdentityErrorCode) -> Self {
        let stub = Self::default();
        stub.state.lock().expect("state lock").organization_error =
            Some(IdentityError::rejected(code, "rejected"));
        stub
    }

    fn created_accounts(&self) -> Vec<(String, String, String)> {
        self.state.lock().expect("state lock").accounts.clone()
    }

    fn created_organizations(&self) -> Vec<NewOrganization> {
        self.state.lock().expect("state lock").organizations.clone()
    }
}

#[async_trait]
impl IdentityService for StubIdentity {
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<ProvisionedAccount, IdentityError> {
        let mut state = self.state.lock().expect("state lock");
        if let Some(error) = state.account_error.clone() {
            return Err(error);
        }
        state.accounts.push((
            account.name().to_owned(),
            account.email().to_owned(),
            account.password().to_owned(),
        ));
        Ok(ProvisionedAccount {
            id: account_id(),
            email: account.email().to_owned(),
        })
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<(), IdentityError> {
        let mut state = self.state.lock().expect("state lock");
        if let Some(error) = state.organization_error.clone() {
            return Err(error);
        }
        state.organizations.push(organization.clone());
        Ok(())
    }

    async fn sign_in(
        &self,
        _credentials: &LoginCredentials,
    ) -> Result<ProvisionedAccount, IdentityError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), IdentityError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn reset_password(&self, _reset: &PasswordReset) -> Result<(), IdentityError> {
        unimplemented!("not exercised by registration tests")
    }
}

fn service(
    directory: StubDirectory,
    identity: StubIdentity,
) -> (
    RegistrationService<StubDirectory, StubIdentity>,
    Arc<StubDirectory>,
    Arc<StubIdentity>,
) {
    let directory = Arc::new(directory);
    let identity = Arc::new(identity);
    (
        RegistrationService::new(directory.clone(), identity.clone()),
        directory,
        identity,
    )
}

fn expect_single_field_failure(
    outcome: RegistrationOutcome,
    field: FieldName,
    message: &str,
) -> FieldErrors {
    let RegistrationOutcome::Failure { errors } = outcome else {
        panic!("expected failure outcome");
    };
    assert_eq!(errors.get(field), Some(&[message.to_owned()][..]));
    assert_eq!(errors.iter().count(), 1);
    errors
}

#[tokio::test]
async fn valid_registration_provisions_account_and_organization() {
    let (service, _directory, identity) = service(StubDirectory::default(), StubIdentity::default());

    let outcome = service.register(valid_form()).await;

    assert_eq!(
        outcome,
        RegistrationOutcome::Success {
            email: "joshua@gartmeier.dev".to_owned(),
        }
    );

    let accounts = identity.created_accounts();
    assert_eq!(
        accounts,
        vec![(
            "Joshua Gartmeier".to_owned(),
            "joshua@gartmeier.dev".to_owned(),
            "horseflyhorsefly".to_owned(),
        )]
    );

    let organizations = identity.created_organizations();
    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].name, "Helping Hands");
    assert_eq!(organizations[0].slug.as_ref(), "helping-hands");
    assert_eq!(organizations[0].owner_id, account_id());
}

#[tokio::test]
async fn invalid_form_short_circuits_before_any_lookup() {
    let (service, directory, identity) = service(StubDirectory::default(), StubIdentity::default());

    let outcome = service
        .register(RegistrationForm {
            name: "J".to_owned(),
            email: "not-an-email".to_owned(),
            password: "short".to_owned(),
            organization: "H".to_owned(),
        })
        .await;

    let RegistrationOutcome::Failure { errors } = outcome else {
        panic!("expected failure outcome");
    };
    assert_eq!(errors.iter().count(), 4);
    assert!(directory.email_lookups().is_empty());
    assert!(identity.created_accounts().is_empty());
}

#[tokio::test]
async fn existing_email_reports_user_conflict_without_provisioning() {
    let (service, directory, identity) = service(
        StubDirectory::with_user("joshua@gartmeier.dev"),
        StubIdentity::default(),
    );

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, FieldName::Email, USER_EXISTS);
    assert_eq!(directory.email_lookups(), vec!["joshua@gartmeier.dev"]);
    // First failing check wins: the slug lookup never runs.
    assert!(directory.slug_lookups().is_empty());
    assert!(identity.created_accounts().is_empty());
}

#[tokio::test]
async fn existing_slug_reports_organization_conflict() {
    let (service, directory, identity) = service(
        StubDirectory::with_organization("helping-hands"),
        StubIdentity::default(),
    );

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, FieldName::Organization, ORGANIZATION_EXISTS);
    assert_eq!(directory.slug_lookups(), vec!["helping-hands"]);
    assert!(identity.created_accounts().is_empty());
}

#[rstest]
#[case(IdentityErrorCode::UserAlreadyExists, FieldName::Email, USER_EXISTS)]
#[case(
    IdentityErrorCode::OrganizationAlreadyExists,
    FieldName::Organization,
    ORGANIZATION_EXISTS
)]
#[case(
    IdentityErrorCode::Other("RATE_LIMITED".to_owned()),
    FieldName::Root,
    GENERIC_FAILURE
)]
#[tokio::test]
async fn write_time_rejections_map_to_the_same_field_shape(
    #[case] code: IdentityErrorCode,
    #[case] field: FieldName,
    #[case] message: &str,
) {
    let (service, _directory, _identity) = service(
        StubDirectory::default(),
        StubIdentity::rejecting_account(code),
    );

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, field, message);
}

#[tokio::test]
async fn transport_failure_maps_to_generic_root_message() {
    let (service, _directory, _identity) = service(
        StubDirectory::default(),
        StubIdentity::failing_account(IdentityError::transport("connection refused")),
    );

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, FieldName::Root, GENERIC_FAILURE);
}

#[tokio::test]
async fn organization_conflict_at_write_time_leaves_account_and_reports_field() {
    let (service, _directory, identity) = service(
        StubDirectory::default(),
        StubIdentity::rejecting_organization(IdentityErrorCode::OrganizationAlreadyExists),
    );

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, FieldName::Organization, ORGANIZATION_EXISTS);
    // The account write already happened; no compensating rollback runs.
    assert_eq!(identity.created_accounts().len(), 1);
    assert!(identity.created_organizations().is_empty());
}

#[rstest]
#[case(DirectoryError::connection("database unavailable"))]
#[case(DirectoryError::query("database query failed"))]
#[tokio::test]
async fn directory_failures_map_to_generic_root_message(#[case] error: DirectoryError) {
    let (service, _directory, identity) =
        service(StubDirectory::failing(error), StubIdentity::default());

    let outcome = service.register(valid_form()).await;

    expect_single_field_failure(outcome, FieldName::Root, GENERIC_FAILURE);
    assert!(identity.created_accounts().is_empty());
}
