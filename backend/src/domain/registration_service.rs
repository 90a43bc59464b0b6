//! Registration orchestrator.
//!
//! Ties validation, slug derivation, uniqueness pre-checks, and identity
//! provisioning into the single entry point behind [`RegistrationFlow`].
//! Every failure is converted into a [`RegistrationOutcome::Failure`];
//! nothing escapes this service as a fault.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    DirectoryError, IdentityError, IdentityErrorCode, IdentityService, NewAccount,
    NewOrganization, RegistrationDirectory, RegistrationFlow,
};
use crate::domain::{
    FieldName, OrganizationSlug, RegistrationForm, RegistrationInput, RegistrationOutcome,
};

pub(crate) const USER_EXISTS: &str = "User already exists";
pub(crate) const ORGANIZATION_EXISTS: &str = "Organization already exists";
pub(crate) const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Registration service implementing the [`RegistrationFlow`] driving port.
///
/// The uniqueness pre-checks are a soft optimization: the store's unique
/// indexes and the identity service's structured conflict codes are the
/// authoritative guard, and both paths produce the same field-scoped
/// messages. E-mail is checked before the organization slug; when both
/// collide only the e-mail failure is reported.
#[derive(Clone)]
pub struct RegistrationService<D, I> {
    directory: Arc<D>,
    identity: Arc<I>,
}

impl<D, I> RegistrationService<D, I> {
    /// Create a new service over the given ports.
    pub fn new(directory: Arc<D>, identity: Arc<I>) -> Self {
        Self {
            directory,
            identity,
        }
    }
}

impl<D, I> RegistrationService<D, I>
where
    D: RegistrationDirectory,
    I: IdentityService,
{
    async fn run(&self, form: RegistrationForm) -> RegistrationOutcome {
        let input = match form.validate() {
            Ok(input) => input,
            Err(errors) => return RegistrationOutcome::failure(errors),
        };

        let slug = OrganizationSlug::derive(input.organization());

        match self.check_collisions(&input, &slug).await {
            Ok(None) => {}
            Ok(Some(outcome)) => return outcome,
            Err(error) => return directory_failure(&error),
        }

        self.provision(&input, slug).await
    }

    /// Pre-write uniqueness checks. E-mail first; first failing check wins.
    async fn check_collisions(
        &self,
        input: &RegistrationInput,
        slug: &OrganizationSlug,
    ) -> Result<Option<RegistrationOutcome>, DirectoryError> {
        if self
            .directory
            .find_user_by_email(input.email())
            .await?
            .is_some()
        {
            return Ok(Some(RegistrationOutcome::field_failure(
                FieldName::Email,
                USER_EXISTS,
            )));
        }

        if self
            .directory
            .find_organization_by_slug(slug)
            .await?
            .is_some()
        {
            return Ok(Some(RegistrationOutcome::field_failure(
                FieldName::Organization,
                ORGANIZATION_EXISTS,
            )));
        }

        Ok(None)
    }

    /// Two-step, non-atomic provisioning: account first, then organization.
    ///
    /// A failed second step leaves the account behind without an
    /// organization; the caller's resubmit surfaces that as an e-mail
    /// conflict. Logged for operator reconciliation.
    async fn provision(
        &self,
        input: &RegistrationInput,
        slug: OrganizationSlug,
    ) -> RegistrationOutcome {
        let account = match self
            .identity
            .create_account(&NewAccount::from_registration(input))
            .await
        {
            Ok(account) => account,
            Err(error) => return identity_failure(&error),
        };

        let organization = NewOrganization {
            name: input.organization().to_owned(),
            slug,
            owner_id: account.id,
        };
        if let Err(error) = self.identity.create_organization(&organization).await {
            warn!(
                account_id = %account.id,
                slug = %organization.slug,
                %error,
                "organization creation failed after account creation; account left without organization"
            );
            return identity_failure(&error);
        }

        RegistrationOutcome::Success {
            email: account.email,
        }
    }
}

fn directory_failure(error: &DirectoryError) -> RegistrationOutcome {
    error!(%error, "uniqueness pre-check failed");
    RegistrationOutcome::field_failure(FieldName::Root, GENERIC_FAILURE)
}

/// Map structured identity rejections onto the same field messages the
/// pre-checks produce; anything unrecognized becomes the generic root
/// message.
fn identity_failure(error: &IdentityError) -> RegistrationOutcome {
    match error {
        IdentityError::Rejected {
            code: IdentityErrorCode::UserAlreadyExists,
            ..
        } => RegistrationOutcome::field_failure(FieldName::Email, USER_EXISTS),
        IdentityError::Rejected {
            code: IdentityErrorCode::OrganizationAlreadyExists,
            ..
        } => RegistrationOutcome::field_failure(FieldName::Organization, ORGANIZATION_EXISTS),
        other => {
            error!(error = %other, "identity provisioning failed");
            RegistrationOutcome::field_failure(FieldName::Root, GENERIC_FAILURE)
        }
    }
}

#[async_trait]
impl<D, I> RegistrationFlow for RegistrationService<D, I>
where
    D: RegistrationDirectory,
    I: IdentityService,
{
    async fn register(&self, form: RegistrationForm) -> RegistrationOutcome {
        self.run(form).await
    }
}

#[cfg(test)]
mod tests;
