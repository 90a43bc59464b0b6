//! DTOs for the identity service's JSON wire format.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::ProvisionedAccount;

#[derive(Debug, Serialize)]
pub(super) struct SignUpRequestDto<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateOrganizationRequestDto<'a> {
    pub(super) name: &'a str,
    pub(super) slug: &'a str,
    pub(super) user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub(super) struct SignInRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordResetRequestDto<'a> {
    pub(super) email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResetPasswordRequestDto<'a> {
    pub(super) token: &'a str,
    pub(super) new_password: &'a str,
}

/// Envelope returned by account-producing endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct AccountEnvelopeDto {
    pub(super) user: AccountDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountDto {
    pub(super) id: String,
    pub(super) email: String,
}

impl AccountDto {
    pub(super) fn into_domain_account(self) -> Result<ProvisionedAccount, String> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|error| format!("account id {:?} is not a UUID: {error}", self.id))?;
        Ok(ProvisionedAccount {
            id,
            email: self.email,
        })
    }
}

/// Structured error body emitted on non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub(super) code: String,
    #[serde(default)]
    pub(super) message: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn account_dto_maps_to_domain_account() {
        let dto = AccountDto {
            id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
            email: "joshua@gartmeier.dev".to_owned(),
        };
        let account = dto.into_domain_account().expect("valid account");
        assert_eq!(account.email, "joshua@gartmeier.dev");
    }

    #[test]
    fn non_uuid_account_id_is_a_decode_failure() {
        let dto = AccountDto {
            id: "usr_01".to_owned(),
            email: "joshua@gartmeier.dev".to_owned(),
        };
        let err = dto.into_domain_account().expect_err("invalid id");
        assert!(err.contains("usr_01"));
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ErrorBodyDto =
            serde_json::from_str(r#"{"code":"USER_ALREADY_EXISTS"}"#).expect("decodes");
        assert_eq!(body.code, "USER_ALREADY_EXISTS");
        assert!(body.message.is_empty());
    }
}
