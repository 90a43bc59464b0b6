//! Registration input validation and outcome types.
//!
//! [`RegistrationForm`] carries raw caller-submitted values and is discarded
//! after processing. Validation checks every field independently and reports
//! all violations together; it performs no I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::OrganizationSlug;

/// Minimum length for the user's name.
pub const NAME_MIN: usize = 2;
/// Minimum length for the password.
pub const PASSWORD_MIN: usize = 8;
/// Minimum length for the organization display name.
pub const ORGANIZATION_MIN: usize = 2;

pub(crate) const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub(crate) const EMAIL_INVALID: &str = "Please enter a valid email address";
pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub(crate) const ORGANIZATION_TOO_SHORT: &str = "Organization name must be at least 2 characters";
pub(crate) const ORGANIZATION_UNSLUGGABLE: &str =
    "Organization name must contain letters or numbers";

/// Form field a message is scoped to, plus the reserved `root` key for
/// failures not attributable to a single input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Password,
    Organization,
    Root,
}

impl FieldName {
    /// Stable field key used in error payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Organization => "organization",
            Self::Root => "root",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered error messages keyed by field.
///
/// Keys are always a subset of `{name, email, password, organization, root}`;
/// messages preserve insertion order within a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, Vec<String>>);

impl FieldErrors {
    /// Empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field convenience constructor.
    pub fn single(field: FieldName, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Append a message to a field's list.
    pub fn push(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Return `true` when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, if any.
    pub fn get(&self, field: FieldName) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    /// Iterate fields and their messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

/// Raw registration submission with exactly the caller-facing keys.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    /// User's full name.
    pub name: String,
    /// E-mail address to register.
    pub email: String,
    /// Plaintext password; hashing is owned by the identity service.
    pub password: String,
    /// Organization display name.
    pub organization: String,
}

impl RegistrationForm {
    /// Validate every field and produce a typed input or the accumulated
    /// field errors. All violations are reported together; no field
    /// short-circuits another.
    pub fn validate(self) -> Result<RegistrationInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.chars().count() < NAME_MIN {
            errors.push(FieldName::Name, NAME_TOO_SHORT);
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldName::Email, EMAIL_INVALID);
        }
        if self.password.chars().count() < PASSWORD_MIN {
            errors.push(FieldName::Password, PASSWORD_TOO_SHORT);
        }
        if self.organization.chars().count() < ORGANIZATION_MIN {
            errors.push(FieldName::Organization, ORGANIZATION_TOO_SHORT);
        } else if OrganizationSlug::derive(&self.organization).as_ref().is_empty() {
            // Long enough, but nothing survives slug derivation.
            errors.push(FieldName::Organization, ORGANIZATION_UNSLUGGABLE);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegistrationInput {
            name: self.name,
            email: self.email,
            password: Zeroizing::new(self.password),
            organization: self.organization,
        })
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only; deliverability is the mail collaborator's
        // problem.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` is a syntactically plausible e-mail address.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Validated registration input.
///
/// Only obtainable through [`RegistrationForm::validate`], so holders can
/// rely on the field invariants without re-checking.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    name: String,
    email: String,
    password: Zeroizing<String>,
    organization: String,
}

impl RegistrationInput {
    /// User's full name (length ≥ 2).
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Syntactically valid e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password (length ≥ 8), zeroised on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Organization display name (length ≥ 2).
    pub fn organization(&self) -> &str {
        self.organization.as_str()
    }
}

/// The sole return contract of the registration orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Account and organization were provisioned.
    Success {
        /// E-mail address of the created account, as reported by the
        /// identity service.
        email: String,
    },
    /// Registration did not happen; messages are scoped per field.
    Failure {
        /// Field-scoped error messages, including the reserved `root` key.
        errors: FieldErrors,
    },
}

impl RegistrationOutcome {
    /// Failure constructor from an error map.
    pub fn failure(errors: FieldErrors) -> Self {
        Self::Failure { errors }
    }

    /// Failure constructor for a single field message.
    pub fn field_failure(field: FieldName, message: impl Into<String>) -> Self {
        Self::Failure {
            errors: FieldErrors::single(field, message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn form(name: &str, email: &str, password: &str, organization: &str) -> RegistrationForm {
        RegistrationForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            organization: organization.to_owned(),
        }
    }

    #[test]
    fn valid_form_produces_input_with_original_values() {
        let input = form(
            "Joshua Gartmeier",
            "joshua@gartmeier.dev",
            "horseflyhorsefly",
            "Helping Hands",
        )
        .validate()
        .expect("valid form");

        assert_eq!(input.name(), "Joshua Gartmeier");
        assert_eq!(input.email(), "joshua@gartmeier.dev");
        assert_eq!(input.password(), "horseflyhorsefly");
        assert_eq!(input.organization(), "Helping Hands");
    }

    #[rstest]
    #[case(form("J", "joshua@gartmeier.dev", "horseflyhorsefly", "Helping Hands"), FieldName::Name, NAME_TOO_SHORT)]
    #[case(form("Joshua", "not-an-email", "horseflyhorsefly", "Helping Hands"), FieldName::Email, EMAIL_INVALID)]
    #[case(form("Joshua", "joshua@gartmeier.dev", "short", "Helping Hands"), FieldName::Password, PASSWORD_TOO_SHORT)]
    #[case(form("Joshua", "joshua@gartmeier.dev", "horseflyhorsefly", "H"), FieldName::Organization, ORGANIZATION_TOO_SHORT)]
    #[case(form("Joshua", "joshua@gartmeier.dev", "horseflyhorsefly", "!!"), FieldName::Organization, ORGANIZATION_UNSLUGGABLE)]
    #[case(form("Joshua", "joshua@gartmeier.dev", "horseflyhorsefly", "---"), FieldName::Organization, ORGANIZATION_UNSLUGGABLE)]
    fn single_violation_reports_exactly_one_field(
        #[case] form: RegistrationForm,
        #[case] field: FieldName,
        #[case] message: &str,
    ) {
        let errors = form.validate().expect_err("invalid form");
        assert_eq!(errors.get(field), Some(&[message.to_owned()][..]));
        assert_eq!(errors.iter().count(), 1, "valid fields must produce no entry");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let errors = form("", "nope", "pw", "x").validate().expect_err("invalid form");

        for field in [
            FieldName::Name,
            FieldName::Email,
            FieldName::Password,
            FieldName::Organization,
        ] {
            assert!(
                errors.get(field).is_some_and(|messages| !messages.is_empty()),
                "expected a message for {field}"
            );
        }
    }

    #[rstest]
    #[case("joshua@gartmeier.dev", true)]
    #[case("a@b.co", true)]
    #[case("plain", false)]
    #[case("missing@tld", false)]
    #[case("two@@ats.dev", false)]
    #[case("spaces in@mail.dev", false)]
    #[case("", false)]
    fn email_syntax_check(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(value), expected);
    }

    #[test]
    fn field_errors_serialize_with_stable_keys() {
        let mut errors = FieldErrors::new();
        errors.push(FieldName::Root, "Something went wrong. Please try again.");
        errors.push(FieldName::Email, "User already exists");

        let value = serde_json::to_value(&errors).expect("serializes");
        assert_eq!(value["email"][0], "User already exists");
        assert_eq!(value["root"][0], "Something went wrong. Please try again.");
    }
}
