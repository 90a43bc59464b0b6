//! Registration API handler.
//!
//! ```text
//! POST /api/v1/register
//! {"name":"Joshua Gartmeier","email":"joshua@gartmeier.dev",
//!  "password":"horseflyhorsefly","organization":"Helping Hands"}
//! ```
//!
//! Validation failures and conflicts are part of the success envelope, not
//! HTTP errors: the caller branches on the `success` discriminant and maps
//! `errors` keys back onto form fields.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FieldErrors, RegistrationForm, RegistrationOutcome};
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// User's full name.
    pub name: String,
    /// E-mail address to register.
    pub email: String,
    /// Plaintext password; hashed by the identity service.
    pub password: String,
    /// Organization display name.
    pub organization: String,
}

impl From<RegisterRequest> for RegistrationForm {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            organization: value.organization,
        }
    }
}

/// Payload returned when registration succeeds.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredAccount {
    /// E-mail address of the created account.
    pub email: String,
}

/// Discriminated registration response envelope.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RegisterResponse {
    /// Account and organization were created.
    Success {
        /// Always `true`.
        success: bool,
        /// Created account details.
        data: RegisteredAccount,
    },
    /// Registration failed; messages are scoped per form field, with the
    /// reserved `root` key for failures not attributable to one input.
    Failure {
        /// Always `false`.
        success: bool,
        /// Field-scoped error messages.
        errors: FieldErrors,
    },
}

impl From<RegistrationOutcome> for RegisterResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        match outcome {
            RegistrationOutcome::Success { email } => Self::Success {
                success: true,
                data: RegisteredAccount { email },
            },
            RegistrationOutcome::Failure { errors } => Self::Failure {
                success: false,
                errors,
            },
        }
    }
}

/// Register a new account and its organization.
///
/// The registration flow never raises past this boundary; every failure is
/// reported inside the envelope.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration outcome envelope", body = RegisterResponse),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> web::Json<RegisterResponse> {
    let outcome = state
        .registration
        .register(RegistrationForm::from(payload.into_inner()))
        .await;
    web::Json(outcome.into())
}
