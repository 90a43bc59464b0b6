//! Login, logout, and password-reset API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"joshua@gartmeier.dev","password":"..."}
//! POST /api/v1/logout
//! POST /api/v1/forgot-password {"email":"joshua@gartmeier.dev"}
//! POST /api/v1/reset-password {"token":"...","password":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, PasswordReset, PasswordResetValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Registered e-mail address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Authenticated account payload returned by `POST /api/v1/login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    /// Stable account identifier.
    pub id: uuid::Uuid,
    /// Registered e-mail address.
    pub email: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            Error::invalid_request("Please enter a valid email address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Authenticate an account and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent error
/// schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let account = state.auth.sign_in(&credentials).await?;
    session.persist_account(account.id)?;
    Ok(web::Json(AccountResponse {
        id: account.id,
        email: account.email,
    }))
}

/// Session introspection payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Account id bound to the session cookie.
    pub id: uuid::Uuid,
}

/// Report the account bound to the current session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Active session", body = SessionResponse),
        (status = 401, description = "No active session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    let id = session.require_account_id()?;
    Ok(web::Json(SessionResponse { id }))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Forgot-password request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Address to send the reset link to.
    pub email: String,
}

/// Ask the identity service to e-mail a password-reset link.
///
/// Always answers 202 when the request is well formed, whether or not the
/// address is registered, so the endpoint cannot enumerate accounts.
#[utoipa::path(
    post,
    path = "/api/v1/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 202, description = "Reset e-mail queued if the address exists"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Identity service unreachable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let email = payload.email.trim();
    if !crate::domain::registration::is_valid_email(email) {
        return Err(
            Error::invalid_request("Please enter a valid email address")
                .with_details(json!({ "field": "email", "code": "invalid_email" })),
        );
    }
    state.auth.request_password_reset(email).await?;
    Ok(HttpResponse::Accepted().finish())
}

/// Reset-password request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// Single-use token from the reset e-mail.
    pub token: String,
    /// Replacement password.
    pub password: String,
}

fn map_reset_validation_error(err: PasswordResetValidationError) -> Error {
    match err {
        PasswordResetValidationError::EmptyToken => {
            Error::invalid_request("reset token must not be empty")
                .with_details(json!({ "field": "token", "code": "empty_token" }))
        }
        PasswordResetValidationError::PasswordTooShort => {
            Error::invalid_request("Password must be at least 8 characters")
                .with_details(json!({ "field": "password", "code": "password_too_short" }))
        }
    }
}

/// Exchange a reset token for a new password.
#[utoipa::path(
    post,
    path = "/api/v1/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Invalid request or expired token", body = Error),
        (status = 503, description = "Identity service unreachable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let reset = PasswordReset::try_from_parts(&payload.token, &payload.password)
        .map_err(map_reset_validation_error)?;
    state.auth.reset_password(&reset).await?;
    Ok(HttpResponse::NoContent().finish())
}
