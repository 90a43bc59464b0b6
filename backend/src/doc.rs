//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (registration,
//!   authentication, health)
//! - **Schemas**: Request/response bodies plus the shared error envelope
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification feeds Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, FieldErrors, FieldName};
use crate::inbound::http::auth::{
    AccountResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SessionResponse,
};
use crate::inbound::http::registration::{RegisterRequest, RegisterResponse, RegisteredAccount};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Registration backend API",
        description = "HTTP interface for account registration, session \
                       authentication, password recovery, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::registration::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        RegisteredAccount,
        LoginRequest,
        AccountResponse,
        SessionResponse,
        ForgotPasswordRequest,
        ResetPasswordRequest,
        FieldName,
        FieldErrors,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "auth", description = "Registration, login, and password recovery"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
