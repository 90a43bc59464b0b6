//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthFlow, RegistrationFlow};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case.
    pub registration: Arc<dyn RegistrationFlow>,
    /// Login and password-reset use-cases.
    pub auth: Arc<dyn AuthFlow>,
}

impl HttpState {
    /// Bundle the port implementations handlers need.
    pub fn new(registration: Arc<dyn RegistrationFlow>, auth: Arc<dyn AuthFlow>) -> Self {
        Self { registration, auth }
    }
}
