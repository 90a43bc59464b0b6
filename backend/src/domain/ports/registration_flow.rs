//! Driving port for the registration use-case.
//!
//! Inbound adapters call this port to run a registration attempt without
//! importing persistence or identity-client concerns, so handler tests can
//! substitute a deterministic double.

use async_trait::async_trait;

use crate::domain::{RegistrationForm, RegistrationOutcome};

/// Domain use-case port for registration.
#[async_trait]
pub trait RegistrationFlow: Send + Sync {
    /// Run one registration attempt to completion.
    ///
    /// Every failure path is terminal for the invocation; callers may
    /// resubmit. Nothing propagates as a fault past this boundary.
    async fn register(&self, form: RegistrationForm) -> RegistrationOutcome;
}
