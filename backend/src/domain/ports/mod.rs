//! Domain ports.
//!
//! Driving ports ([`RegistrationFlow`], [`AuthFlow`]) are called by inbound
//! adapters; driven ports ([`RegistrationDirectory`], [`IdentityService`])
//! are implemented by outbound adapters. Handlers and services only ever
//! see these traits, never the adapters behind them.

mod auth_flow;
mod directory;
mod identity;
mod registration_flow;

pub use auth_flow::AuthFlow;
pub use directory::{DirectoryError, OrganizationRecord, RegistrationDirectory, UserRecord};
pub use identity::{
    IdentityError, IdentityErrorCode, IdentityService, NewAccount, NewOrganization,
    ProvisionedAccount,
};
pub use registration_flow::RegistrationFlow;
