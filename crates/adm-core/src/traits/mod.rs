//! Service traits the command handlers are written against
//!
//! The HTTP client implements these; tests substitute recording mocks.

mod host;
mod policy;

pub use host::{AddHostOutcome, CredentialsApi, HostApi};
pub use policy::PolicyApi;
