//! adm-core: Core abstractions and configuration for the Admiral CLI
//!
//! This crate provides the configuration layer, the error taxonomy, the
//! parsers that turn human input into request parameters, and the service
//! traits the command handlers are written against.

pub mod config;
pub mod credentials;
pub mod error;
pub mod properties;
pub mod traits;
pub mod units;

pub use config::ClientConfig;
pub use credentials::{CredentialsChoice, CredentialsInput};
pub use error::{AdmError, ApiError, ConfigError, UnitsError, UsageError};
pub use properties::parse_properties;
pub use units::{format_memory, parse_memory};
