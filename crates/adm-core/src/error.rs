//! Core error types for the Admiral CLI

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the admiral crates
#[derive(Error, Debug)]
pub enum AdmError {
    /// Invalid or missing command-line input
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Memory size could not be parsed
    #[error(transparent)]
    Units(#[from] UnitsError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Argument-shape errors, raised before any remote call.
///
/// The messages are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Host address not provided.")]
    HostAddressNotProvided,

    #[error("Policy ID not provided.")]
    PolicyIdNotProvided,

    #[error("Policy name not provided.")]
    PolicyNameNotProvided,

    /// User answered "no" to the removal confirmation
    #[error("Remove command aborted!")]
    RemoveAborted,

    /// User refused an untrusted host certificate
    #[error("Host not added: certificate was not accepted.")]
    CertificateRejected,

    #[error("Both --username and --password are required for password credentials.")]
    IncompletePasswordCredentials,

    #[error("Both --public and --private are required for certificate credentials.")]
    IncompleteCertificateCredentials,

    /// Custom property not in `KEY=VALUE` form
    #[error("Invalid custom property {0:?}: expected KEY=VALUE")]
    InvalidProperty(String),
}

/// Memory size parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// Input does not contain `<digits><letters>`
    #[error("Unable to parse the memory provided: {0:?}")]
    Unparseable(String),

    /// Unit suffix other than kb/mb/gb
    #[error("Unable to parse the memory provided: unknown unit {unit:?} (supported: kb, mb, gb)")]
    UnknownUnit { unit: String },

    /// Value does not fit in 64 bits
    #[error("Unable to parse the memory provided: {0:?} is too large")]
    Overflow(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Key not present in the configuration
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors talking to the orchestration service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Malformed document link in a response
    #[error(transparent)]
    Wire(#[from] adm_api::WireError),

    /// No registered host has the given address
    #[error("Host not found: {0}")]
    HostNotFound(String),

    /// Several registered hosts share the given address
    #[error("Address {address} matches several hosts: {}", .ids.join(", "))]
    AmbiguousHost { address: String, ids: Vec<String> },

    /// Response did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Certificate still untrusted after it was accepted
    #[error("Host certificate is still not trusted after acceptance")]
    CertificateChallenge,

    /// Asynchronous request ended in failure
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// Asynchronous request did not finish in time
    #[error("Timed out after {secs}s waiting for task {link}")]
    TaskTimeout { link: String, secs: u64 },
}
