//! Command implementations
//!
//! Handlers are written against the `adm-core` service traits so they can
//! run against the REST client or an in-memory double.

pub mod config;
pub mod host;
pub mod policy;

use adm_core::UsageError;

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One-line confirmation such as `Host added: c-1`
    Done(String),
    /// Listing printed as-is
    Listing(String),
}

/// Take a required positional argument, failing with `missing` when absent
pub fn require_arg(arg: Option<String>, missing: UsageError) -> Result<String, UsageError> {
    arg.filter(|value| !value.trim().is_empty()).ok_or(missing)
}
