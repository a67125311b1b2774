//! Wire error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while interpreting service documents
#[derive(Error, Debug)]
pub enum WireError {
    /// Document link has no id segment
    #[error("Invalid document link: {0:?}")]
    InvalidLink(String),
}

/// Error document returned by the service on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceError {
    pub message: String,
    pub status_code: Option<u16>,
    pub error_code: Option<i64>,
}

impl ServiceError {
    /// Parse an error body, returning `None` when it is not a service error document
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|e| !e.message.is_empty())
    }
}
