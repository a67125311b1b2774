//! Authentication credentials documents

use serde::{Deserialize, Serialize};

/// Kind of credentials stored by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialsType {
    Password,
    PublicKey,
}

/// Credentials used by the service to reach a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredentials {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub document_self_link: String,
    #[serde(rename = "type")]
    pub kind: CredentialsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Password for `Password` credentials, PEM private key for `PublicKey`
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl AuthCredentials {
    /// Username/password credentials
    pub fn password(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            document_self_link: String::new(),
            kind: CredentialsType::Password,
            user_email: Some(user.into()),
            private_key: password.into(),
            public_key: None,
        }
    }

    /// Client certificate credentials
    pub fn certificate(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            document_self_link: String::new(),
            kind: CredentialsType::PublicKey,
            user_email: None,
            private_key: private_key.into(),
            public_key: Some(public_key.into()),
        }
    }
}
