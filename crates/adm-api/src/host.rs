//! Host documents

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::WireError;
use crate::links::id_from_link;

/// Custom property carrying the deployment policy link of a host
pub const DEPLOYMENT_POLICY_PROPERTY: &str = "__deploymentPolicyLink";

/// Custom property carrying the credentials link of a host
pub const CREDENTIALS_PROPERTY: &str = "__authCredentialsLink";

/// Custom property carrying the display name of a host
pub const DISPLAY_NAME_PROPERTY: &str = "__displayName";

/// Custom property the service fills with the number of containers on a host
pub const CONTAINERS_PROPERTY: &str = "__Containers";

/// Power state of a compute host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerState {
    On,
    Off,
    Suspend,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => write!(f, "ON"),
            PowerState::Off => write!(f, "OFF"),
            PowerState::Suspend => write!(f, "SUSPEND"),
            PowerState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Specification submitted to register a new host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSpec {
    pub address: String,
    pub resource_pool_link: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default)]
    pub accept_certificate: bool,
}

impl HostSpec {
    /// Create a spec for the given address and resource pool link
    pub fn new(address: impl Into<String>, resource_pool_link: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            resource_pool_link: resource_pool_link.into(),
            ..Default::default()
        }
    }
}

/// A registered host as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeState {
    pub document_self_link: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: String,
    pub power_state: Option<PowerState>,
    pub resource_pool_link: Option<String>,
    pub custom_properties: BTreeMap<String, String>,
}

impl ComputeState {
    /// Host id, taken from the self link when the document carries none
    pub fn host_id(&self) -> Result<String, WireError> {
        match &self.id {
            Some(id) if !id.is_empty() => Ok(id.clone()),
            _ => id_from_link(&self.document_self_link).map(String::from),
        }
    }

    /// Name to show for this host (display name property, then name, then address)
    pub fn display_name(&self) -> &str {
        self.custom_properties
            .get(DISPLAY_NAME_PROPERTY)
            .map(String::as_str)
            .or(self.name.as_deref())
            .unwrap_or(&self.address)
    }

    /// Whether the host part of this host's address equals that of `address`
    /// once scheme, port and path are stripped (`https://10.0.0.5:2376`
    /// matches `10.0.0.5`).
    pub fn matches_host_part(&self, address: &str) -> bool {
        host_part(&self.address) == host_part(address)
    }
}

/// Strip scheme, port and path from an address
fn host_part(address: &str) -> &str {
    let rest = address
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(address);
    let rest = rest.split('/').next().unwrap_or(rest);
    if let Some(bracketed) = rest.strip_prefix('[') {
        // IPv6 literal: [::1]:2376
        return bracketed.split(']').next().unwrap_or(bracketed);
    }
    match rest.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            host
        }
        _ => rest,
    }
}

/// Partial update of a host; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_pool_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_state: Option<PowerState>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accept_certificate: bool,
}

impl HostPatch {
    /// Patch that only changes the power state
    pub fn power(state: PowerState) -> Self {
        Self {
            power_state: Some(state),
            ..Default::default()
        }
    }
}

/// Certificate the service could not verify while adding a host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateChallenge {
    pub certificate: String,
    pub common_name: Option<String>,
    pub issuer_name: Option<String>,
    pub fingerprint: Option<String>,
    pub valid_since: Option<i64>,
    pub valid_to: Option<i64>,
}
