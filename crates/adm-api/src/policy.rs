//! Group placement policy documents

use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::links::id_from_link;

/// A placement/resource-governance policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupPolicy {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_self_link: String,
    pub name: String,
    pub max_number_instances: i64,
    /// Memory limit in bytes (0 = unlimited)
    pub memory_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_shares: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub resource_pool_link: String,
    pub deployment_policy_link: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tenant_links: Vec<String>,
}

impl GroupPolicy {
    /// Policy id, taken from the self link
    pub fn policy_id(&self) -> Result<&str, WireError> {
        id_from_link(&self.document_self_link)
    }

    /// Group names this policy applies to
    pub fn groups(&self) -> Vec<&str> {
        self.tenant_links
            .iter()
            .filter_map(|link| id_from_link(link).ok())
            .collect()
    }
}

/// Partial update of a policy; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_number_instances: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_shares: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_pool_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_policy_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_links: Option<Vec<String>>,
}
