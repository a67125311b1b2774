//! Policy trait

use async_trait::async_trait;

use adm_api::{GroupPolicy, PolicyPatch};

use crate::error::ApiError;

/// Group placement policy operations
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// Create a policy; returns the stored document
    async fn add_policy(&self, policy: &GroupPolicy) -> Result<GroupPolicy, ApiError>;

    async fn list_policies(&self) -> Result<Vec<GroupPolicy>, ApiError>;

    /// Apply a partial update to a policy
    async fn patch_policy(&self, policy_id: &str, patch: &PolicyPatch) -> Result<(), ApiError>;

    async fn delete_policy(&self, policy_id: &str) -> Result<(), ApiError>;
}
