//! In-memory service double for command handler tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use adm_api::links::{self, link_for};
use adm_api::{
    AuthCredentials, CertificateChallenge, ComputeState, GroupPolicy, HostPatch, HostSpec,
    PolicyPatch,
};
use adm_core::traits::{AddHostOutcome, CredentialsApi, HostApi, PolicyApi};
use adm_core::ApiError;

/// Records every call; answers from canned state
#[derive(Default)]
pub struct MockAdmiral {
    hosts: Vec<ComputeState>,
    policies: Vec<GroupPolicy>,
    calls: Mutex<Vec<String>>,
    add_outcomes: Mutex<VecDeque<AddHostOutcome>>,
    added_specs: Mutex<Vec<HostSpec>>,
    host_patches: Mutex<Vec<(String, HostPatch)>>,
    added_policies: Mutex<Vec<GroupPolicy>>,
    policy_patches: Mutex<Vec<(String, PolicyPatch)>>,
}

impl MockAdmiral {
    pub fn with_hosts(hosts: Vec<ComputeState>) -> Self {
        Self {
            hosts,
            ..Default::default()
        }
    }

    pub fn with_policies(policies: Vec<GroupPolicy>) -> Self {
        Self {
            policies,
            ..Default::default()
        }
    }

    /// Answer the next `add_host` with `outcome` instead of success
    pub fn queue_add_outcome(&self, outcome: AddHostOutcome) {
        self.add_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn added_specs(&self) -> Vec<HostSpec> {
        self.added_specs.lock().unwrap().clone()
    }

    pub fn host_patches(&self) -> Vec<(String, HostPatch)> {
        self.host_patches.lock().unwrap().clone()
    }

    pub fn added_policies(&self) -> Vec<GroupPolicy> {
        self.added_policies.lock().unwrap().clone()
    }

    pub fn policy_patches(&self) -> Vec<(String, PolicyPatch)> {
        self.policy_patches.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl HostApi for MockAdmiral {
    async fn add_host(&self, spec: &HostSpec) -> Result<AddHostOutcome, ApiError> {
        self.record("add_host");
        self.added_specs.lock().unwrap().push(spec.clone());
        let queued = self.add_outcomes.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| AddHostOutcome::Added(link_for(links::COMPUTE, "c-new"))))
    }

    async fn list_hosts(&self, query: Option<&str>) -> Result<Vec<ComputeState>, ApiError> {
        match query {
            Some(query) => self.record(format!("list_hosts {}", query)),
            None => self.record("list_hosts"),
        }
        Ok(self.hosts.clone())
    }

    async fn patch_host(&self, host_id: &str, patch: &HostPatch) -> Result<(), ApiError> {
        self.record(format!("patch_host {}", host_id));
        self.host_patches
            .lock()
            .unwrap()
            .push((host_id.to_string(), patch.clone()));
        Ok(())
    }

    async fn request_removal(&self, host_link: &str) -> Result<String, ApiError> {
        self.record(format!("request_removal {}", host_link));
        Ok("/request-status/r-1".to_string())
    }

    async fn wait_for_task(&self, tracker_link: &str) -> Result<(), ApiError> {
        self.record(format!("wait_for_task {}", tracker_link));
        Ok(())
    }
}

#[async_trait]
impl CredentialsApi for MockAdmiral {
    async fn create_credentials(&self, _credentials: &AuthCredentials) -> Result<String, ApiError> {
        self.record("create_credentials");
        Ok(link_for(links::CREDENTIALS, "new-creds"))
    }
}

#[async_trait]
impl PolicyApi for MockAdmiral {
    async fn add_policy(&self, policy: &GroupPolicy) -> Result<GroupPolicy, ApiError> {
        self.record("add_policy");
        self.added_policies.lock().unwrap().push(policy.clone());
        Ok(GroupPolicy {
            document_self_link: link_for(links::GROUP_POLICIES, "gp-new"),
            ..policy.clone()
        })
    }

    async fn list_policies(&self) -> Result<Vec<GroupPolicy>, ApiError> {
        self.record("list_policies");
        Ok(self.policies.clone())
    }

    async fn patch_policy(&self, policy_id: &str, patch: &PolicyPatch) -> Result<(), ApiError> {
        self.record(format!("patch_policy {}", policy_id));
        self.policy_patches
            .lock()
            .unwrap()
            .push((policy_id.to_string(), patch.clone()));
        Ok(())
    }

    async fn delete_policy(&self, policy_id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_policy {}", policy_id));
        Ok(())
    }
}

/// A registered host with the given id and address
pub fn compute(id: &str, address: &str) -> ComputeState {
    ComputeState {
        document_self_link: link_for(links::COMPUTE, id),
        address: address.to_string(),
        ..Default::default()
    }
}

pub fn group_policy(id: &str, name: &str) -> GroupPolicy {
    GroupPolicy {
        document_self_link: link_for(links::GROUP_POLICIES, id),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn challenge() -> CertificateChallenge {
    CertificateChallenge {
        certificate: "-----BEGIN CERTIFICATE-----".to_string(),
        common_name: Some("docker.local".to_string()),
        ..Default::default()
    }
}
