//! Host and credentials traits

use async_trait::async_trait;

use adm_api::{AuthCredentials, CertificateChallenge, ComputeState, HostPatch, HostSpec};

use crate::error::ApiError;

/// Result of submitting a host spec
#[derive(Debug, Clone, PartialEq)]
pub enum AddHostOutcome {
    /// Host registered; carries the new compute document link
    Added(String),
    /// The service does not trust the host's certificate yet
    Untrusted(CertificateChallenge),
}

/// Host management operations
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Register a host
    async fn add_host(&self, spec: &HostSpec) -> Result<AddHostOutcome, ApiError>;

    /// List hosts, optionally filtered by a free-text query
    async fn list_hosts(&self, query: Option<&str>) -> Result<Vec<ComputeState>, ApiError>;

    /// Apply a partial update to a host
    async fn patch_host(&self, host_id: &str, patch: &HostPatch) -> Result<(), ApiError>;

    /// Ask the service to remove a host; returns the request tracker link
    async fn request_removal(&self, host_link: &str) -> Result<String, ApiError>;

    /// Block until the tracked request finishes
    async fn wait_for_task(&self, tracker_link: &str) -> Result<(), ApiError>;

    /// Resolve a user-supplied address to a registered host.
    ///
    /// An exact address match wins. Otherwise the address is compared on
    /// its host part, which must single out one host.
    async fn find_host(&self, address: &str) -> Result<ComputeState, ApiError> {
        tracing::debug!(address = %address, "Resolving host address");
        let hosts = self.list_hosts(None).await?;

        let (exact, rest): (Vec<_>, Vec<_>) =
            hosts.into_iter().partition(|host| host.address == address);
        let candidates = if exact.is_empty() {
            rest.into_iter()
                .filter(|host| host.matches_host_part(address))
                .collect()
        } else {
            exact
        };

        single_host(address, candidates)
    }
}

fn single_host(address: &str, mut candidates: Vec<ComputeState>) -> Result<ComputeState, ApiError> {
    match candidates.len() {
        0 => Err(ApiError::HostNotFound(address.to_string())),
        1 => Ok(candidates.remove(0)),
        _ => Err(ApiError::AmbiguousHost {
            address: address.to_string(),
            ids: candidates
                .iter()
                .map(|host| {
                    host.host_id()
                        .unwrap_or_else(|_| host.document_self_link.clone())
                })
                .collect(),
        }),
    }
}

/// Credentials storage operations
#[async_trait]
pub trait CredentialsApi: Send + Sync {
    /// Store credentials; returns the new credentials document link
    async fn create_credentials(&self, credentials: &AuthCredentials) -> Result<String, ApiError>;
}
