//! HTTP client for the orchestration service
//!
//! Every call is a single JSON request/response. Non-success statuses are
//! turned into [`ApiError::Status`] carrying the service's own message.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::Instant;

use adm_api::links::{self, link_for};
use adm_api::{
    AuthCredentials, CertificateChallenge, ComputeState, GroupPolicy, HostPatch, HostSpec,
    PolicyPatch, QueryResult, RemovalRequest, RequestStatus, ServiceError, TaskStage,
};
use adm_core::traits::{AddHostOutcome, CredentialsApi, HostApi, PolicyApi};
use adm_core::{ApiError, ClientConfig};

/// Header carrying the session token
pub const AUTH_TOKEN_HEADER: &str = "x-xenon-auth-token";

/// Client for the orchestration service REST API
pub struct AdmiralClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    poll_interval: Duration,
    task_timeout: Duration,
}

impl AdmiralClient {
    /// Build a client from the effective configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        if config.insecure {
            tracing::warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            poll_interval: config.task_poll_interval,
            task_timeout: config.task_timeout,
        })
    }

    /// Get the service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        builder
    }

    /// Send a request, mapping non-success statuses to errors
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pick the most useful message out of an error response
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(error) = ServiceError::from_body(body) {
        return error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Free-text filter over all fields; single quotes are doubled
fn query_filter(query: &str) -> String {
    format!("ALL_FIELDS eq '*{}*'", query.replace('\'', "''"))
}

/// Reduce a `Location` header (absolute URL or path) to a document link
fn link_from_location(location: &str) -> String {
    match reqwest::Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location.to_string(),
    }
}

#[async_trait]
impl HostApi for AdmiralClient {
    async fn add_host(&self, spec: &HostSpec) -> Result<AddHostOutcome, ApiError> {
        let response = self
            .send(self.request(Method::PUT, links::HOSTS).json(spec))
            .await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(link_from_location);

        let body = response.bytes().await?;
        if !body.is_empty() {
            let value: serde_json::Value = serde_json::from_slice(&body)?;
            if value.get("certificate").is_some() {
                let challenge: CertificateChallenge = serde_json::from_value(value)?;
                tracing::info!(
                    common_name = ?challenge.common_name,
                    "Host certificate is not trusted"
                );
                return Ok(AddHostOutcome::Untrusted(challenge));
            }
            if location.is_none() {
                if let Some(link) = value.get("documentSelfLink").and_then(|v| v.as_str()) {
                    return Ok(AddHostOutcome::Added(link.to_string()));
                }
            }
        }

        location
            .map(AddHostOutcome::Added)
            .ok_or_else(|| ApiError::UnexpectedResponse("host added without a location".to_string()))
    }

    async fn list_hosts(&self, query: Option<&str>) -> Result<Vec<ComputeState>, ApiError> {
        let mut params = vec![("expand", "true".to_string())];
        if let Some(query) = query {
            params.push(("$filter", query_filter(query)));
        }

        let response = self
            .send(self.request(Method::GET, links::COMPUTE).query(&params))
            .await?;
        let result: QueryResult<ComputeState> = Self::read_json(response).await?;
        Ok(result.into_documents())
    }

    async fn patch_host(&self, host_id: &str, patch: &HostPatch) -> Result<(), ApiError> {
        let path = link_for(links::COMPUTE, host_id);
        self.send(self.request(Method::PATCH, &path).json(patch))
            .await?;
        Ok(())
    }

    async fn request_removal(&self, host_link: &str) -> Result<String, ApiError> {
        let request = RemovalRequest::remove_hosts(vec![host_link.to_string()]);
        let response = self
            .send(self.request(Method::POST, links::REQUESTS).json(&request))
            .await?;
        let accepted: RemovalRequest = Self::read_json(response).await?;
        accepted.request_tracker_link.ok_or_else(|| {
            ApiError::UnexpectedResponse("removal request has no tracker link".to_string())
        })
    }

    async fn wait_for_task(&self, tracker_link: &str) -> Result<(), ApiError> {
        let deadline = Instant::now() + self.task_timeout;

        loop {
            let response = self.send(self.request(Method::GET, tracker_link)).await?;
            let status: RequestStatus = Self::read_json(response).await?;

            let stage = status.stage();
            if stage == TaskStage::Finished {
                tracing::info!(tracker = %tracker_link, "Task finished");
                return Ok(());
            }
            if stage.is_terminal() {
                let message = status
                    .failure_message()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", stage).to_uppercase());
                return Err(ApiError::TaskFailed(message));
            }
            tracing::debug!(
                tracker = %tracker_link,
                stage = ?stage,
                progress = ?status.progress,
                "Task still running"
            );

            if Instant::now() >= deadline {
                return Err(ApiError::TaskTimeout {
                    link: tracker_link.to_string(),
                    secs: self.task_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl CredentialsApi for AdmiralClient {
    async fn create_credentials(&self, credentials: &AuthCredentials) -> Result<String, ApiError> {
        let response = self
            .send(self.request(Method::POST, links::CREDENTIALS).json(credentials))
            .await?;
        let stored: AuthCredentials = Self::read_json(response).await?;
        if stored.document_self_link.is_empty() {
            return Err(ApiError::UnexpectedResponse(
                "credentials stored without a self link".to_string(),
            ));
        }
        Ok(stored.document_self_link)
    }
}

#[async_trait]
impl PolicyApi for AdmiralClient {
    async fn add_policy(&self, policy: &GroupPolicy) -> Result<GroupPolicy, ApiError> {
        let response = self
            .send(self.request(Method::POST, links::GROUP_POLICIES).json(policy))
            .await?;
        Self::read_json(response).await
    }

    async fn list_policies(&self) -> Result<Vec<GroupPolicy>, ApiError> {
        let response = self
            .send(
                self.request(Method::GET, links::GROUP_POLICIES)
                    .query(&[("expand", "true")]),
            )
            .await?;
        let result: QueryResult<GroupPolicy> = Self::read_json(response).await?;
        Ok(result.into_documents())
    }

    async fn patch_policy(&self, policy_id: &str, patch: &PolicyPatch) -> Result<(), ApiError> {
        let path = link_for(links::GROUP_POLICIES, policy_id);
        self.send(self.request(Method::PATCH, &path).json(patch))
            .await?;
        Ok(())
    }

    async fn delete_policy(&self, policy_id: &str) -> Result<(), ApiError> {
        let path = link_for(links::GROUP_POLICIES, policy_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
