//! Integration tests for the REST client using wiremock
//!
//! These tests run `AdmiralClient` against a mock orchestration service and
//! check request shapes, status mapping and the task polling loop.

use std::time::Duration;

use adm_api::{GroupPolicy, HostSpec, PolicyPatch, PowerState};
use adm_core::traits::{AddHostOutcome, HostApi, PolicyApi};
use adm_core::{ApiError, ClientConfig};
use admiral::api::AdmiralClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AdmiralClient {
    let config = ClientConfig {
        url: server.uri(),
        token: Some("t0k3n".to_string()),
        task_poll_interval: Duration::from_millis(10),
        task_timeout: Duration::from_secs(5),
        ..Default::default()
    };
    AdmiralClient::new(&config).expect("valid client")
}

fn tracker(stage: &str) -> serde_json::Value {
    json!({
        "documentSelfLink": "/request-status/r-1",
        "taskInfo": { "stage": stage },
        "progress": 50
    })
}

mod hosts {
    use super::*;

    #[tokio::test]
    async fn test_add_host_created() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/resources/hosts"))
            .and(header("x-xenon-auth-token", "t0k3n"))
            .and(body_partial_json(json!({
                "address": "10.0.0.5",
                "resourcePoolLink": "/resources/pools/pool-1"
            })))
            .respond_with(
                ResponseTemplate::new(201).insert_header("Location", "/resources/compute/c-9"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let spec = HostSpec::new("10.0.0.5", "/resources/pools/pool-1");
        let outcome = client_for(&server).add_host(&spec).await.unwrap();

        assert_eq!(
            outcome,
            AddHostOutcome::Added("/resources/compute/c-9".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_host_certificate_challenge() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/resources/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "certificate": "-----BEGIN CERTIFICATE-----",
                "commonName": "docker.local"
            })))
            .mount(&server)
            .await;

        let spec = HostSpec::new("10.0.0.5", "/resources/pools/pool-1");
        match client_for(&server).add_host(&spec).await.unwrap() {
            AddHostOutcome::Untrusted(challenge) => {
                assert_eq!(challenge.common_name.as_deref(), Some("docker.local"));
            }
            other => panic!("expected certificate challenge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_carries_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/resources/hosts"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "Host already exists",
                "statusCode": 409
            })))
            .mount(&server)
            .await;

        let spec = HostSpec::new("10.0.0.5", "/resources/pools/pool-1");
        let err = client_for(&server).add_host(&spec).await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Host already exists");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_hosts_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resources/compute"))
            .and(query_param("expand", "true"))
            .and(query_param("$filter", "ALL_FIELDS eq '*10.0*'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documentLinks": ["/resources/compute/c-2", "/resources/compute/c-1"],
                "documents": {
                    "/resources/compute/c-1": {
                        "documentSelfLink": "/resources/compute/c-1",
                        "address": "10.0.0.5",
                        "powerState": "ON"
                    },
                    "/resources/compute/c-2": {
                        "documentSelfLink": "/resources/compute/c-2",
                        "address": "10.0.0.6",
                        "powerState": "SUSPEND"
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hosts = client_for(&server).list_hosts(Some("10.0")).await.unwrap();

        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].address, "10.0.0.6");
        assert_eq!(hosts[0].power_state, Some(PowerState::Suspend));
        assert_eq!(hosts[1].host_id().unwrap(), "c-1");
    }

    #[tokio::test]
    async fn test_removal_waits_for_tracker() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/requests"))
            .and(body_partial_json(json!({
                "resourceType": "CONTAINER_HOST",
                "operation": "REMOVE_RESOURCE",
                "resourceLinks": ["/resources/compute/c-1"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resourceType": "CONTAINER_HOST",
                "operation": "REMOVE_RESOURCE",
                "resourceLinks": ["/resources/compute/c-1"],
                "requestTrackerLink": "/request-status/r-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/request-status/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tracker("STARTED")))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/request-status/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tracker("FINISHED")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let link = client
            .request_removal("/resources/compute/c-1")
            .await
            .unwrap();
        assert_eq!(link, "/request-status/r-1");

        client.wait_for_task(&link).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_task_reports_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/request-status/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "taskInfo": {
                    "stage": "FAILED",
                    "failure": { "message": "Host has running containers" }
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .wait_for_task("/request-status/r-1")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::TaskFailed(ref m) if m == "Host has running containers"));
    }

    #[tokio::test]
    async fn test_cancelled_task_stops_polling() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/request-status/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tracker("CANCELLED")))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .wait_for_task("/request-status/r-1")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::TaskFailed(ref m) if m == "CANCELLED"));
    }

    #[tokio::test]
    async fn test_list_hosts_escapes_quotes_in_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resources/compute"))
            .and(query_param("$filter", "ALL_FIELDS eq '*o''brien*'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documentLinks": [],
                "documents": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hosts = client_for(&server).list_hosts(Some("o'brien")).await.unwrap();
        assert!(hosts.is_empty());
    }

    #[tokio::test]
    async fn test_task_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/request-status/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tracker("STARTED")))
            .mount(&server)
            .await;

        let config = ClientConfig {
            url: server.uri(),
            task_poll_interval: Duration::from_millis(10),
            task_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let err = AdmiralClient::new(&config)
            .unwrap()
            .wait_for_task("/request-status/r-1")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::TaskTimeout { .. }));
    }
}

mod policies {
    use super::*;

    #[tokio::test]
    async fn test_add_policy_returns_stored_document() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/resources/group-policies"))
            .and(body_partial_json(json!({
                "name": "web",
                "memoryLimit": 1_024_000_000u64,
                "tenantLinks": ["/tenants/qe"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documentSelfLink": "/resources/group-policies/gp-1",
                "name": "web",
                "memoryLimit": 1_024_000_000u64
            })))
            .expect(1)
            .mount(&server)
            .await;

        let policy = GroupPolicy {
            name: "web".to_string(),
            memory_limit: 1_024_000_000,
            tenant_links: vec!["/tenants/qe".to_string()],
            ..Default::default()
        };
        let stored = client_for(&server).add_policy(&policy).await.unwrap();

        assert_eq!(stored.policy_id().unwrap(), "gp-1");
    }

    #[tokio::test]
    async fn test_patch_and_delete_use_policy_link() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/resources/group-policies/gp-7"))
            .and(body_partial_json(json!({ "priority": 3 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/resources/group-policies/gp-7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let patch = PolicyPatch {
            priority: Some(3),
            ..Default::default()
        };
        client.patch_policy("gp-7", &patch).await.unwrap();
        client.delete_policy("gp-7").await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/resources/group-policies/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_policy("missing")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Server returned 404: Not Found");
    }
}
