//! adm-api: Wire model for the Admiral orchestration REST API
//!
//! This crate defines the JSON documents exchanged with the orchestration
//! service (hosts, policies, credentials, request trackers) and the helpers
//! for turning document links into ids and back.

pub mod credentials;
pub mod error;
pub mod host;
pub mod links;
pub mod policy;
pub mod query;
pub mod request;

pub use credentials::{AuthCredentials, CredentialsType};
pub use error::{ServiceError, WireError};
pub use host::{CertificateChallenge, ComputeState, HostPatch, HostSpec, PowerState};
pub use links::{id_from_link, link_for};
pub use policy::{GroupPolicy, PolicyPatch};
pub use query::QueryResult;
pub use request::{RemovalRequest, RequestStatus, TaskStage};
