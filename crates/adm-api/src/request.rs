//! Request broker and request tracker documents

use serde::{Deserialize, Serialize};

/// Resource type used when asking the service to remove hosts
pub const CONTAINER_HOST_TYPE: &str = "CONTAINER_HOST";

/// Operation name for host removal
pub const REMOVE_RESOURCE_OPERATION: &str = "REMOVE_RESOURCE";

/// Asynchronous request submitted to the service's request broker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemovalRequest {
    pub resource_type: String,
    pub operation: String,
    pub resource_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_tracker_link: Option<String>,
}

impl RemovalRequest {
    /// Request removal of the given compute host links
    pub fn remove_hosts(links: Vec<String>) -> Self {
        Self {
            resource_type: CONTAINER_HOST_TYPE.to_string(),
            operation: REMOVE_RESOURCE_OPERATION.to_string(),
            resource_links: links,
            request_tracker_link: None,
        }
    }
}

/// Stage of an asynchronous task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStage {
    Created,
    Started,
    Finished,
    Failed,
    Cancelled,
}

impl TaskStage {
    /// Whether the task will make no further progress
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStage::Finished | TaskStage::Failed | TaskStage::Cancelled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFailure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub stage: TaskStage,
    #[serde(default)]
    pub failure: Option<TaskFailure>,
}

/// Progress report of a request tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    #[serde(default)]
    pub document_self_link: String,
    pub task_info: TaskInfo,
    #[serde(default)]
    pub progress: Option<u8>,
}

impl RequestStatus {
    pub fn stage(&self) -> TaskStage {
        self.task_info.stage
    }

    /// Failure message reported by the service, if any
    pub fn failure_message(&self) -> Option<&str> {
        self.task_info
            .failure
            .as_ref()
            .map(|f| f.message.as_str())
            .filter(|m| !m.is_empty())
    }
}
