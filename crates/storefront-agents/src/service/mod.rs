//! Remote agent service seam and its HTTP implementation.

pub mod http;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{AgentHandle, CreateAgentRequest};

pub use http::{HttpAgentService, HttpServiceConfig};

/// Administrative operations of the agent-hosting service.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Create an agent and return its handle.
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentHandle, ServiceError>;

    /// List every agent currently registered with the service.
    async fn list_agents(&self) -> Result<Vec<AgentHandle>, ServiceError>;

    async fn delete_agent(&self, id: &str) -> Result<(), ServiceError>;
}
