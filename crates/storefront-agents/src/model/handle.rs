//! Creation requests sent to the agent service and the handles it returns.

use serde::{Deserialize, Serialize};

use super::definition::AgentDefinition;
use super::tools::ToolDefinition;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAgentRequest {
    pub model: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
}

impl CreateAgentRequest {
    /// Build a request whose text comes entirely from `def`. The tool list is
    /// owned by this request only.
    pub fn from_definition(model: &str, def: &AgentDefinition, tools: Vec<ToolDefinition>) -> Self {
        Self {
            model: model.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            instructions: def.instructions.to_string(),
            tools,
        }
    }
}

/// Opaque reference to an agent hosted by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHandle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
