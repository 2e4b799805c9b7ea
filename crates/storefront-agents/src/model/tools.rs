//! Tool definitions attached to agent creation requests.
//!
//! The serialized shape follows the hosted agents API: each tool is an object
//! tagged by `type`, with connected-agent and OpenAPI payloads nested under a
//! key of the same name and MCP fields inlined.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use crate::error::ProvisionError;

/// Server label used for the inventory MCP server.
pub const INVENTORY_MCP_LABEL: &str = "inventory_mcp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    ConnectedAgent { connected_agent: ConnectedAgentTool },
    #[serde(rename = "openapi")]
    OpenApi { openapi: OpenApiTool },
    Mcp(McpTool),
}

impl ToolDefinition {
    pub fn connected_agent(tool: ConnectedAgentTool) -> Self {
        ToolDefinition::ConnectedAgent {
            connected_agent: tool,
        }
    }

    pub fn openapi(tool: OpenApiTool) -> Self {
        ToolDefinition::OpenApi { openapi: tool }
    }

    pub fn as_connected_agent(&self) -> Option<&ConnectedAgentTool> {
        match self {
            ToolDefinition::ConnectedAgent { connected_agent } => Some(connected_agent),
            _ => None,
        }
    }
}

/// Delegation to another, already created agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedAgentTool {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Authentication mode the agent service uses when calling an OpenAPI tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenApiAuth {
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiTool {
    pub name: String,
    pub description: String,
    pub spec: JsonValue,
    pub auth: OpenApiAuth,
}

impl OpenApiTool {
    /// Build the tool from the text of an API description document.
    ///
    /// The document must be a JSON object; its schema is otherwise opaque.
    pub fn from_spec_text(
        name: &str,
        description: &str,
        spec_text: &str,
        auth: OpenApiAuth,
    ) -> Result<Self, ProvisionError> {
        if name.trim().is_empty() {
            return Err(ProvisionError::ToolConstructionFailed(
                "OpenAPI tool name must not be empty".to_string(),
            ));
        }
        let spec: JsonValue = serde_json::from_str(spec_text).map_err(|e| {
            ProvisionError::ToolConstructionFailed(format!("invalid API specification: {e}"))
        })?;
        if !spec.is_object() {
            return Err(ProvisionError::ToolConstructionFailed(
                "API specification must be a JSON object".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            spec,
            auth,
        })
    }
}

/// Remote MCP server exposed to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpTool {
    pub server_label: String,
    pub server_url: String,
    #[serde(default)]
    pub allowed_tools: Vec<String>,
}

impl McpTool {
    /// MCP tool for the external inventory service. `/mcp` is appended to the
    /// base URL unless it already ends with it.
    pub fn for_inventory(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let server_url = if base.ends_with("/mcp") {
            base.to_string()
        } else {
            format!("{base}/mcp")
        };
        Self {
            server_label: INVENTORY_MCP_LABEL.to_string(),
            server_url,
            allowed_tools: Vec::new(),
        }
    }
}

/// Run-time tool resources for an MCP server label.
#[derive(Debug, Clone, Default)]
pub struct McpToolResources {
    pub server_label: String,
    pub headers: Option<JsonMap<String, JsonValue>>,
    /// "always", "never", or a per-tool object.
    pub require_approval: Option<JsonValue>,
}

impl McpToolResources {
    pub fn new(server_label: &str) -> Self {
        Self {
            server_label: server_label.to_string(),
            ..Default::default()
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut cfg = JsonMap::new();
        cfg.insert(
            "server_label".to_string(),
            JsonValue::String(self.server_label.clone()),
        );
        cfg.insert(
            "require_approval".to_string(),
            self.require_approval
                .clone()
                .unwrap_or_else(|| JsonValue::String("always".to_string())),
        );
        if let Some(h) = self.headers.as_ref()
            && !h.is_empty()
        {
            cfg.insert("headers".to_string(), JsonValue::Object(h.clone()));
        }
        json!({ "mcp": [cfg] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_agent_wire_shape() {
        let tool = ToolDefinition::connected_agent(ConnectedAgentTool {
            id: "asst_1".into(),
            name: "cart_manager".into(),
            description: "Handles carts".into(),
        });
        let v = serde_json::to_value(&tool).unwrap();
        assert_eq!(v["type"], "connected_agent");
        assert_eq!(v["connected_agent"]["id"], "asst_1");
        assert_eq!(v["connected_agent"]["name"], "cart_manager");
    }

    #[test]
    fn openapi_wire_shape_uses_anonymous_auth() {
        let tool = OpenApiTool::from_spec_text(
            "cart_api",
            "Cart API",
            r#"{"openapi":"3.0.1","paths":{}}"#,
            OpenApiAuth::Anonymous,
        )
        .unwrap();
        let v = serde_json::to_value(ToolDefinition::openapi(tool)).unwrap();
        assert_eq!(v["type"], "openapi");
        assert_eq!(v["openapi"]["auth"]["type"], "anonymous");
        assert_eq!(v["openapi"]["spec"]["openapi"], "3.0.1");
    }

    #[test]
    fn mcp_fields_are_inlined() {
        let v = serde_json::to_value(ToolDefinition::Mcp(McpTool::for_inventory(
            "https://inv.example.com",
        )))
        .unwrap();
        assert_eq!(v["type"], "mcp");
        assert_eq!(v["server_label"], INVENTORY_MCP_LABEL);
        assert_eq!(v["server_url"], "https://inv.example.com/mcp");
    }

    #[test]
    fn inventory_url_normalization() {
        assert_eq!(
            McpTool::for_inventory("https://inv.example.com/").server_url,
            "https://inv.example.com/mcp"
        );
        assert_eq!(
            McpTool::for_inventory("https://inv.example.com/mcp/").server_url,
            "https://inv.example.com/mcp"
        );
    }

    #[test]
    fn openapi_rejects_non_json_and_non_object() {
        let err = OpenApiTool::from_spec_text("t", "d", "not json", OpenApiAuth::Anonymous)
            .unwrap_err();
        assert!(matches!(err, ProvisionError::ToolConstructionFailed(_)));
        let err =
            OpenApiTool::from_spec_text("t", "d", "[1,2]", OpenApiAuth::Anonymous).unwrap_err();
        assert!(matches!(err, ProvisionError::ToolConstructionFailed(_)));
    }

    #[test]
    fn tool_resources_default_to_always_approval() {
        let v = McpToolResources::new(INVENTORY_MCP_LABEL).to_json();
        assert_eq!(v["mcp"][0]["server_label"], INVENTORY_MCP_LABEL);
        assert_eq!(v["mcp"][0]["require_approval"], "always");
        assert!(v["mcp"][0].get("headers").is_none());
    }
}
