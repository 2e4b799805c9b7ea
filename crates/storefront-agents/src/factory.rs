//! Role-specific agent factories sharing one creation helper.
//!
//! Agents without external tool dependencies degrade to [`AgentOutcome::Absent`]
//! when creation fails. The cart manager depends on a live cart API and fails
//! hard instead.

use crate::address::ServerUrl;
use crate::error::ProvisionError;
use crate::model::{
    AgentHandle, AgentRole, ConnectedAgentTool, CreateAgentRequest, McpTool, OpenApiAuth,
    OpenApiTool, ToolDefinition,
};
use crate::openapi::{SpecLocation, load_and_patch_spec};
use crate::probe::ConnectivityProber;
use crate::service::AgentService;

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Values resolved once per provisioning run and shared by every factory.
#[derive(Debug, Clone)]
pub struct ProvisioningContext {
    pub model: String,
    pub server_url: ServerUrl,
    pub spec: SpecLocation,
    /// Inventory MCP server attached to the orchestrator when configured.
    pub inventory_mcp: Option<McpTool>,
}

/// Result of a non-fatal factory.
#[derive(Debug)]
pub enum AgentOutcome {
    Created(AgentHandle),
    /// The agent could not be created; the caller may continue without it.
    Absent(ProvisionError),
}

impl AgentOutcome {
    pub fn handle(&self) -> Option<&AgentHandle> {
        match self {
            AgentOutcome::Created(h) => Some(h),
            AgentOutcome::Absent(_) => None,
        }
    }

    /// Treat absence as an error from here on.
    pub fn require(self) -> Result<AgentHandle, ProvisionError> {
        match self {
            AgentOutcome::Created(h) => Ok(h),
            AgentOutcome::Absent(e) => Err(e),
        }
    }
}

impl From<Result<AgentHandle, ProvisionError>> for AgentOutcome {
    fn from(r: Result<AgentHandle, ProvisionError>) -> Self {
        match r {
            Ok(h) => AgentOutcome::Created(h),
            Err(e) => AgentOutcome::Absent(e),
        }
    }
}

pub struct AgentFactory<'a> {
    service: &'a dyn AgentService,
    ctx: &'a ProvisioningContext,
    prober: ConnectivityProber,
}

impl<'a> AgentFactory<'a> {
    pub fn new(service: &'a dyn AgentService, ctx: &'a ProvisioningContext) -> Self {
        Self {
            service,
            ctx,
            prober: ConnectivityProber::new(),
        }
    }

    pub fn with_prober(mut self, prober: ConnectivityProber) -> Self {
        self.prober = prober;
        self
    }

    pub fn context(&self) -> &ProvisioningContext {
        self.ctx
    }

    pub fn service(&self) -> &'a dyn AgentService {
        self.service
    }

    /// Build the request for `role`, call the service and map its error.
    async fn create(
        &self,
        role: AgentRole,
        tools: Vec<ToolDefinition>,
    ) -> Result<AgentHandle, ProvisionError> {
        let def = role.definition();
        let request = CreateAgentRequest::from_definition(&self.ctx.model, def, tools);
        tracing::info!(
            "creating agent '{}' (role={}, model={}, tools={})",
            def.name,
            role,
            self.ctx.model,
            request.tools.len()
        );
        match self.service.create_agent(&request).await {
            Ok(handle) => {
                tracing::info!("created agent '{}' with id {}", def.name, handle.id);
                Ok(handle)
            }
            Err(e) => {
                tracing::error!("failed to create agent '{}': {}", def.name, e);
                Err(ProvisionError::AgentCreationFailed {
                    agent: def.name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn inventory_tools(&self) -> Vec<ToolDefinition> {
        self.ctx
            .inventory_mcp
            .iter()
            .cloned()
            .map(ToolDefinition::Mcp)
            .collect()
    }

    /// Orchestrator without connected agents.
    pub async fn create_orchestrator(&self) -> AgentOutcome {
        self.create(AgentRole::Orchestrator, self.inventory_tools())
            .await
            .into()
    }

    pub async fn create_fashion_advisor(&self) -> AgentOutcome {
        self.create(AgentRole::FashionAdvisor, Vec::new()).await.into()
    }

    pub async fn create_content_moderator(&self) -> AgentOutcome {
        self.create(AgentRole::ContentModerator, Vec::new())
            .await
            .into()
    }

    /// Cart manager with its OpenAPI tool. Every step is fatal.
    pub async fn create_cart_manager(&self) -> Result<AgentHandle, ProvisionError> {
        let server_url = &self.ctx.server_url;
        tracing::info!("provisioning cart manager against {}", server_url);

        let spec_text = load_and_patch_spec(&self.ctx.spec, server_url)?;
        self.prober.probe(server_url).await?;

        let def = AgentRole::CartManager.definition();
        let tool = OpenApiTool::from_spec_text(
            AgentRole::CartManager.invocation_name(),
            def.description,
            &spec_text,
            OpenApiAuth::Anonymous,
        )
        .inspect_err(|e| tracing::error!("cart API tool: {}", e))?;

        self.create(AgentRole::CartManager, vec![ToolDefinition::openapi(tool)])
            .await
    }

    /// Orchestrator wired to the three specialists as connected agents.
    pub async fn create_orchestrator_with_connected_agents(
        &self,
        cart: &AgentHandle,
        advisor: &AgentHandle,
        moderator: &AgentHandle,
    ) -> AgentOutcome {
        let mut tools: Vec<ToolDefinition> = [
            (AgentRole::CartManager, cart),
            (AgentRole::FashionAdvisor, advisor),
            (AgentRole::ContentModerator, moderator),
        ]
        .into_iter()
        .map(|(role, handle)| {
            ToolDefinition::connected_agent(ConnectedAgentTool {
                id: handle.id.clone(),
                name: role.invocation_name().to_string(),
                description: role.definition().connected_agent_description.to_string(),
            })
        })
        .collect();
        tracing::debug!("built {} connected agent tool(s)", tools.len());
        tools.extend(self.inventory_tools());

        self.create(AgentRole::Orchestrator, tools).await.into()
    }
}
