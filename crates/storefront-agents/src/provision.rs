//! One-shot provisioning pass: optional cleanup, specialists, then the
//! orchestrator wired to them.
//!
//! No compensating deletion happens when a later step fails; agents created
//! before the failure stay registered. Re-running with cleanup enabled starts
//! from an empty service.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::ProvisionError;
use crate::factory::AgentFactory;
use crate::model::{AgentHandle, AgentRole, McpToolResources};
use crate::service::AgentService;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Delete every agent already registered with the service first.
    pub cleanup_existing: bool,
}

#[derive(Debug, Clone)]
pub struct ProvisionedAgents {
    pub orchestrator: AgentHandle,
    pub cart_manager: AgentHandle,
    pub fashion_advisor: AgentHandle,
    pub content_moderator: AgentHandle,
}

/// Summary written to stdout after a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningReport {
    pub model: String,
    pub server_url: String,
    pub agents: BTreeMap<String, String>,
    pub main_orchestrator_agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<JsonValue>,
}

/// Delete all existing agents. Failures are logged and skipped; returns the
/// number of agents deleted.
pub async fn cleanup_existing_agents(service: &dyn AgentService) -> usize {
    let existing = match service.list_agents().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                "could not list existing agents for cleanup: {} (continuing)",
                e
            );
            return 0;
        }
    };
    if existing.is_empty() {
        tracing::info!("no existing agents to delete");
        return 0;
    }
    tracing::info!("deleting {} existing agent(s)", existing.len());
    let mut deleted = 0;
    for agent in &existing {
        let label = agent.name.as_deref().unwrap_or("<unnamed>");
        match service.delete_agent(&agent.id).await {
            Ok(()) => {
                tracing::info!("deleted agent {} ({})", label, agent.id);
                deleted += 1;
            }
            Err(e) => tracing::warn!("failed to delete agent {} ({}): {}", label, agent.id, e),
        }
    }
    deleted
}

fn require_specialist(
    role: AgentRole,
    outcome: crate::factory::AgentOutcome,
) -> Result<AgentHandle, ProvisionError> {
    outcome.require().map_err(|e| {
        tracing::error!("{} unavailable; cannot compose orchestrator", role);
        match e {
            ProvisionError::AgentCreationFailed { .. } => e,
            other => ProvisionError::AgentCreationFailed {
                agent: role.definition().name.to_string(),
                reason: other.to_string(),
            },
        }
    })
}

/// Create every agent in dependency order: specialists before the orchestrator.
pub async fn provision_all(
    factory: &AgentFactory<'_>,
    options: ProvisionOptions,
) -> Result<ProvisionedAgents, ProvisionError> {
    if options.cleanup_existing {
        let n = cleanup_existing_agents(factory.service()).await;
        tracing::info!("cleanup complete ({} agent(s) deleted)", n);
    }

    let cart_manager = factory.create_cart_manager().await?;
    let fashion_advisor =
        require_specialist(AgentRole::FashionAdvisor, factory.create_fashion_advisor().await)?;
    let content_moderator = require_specialist(
        AgentRole::ContentModerator,
        factory.create_content_moderator().await,
    )?;

    let orchestrator = factory
        .create_orchestrator_with_connected_agents(
            &cart_manager,
            &fashion_advisor,
            &content_moderator,
        )
        .await
        .require()?;

    Ok(ProvisionedAgents {
        orchestrator,
        cart_manager,
        fashion_advisor,
        content_moderator,
    })
}

impl ProvisioningReport {
    pub fn new(factory: &AgentFactory<'_>, agents: &ProvisionedAgents) -> Self {
        let ctx = factory.context();
        let ids: BTreeMap<String, String> = [
            (AgentRole::Orchestrator, &agents.orchestrator),
            (AgentRole::CartManager, &agents.cart_manager),
            (AgentRole::FashionAdvisor, &agents.fashion_advisor),
            (AgentRole::ContentModerator, &agents.content_moderator),
        ]
        .into_iter()
        .map(|(role, h)| (role.invocation_name().to_string(), h.id.clone()))
        .collect();
        Self {
            model: ctx.model.clone(),
            server_url: ctx.server_url.to_string(),
            agents: ids,
            main_orchestrator_agent_id: agents.orchestrator.id.clone(),
            tool_resources: ctx
                .inventory_mcp
                .as_ref()
                .map(|m| McpToolResources::new(&m.server_label).to_json()),
        }
    }
}
