//! Static agent definitions and the roles they belong to.

use std::fmt;

/// Declarative description of one agent role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub instructions: &'static str,
    /// Text the orchestrator sees when deciding whether to delegate to this agent.
    pub connected_agent_description: &'static str,
}

/// Agent roles provisioned for the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Orchestrator,
    CartManager,
    FashionAdvisor,
    ContentModerator,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Orchestrator,
        AgentRole::CartManager,
        AgentRole::FashionAdvisor,
        AgentRole::ContentModerator,
    ];

    /// Definition backing this role. Always read from the registry.
    pub fn definition(self) -> &'static AgentDefinition {
        crate::registry::definition_for(self)
    }

    /// Name the orchestrator uses to invoke this role as a connected agent.
    pub fn invocation_name(self) -> &'static str {
        match self {
            AgentRole::Orchestrator => "orchestrator",
            AgentRole::CartManager => "cart_manager",
            AgentRole::FashionAdvisor => "fashion_advisor",
            AgentRole::ContentModerator => "content_moderator",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.invocation_name())
    }
}
