//! Provisioning of the fashion storefront's hosted agents.
//!
//! Builds creation requests from static agent definitions and registers them
//! with the agent-hosting service: three specialists (cart manager, fashion
//! advisor, content moderator) and an orchestrator that delegates to them as
//! connected agents. The cart manager carries an OpenAPI tool for the store's
//! cart API, whose description is patched with the resolved server address
//! and checked for reachability first.

pub mod address;
pub mod config;
pub mod error;
pub mod factory;
pub mod model;
pub mod openapi;
pub mod probe;
pub mod provision;
pub mod registry;
pub mod service;

#[cfg(test)]
pub mod test_support;

pub use address::{AddressSignals, ServerUrl, resolve_server_url};
pub use error::{ProvisionError, ServiceError};
pub use factory::{AgentFactory, AgentOutcome, DEFAULT_MODEL, ProvisioningContext};
pub use openapi::{SpecLocation, load_and_patch_spec};
pub use probe::ConnectivityProber;
pub use provision::{ProvisionOptions, ProvisionedAgents, ProvisioningReport, provision_all};
pub use service::{AgentService, HttpAgentService, HttpServiceConfig};
