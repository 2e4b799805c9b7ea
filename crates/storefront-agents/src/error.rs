//! Error taxonomy for the provisioning workflow and the remote agent client.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning agent definitions into remote agents.
///
/// On the cart-manager path every variant is fatal. Other factories only
/// produce `AgentCreationFailed`, and surface it as an absent result.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "API specification not found (checked {} and {})",
        primary.display(),
        alternate.display()
    )]
    SpecNotFound { primary: PathBuf, alternate: PathBuf },

    #[error("placeholder {placeholder} still present in {} after substitution", path.display())]
    PlaceholderSubstitutionFailed {
        path: PathBuf,
        placeholder: &'static str,
    },

    #[error("connectivity probe to {url} failed: {reason}{}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    ProbeFailed {
        url: String,
        status: Option<u16>,
        reason: String,
        body: String,
    },

    #[error("failed to construct tool: {0}")]
    ToolConstructionFailed(String),

    #[error("failed to create agent '{agent}': {reason}")]
    AgentCreationFailed { agent: String, reason: String },
}

/// Failures reported by an [`AgentService`](crate::service::AgentService).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("agent service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from agent service: {0}")]
    Decode(String),
}
