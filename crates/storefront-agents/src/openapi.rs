//! Loading of the cart API description and server address substitution.

use std::path::{Path, PathBuf};

use crate::address::ServerUrl;
use crate::error::ProvisionError;

/// Token in the API description replaced with the resolved server URL.
pub const SERVER_URL_PLACEHOLDER: &str = "{{SERVER_URL}}";

/// Where to look for the API description: `primary` first, then `alternate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLocation {
    pub primary: PathBuf,
    pub alternate: PathBuf,
}

impl SpecLocation {
    pub fn new(primary: impl Into<PathBuf>, alternate: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            alternate: alternate.into(),
        }
    }

    /// The first candidate path that exists on disk.
    pub fn locate(&self) -> Option<&Path> {
        [self.primary.as_path(), self.alternate.as_path()]
            .into_iter()
            .find(|p| p.is_file())
    }
}

/// Read the API description and substitute the server URL placeholder.
///
/// The file on disk is never modified. A document without the placeholder is
/// returned unchanged.
pub fn load_and_patch_spec(
    location: &SpecLocation,
    server_url: &ServerUrl,
) -> Result<String, ProvisionError> {
    let Some(path) = location.locate() else {
        tracing::error!(
            "API specification not found at {} or {}",
            location.primary.display(),
            location.alternate.display()
        );
        return Err(ProvisionError::SpecNotFound {
            primary: location.primary.clone(),
            alternate: location.alternate.clone(),
        });
    };
    tracing::info!("loading API specification from {}", path.display());

    let original = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("failed to read {}: {}", path.display(), e);
        ProvisionError::SpecNotFound {
            primary: location.primary.clone(),
            alternate: location.alternate.clone(),
        }
    })?;

    let had_placeholder = original.contains(SERVER_URL_PLACEHOLDER);
    let patched = original.replace(SERVER_URL_PLACEHOLDER, server_url.as_str());
    if had_placeholder && patched.contains(SERVER_URL_PLACEHOLDER) {
        return Err(ProvisionError::PlaceholderSubstitutionFailed {
            path: path.to_path_buf(),
            placeholder: SERVER_URL_PLACEHOLDER,
        });
    }
    if had_placeholder {
        tracing::info!("patched API specification with server URL {}", server_url);
    } else {
        tracing::debug!(
            "no {} placeholder in {}; using document as-is",
            SERVER_URL_PLACEHOLDER,
            path.display()
        );
    }
    tracing::debug!("API specification length (chars) = {}", patched.len());
    Ok(patched)
}
