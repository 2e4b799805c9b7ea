use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub provisioning: Option<ProvisioningCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProvisioningCfg {
    pub project_endpoint: Option<String>,
    pub api_token: Option<String>,
    pub api_version: Option<String>,
    pub model: Option<String>,

    pub server_url: Option<String>, // explicit server URL, below WEBSITE_HOSTNAME
    pub spec_path: Option<String>,
    pub spec_alt_path: Option<String>,

    pub inventory_url: Option<String>,
    pub cleanup_existing: Option<bool>,
}

/// Home directory for config and logs: `STOREFRONT_HOME`, else
/// `$HOME/.storefront-agents`, else `./.storefront-agents`.
pub fn storefront_home() -> PathBuf {
    if let Ok(h) = std::env::var("STOREFRONT_HOME")
        && !h.is_empty()
    {
        return PathBuf::from(h);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".storefront-agents");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".storefront-agents")
}

pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)?;
    Ok(Some(parse_user_config(&s)?))
}

pub fn parse_user_config(s: &str) -> anyhow::Result<UserConfig> {
    Ok(toml::from_str(s)?)
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Pick the env value when the variable is set, else the config value, else
/// the default. Empty env strings count as set.
pub fn pick<T: Clone>(env_name: &str, env_value: T, cfg_value: Option<T>) -> T {
    if std::env::var_os(env_name).is_some() {
        env_value
    } else {
        cfg_value.unwrap_or(env_value)
    }
}
