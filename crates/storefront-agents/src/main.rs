use std::time::Duration;

use anyhow::Context as _;
use env_flags::env_flags;
use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, prelude::*};

use storefront_agents::config::{expand_home, load_user_config, pick, storefront_home};
use storefront_agents::model::McpTool;
use storefront_agents::{
    AddressSignals, AgentFactory, HttpAgentService, HttpServiceConfig, ProvisionOptions,
    ProvisioningContext, ProvisioningReport, SpecLocation, provision_all, resolve_server_url,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy)]
enum LogFormat {
    Json,
    Compact,
    Pretty,
    Full,
}

fn fmt_layer<W>(writer: W, ansi: bool, format: LogFormat) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match format {
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Full => base.boxed(),
    }
}

fn init_tracing(home: &std::path::Path) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "info";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to a daily file under <STOREFRONT_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory. Defaults to <STOREFRONT_HOME>/logs
        LOG_DIR: &str = "";
    }

    let logging = load_user_config(home)
        .ok()
        .flatten()
        .and_then(|c| c.logging)
        .unwrap_or_default();
    let env_set = |k: &str| std::env::var_os(k).is_some();

    let mut rust_log = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        (*RUST_LOG).to_string()
    };
    if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
        && let Some(level) = logging.level.as_ref()
    {
        rust_log = level.clone();
    }
    let json = pick("TRACING_JSON", *TRACING_JSON, logging.json);
    let compact = pick("TRACING_COMPACT", *TRACING_COMPACT, logging.compact);
    let pretty = pick("TRACING_PRETTY", *TRACING_PRETTY, logging.pretty);
    let to_file = pick("LOG_TO_FILE", *LOG_TO_FILE, logging.to_file);
    let log_dir = if !(*LOG_DIR).is_empty() {
        std::path::PathBuf::from((*LOG_DIR).to_string())
    } else if let Some(dir) = logging.dir.as_deref() {
        expand_home(dir)
    } else {
        home.join("logs")
    };

    let format = if json {
        LogFormat::Json
    } else if compact {
        LogFormat::Compact
    } else if pretty {
        LogFormat::Pretty
    } else {
        LogFormat::Full
    };

    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the provisioning report; logs go to stderr.
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(std::io::stderr, true, format)];
    static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
    let mut file_err = None;
    if to_file {
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&log_dir, "storefront-agents.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(fmt_layer(nb, false, format));
            }
            Err(e) => file_err = Some(e),
        }
    }

    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some(e) = file_err {
        tracing::warn!("failed to create log dir {}: {}", log_dir.display(), e);
    }
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let home = storefront_home();
    init_tracing(&home);

    env_flags! {
        /// Agent service project endpoint. Required.
        PROJECT_ENDPOINT: &str = "";
        /// Bearer token for the agent service. Empty sends no Authorization header.
        AGENTS_API_TOKEN: &str = "";
        /// api-version query parameter sent to the agent service
        AGENTS_API_VERSION: &str = "v1";
        /// Per-request timeout for agent service calls
        AGENTS_API_TIMEOUT_SECS: u64 = 60;
        /// Model deployment used for every agent
        MODEL_DEPLOYMENT_NAME: &str = "gpt-4o";
        /// Explicit storefront URL (used when WEBSITE_HOSTNAME is absent)
        SERVER_URL: &str = "";
        /// Cart API description, then its fallback location
        CART_API_SPEC_PATH: &str = "swagger.json";
        CART_API_SPEC_ALT_PATH: &str = "wwwroot/swagger.json";
        /// External inventory service; attaches an MCP tool to the orchestrator when set
        EXTERNAL_INVENTORY_URL: &str = "";
        /// Delete all existing agents before provisioning
        AGENTS_CLEANUP_EXISTING: bool = false;
    }

    tracing::info!("storefront_home={}", home.display());
    let cfg = load_user_config(&home)
        .with_context(|| format!("failed to read {}", home.join("config.toml").display()))?
        .and_then(|c| c.provisioning)
        .unwrap_or_default();

    let s = |v: &str| v.to_string();
    let endpoint = non_empty(pick("PROJECT_ENDPOINT", s(*PROJECT_ENDPOINT), cfg.project_endpoint))
        .context("PROJECT_ENDPOINT is not set (env or [provisioning].project_endpoint)")?;
    let token = non_empty(pick("AGENTS_API_TOKEN", s(*AGENTS_API_TOKEN), cfg.api_token));
    if token.is_none() {
        tracing::warn!("no agent service token configured; requests are unauthenticated");
    }
    let api_version = pick("AGENTS_API_VERSION", s(*AGENTS_API_VERSION), cfg.api_version);
    let model = pick("MODEL_DEPLOYMENT_NAME", s(*MODEL_DEPLOYMENT_NAME), cfg.model);
    let configured_url = non_empty(pick("SERVER_URL", s(*SERVER_URL), cfg.server_url));
    let spec_path = pick("CART_API_SPEC_PATH", s(*CART_API_SPEC_PATH), cfg.spec_path);
    let spec_alt_path = pick(
        "CART_API_SPEC_ALT_PATH",
        s(*CART_API_SPEC_ALT_PATH),
        cfg.spec_alt_path,
    );
    let inventory_url = non_empty(pick(
        "EXTERNAL_INVENTORY_URL",
        s(*EXTERNAL_INVENTORY_URL),
        cfg.inventory_url,
    ));
    let cleanup_existing = pick(
        "AGENTS_CLEANUP_EXISTING",
        *AGENTS_CLEANUP_EXISTING,
        cfg.cleanup_existing,
    );

    let server_url = resolve_server_url(&AddressSignals::from_env(configured_url));
    let ctx = ProvisioningContext {
        model,
        server_url,
        spec: SpecLocation::new(expand_home(&spec_path), expand_home(&spec_alt_path)),
        inventory_mcp: inventory_url.as_deref().map(McpTool::for_inventory),
    };
    tracing::info!(
        "provisioning agents (endpoint={}, model={}, server_url={}, cleanup={})",
        endpoint,
        ctx.model,
        ctx.server_url,
        cleanup_existing
    );
    if let Some(mcp) = ctx.inventory_mcp.as_ref() {
        tracing::info!("inventory MCP server: {}", mcp.server_url);
    }

    let service = HttpAgentService::new(&HttpServiceConfig {
        endpoint,
        api_version,
        token,
        timeout: Duration::from_secs(*AGENTS_API_TIMEOUT_SECS),
    })
    .context("failed to build agent service client")?;
    let factory = AgentFactory::new(&service, &ctx);

    let agents = provision_all(&factory, ProvisionOptions { cleanup_existing })
        .await
        .inspect_err(|e| tracing::error!("provisioning aborted: {}", e))
        .context("agent provisioning failed")?;

    tracing::info!(
        "provisioning complete; set MAIN_ORCHESTRATOR_AGENT_ID={}",
        agents.orchestrator.id
    );
    let report = ProvisioningReport::new(&factory, &agents);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
