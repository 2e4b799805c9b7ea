//! Resolution of the externally reachable base URL of the storefront.

use std::fmt;

/// Literal fallback when nothing else is known.
pub const FALLBACK_HOST: &str = "localhost:5000";
/// Domain used to synthesize a hostname from the hosting site name.
pub const CLOUD_DOMAIN: &str = "azurewebsites.net";

/// Resolved absolute base URL (scheme + host).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerUrl(String);

impl ServerUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute path onto the base URL.
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signals consulted when resolving the server address. Empty strings count
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSignals {
    /// Hostname provided by the hosting environment (`WEBSITE_HOSTNAME`).
    pub hosting_hostname: Option<String>,
    /// Explicitly configured server URL.
    pub configured_url: Option<String>,
    /// Hosting site name (`WEBSITE_SITE_NAME`).
    pub site_name: Option<String>,
    /// Default hostname (`WEBSITE_DEFAULT_HOSTNAME`).
    pub default_hostname: Option<String>,
}

impl AddressSignals {
    /// Read the hosting signals from the process environment, pairing them
    /// with an already resolved configured URL.
    pub fn from_env(configured_url: Option<String>) -> Self {
        let var = |k: &str| std::env::var(k).ok();
        Self {
            hosting_hostname: var("WEBSITE_HOSTNAME"),
            configured_url,
            site_name: var("WEBSITE_SITE_NAME"),
            default_hostname: var("WEBSITE_DEFAULT_HOSTNAME"),
        }
    }
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the server URL. First match wins; never fails.
pub fn resolve_server_url(signals: &AddressSignals) -> ServerUrl {
    let mut host = present(&signals.hosting_hostname)
        .or_else(|| present(&signals.configured_url))
        .unwrap_or(FALLBACK_HOST)
        .to_string();

    if host == FALLBACK_HOST
        && let Some(site) = present(&signals.site_name)
    {
        host = format!("{site}.{CLOUD_DOMAIN}");
    }
    if host == FALLBACK_HOST
        && let Some(default_host) = present(&signals.default_hostname)
    {
        host = default_host.to_string();
    }

    tracing::debug!("resolved server host: {}", host);
    ServerUrl(with_scheme(&host))
}

fn with_scheme(host: &str) -> String {
    let lower = host.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else if host.contains("localhost") {
        format!("http://{}", host.trim_end_matches('/'))
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signals(
        hosting: Option<&str>,
        configured: Option<&str>,
        site: Option<&str>,
        default_host: Option<&str>,
    ) -> AddressSignals {
        AddressSignals {
            hosting_hostname: hosting.map(String::from),
            configured_url: configured.map(String::from),
            site_name: site.map(String::from),
            default_hostname: default_host.map(String::from),
        }
    }

    #[test]
    fn hosting_hostname_gets_https() {
        let url = resolve_server_url(&signals(Some("shop.example.net"), None, None, None));
        assert_eq!(url.as_str(), "https://shop.example.net");
    }

    #[test]
    fn nothing_set_falls_back_to_localhost() {
        let url = resolve_server_url(&AddressSignals::default());
        assert_eq!(url.as_str(), "http://localhost:5000");
    }

    #[test]
    fn site_name_synthesizes_cloud_host() {
        let url = resolve_server_url(&signals(None, None, Some("fashionstore"), None));
        assert_eq!(url.as_str(), "https://fashionstore.azurewebsites.net");
    }

    #[test]
    fn precedence_hosting_then_configured() {
        let url = resolve_server_url(&signals(
            Some("a.example.net"),
            Some("https://b.example.net"),
            Some("site"),
            Some("d.example.net"),
        ));
        assert_eq!(url.as_str(), "https://a.example.net");

        let url = resolve_server_url(&signals(
            None,
            Some("http://b.example.net/"),
            Some("site"),
            None,
        ));
        assert_eq!(url.as_str(), "http://b.example.net");
    }

    #[test]
    fn site_name_wins_over_default_hostname() {
        let url = resolve_server_url(&signals(None, None, Some("s"), Some("d.example.net")));
        assert_eq!(url.as_str(), "https://s.azurewebsites.net");
        let url = resolve_server_url(&signals(None, None, None, Some("d.example.net")));
        assert_eq!(url.as_str(), "https://d.example.net");
    }

    #[test]
    fn empty_values_are_ignored() {
        let url = resolve_server_url(&signals(Some(""), Some("  "), None, None));
        assert_eq!(url.as_str(), "http://localhost:5000");
    }

    #[test]
    fn localhost_variants_use_http() {
        let url = resolve_server_url(&signals(None, Some("localhost:7071"), None, None));
        assert_eq!(url.as_str(), "http://localhost:7071");
    }

    #[test]
    fn existing_scheme_is_matched_case_insensitively() {
        let url = resolve_server_url(&signals(None, Some("HTTPS://shop.example/"), None, None));
        assert_eq!(url.as_str(), "HTTPS://shop.example");
        let url = resolve_server_url(&signals(Some("Http://localhost:5000"), None, None, None));
        assert_eq!(url.as_str(), "Http://localhost:5000");
    }

    #[test]
    fn join_handles_slashes() {
        let url = resolve_server_url(&signals(None, Some("https://x.example/"), None, None));
        assert_eq!(url.join("/api/Cart"), "https://x.example/api/Cart");
    }

    fn opt_host() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z]{0,8}(\\.[a-z]{2,4})?(:[0-9]{2,4})?")
    }

    proptest! {
        #[test]
        fn resolution_is_pure(
            hosting in opt_host(),
            configured in opt_host(),
            site in opt_host(),
            default_host in opt_host(),
        ) {
            let s = AddressSignals {
                hosting_hostname: hosting,
                configured_url: configured,
                site_name: site,
                default_hostname: default_host,
            };
            let first = resolve_server_url(&s);
            let second = resolve_server_url(&s.clone());
            prop_assert_eq!(&first, &second);
            prop_assert!(first.as_str().starts_with("http://") || first.as_str().starts_with("https://"));
        }
    }
}
