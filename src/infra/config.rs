use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_NWS_BASE_URL: &str = "https://api.weather.gov";

/// Which run-loop owns the process. Decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http { address: String },
}

impl Transport {
    /// An absent or blank address means stdio. A bare `:port` listens on all interfaces.
    pub fn from_address(address: Option<&str>) -> Self {
        match address.map(str::trim) {
            Some(a) if a.starts_with(':') => Transport::Http {
                address: format!("0.0.0.0{a}"),
            },
            Some(a) if !a.is_empty() => Transport::Http {
                address: a.to_string(),
            },
            _ => Transport::Stdio,
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Stdio => f.write_str("stdio"),
            Transport::Http { address } => write!(f, "http://{address}/mcp"),
        }
    }
}

/// Settings for the NWS HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NWS_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };
        Self {
            base_url: non_empty_var("NWS_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: non_empty_var("NWS_USER_AGENT").unwrap_or(defaults.user_agent),
            connect_timeout: secs("NWS_CONNECT_TIMEOUT_SECS", defaults.connect_timeout),
            request_timeout: secs("NWS_TIMEOUT_SECS", defaults.request_timeout),
        }
    }

    /// Same defaults, pointed at another base URL (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

pub struct Config {
    pub transport: Transport,
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            transport: Transport::from_address(cli.address.as_deref()),
            upstream: UpstreamConfig::from_env(),
        }
    }
}

fn default_user_agent() -> String {
    // NWS rejects requests without an identifying User-Agent.
    format!("mcp-nws/{}", env!("CARGO_PKG_VERSION"))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "NWS_BASE_URL",
            "NWS_USER_AGENT",
            "NWS_TIMEOUT_SECS",
            "NWS_CONNECT_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn no_address_selects_stdio() {
        assert_eq!(Transport::from_address(None), Transport::Stdio);
        assert_eq!(Transport::from_address(Some("  ")), Transport::Stdio);
    }

    #[test]
    fn address_selects_http() {
        assert_eq!(
            Transport::from_address(Some("127.0.0.1:8080")),
            Transport::Http {
                address: "127.0.0.1:8080".into()
            }
        );
        assert_eq!(
            Transport::from_address(Some(":9000")),
            Transport::Http {
                address: "0.0.0.0:9000".into()
            }
        );
    }

    #[test]
    #[serial]
    fn upstream_defaults() {
        clear_env();
        let cfg = UpstreamConfig::from_env();
        assert_eq!(cfg, UpstreamConfig::default());
        assert_eq!(cfg.base_url, "https://api.weather.gov");
        assert!(cfg.user_agent.starts_with("mcp-nws/"));
    }

    #[test]
    #[serial]
    fn upstream_env_overrides() {
        clear_env();
        std::env::set_var("NWS_BASE_URL", "http://localhost:9999");
        std::env::set_var("NWS_USER_AGENT", "tests (ops@example.com)");
        std::env::set_var("NWS_TIMEOUT_SECS", "7");
        std::env::set_var("NWS_CONNECT_TIMEOUT_SECS", "nope");
        let cfg = UpstreamConfig::from_env();
        assert_eq!(cfg.base_url, "http://localhost:9999");
        assert_eq!(cfg.user_agent, "tests (ops@example.com)");
        assert_eq!(cfg.request_timeout, Duration::from_secs(7));
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        clear_env();
    }

    #[test]
    #[serial]
    fn config_from_cli() {
        clear_env();
        let cfg = Config::from_cli(&Cli {
            address: Some("0.0.0.0:8080".into()),
        });
        assert_eq!(cfg.transport.to_string(), "http://0.0.0.0:8080/mcp");
        let cfg = Config::from_cli(&Cli { address: None });
        assert_eq!(cfg.transport, Transport::Stdio);
    }
}
