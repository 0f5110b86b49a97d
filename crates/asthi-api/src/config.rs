use std::net::SocketAddr;
use std::time::Duration;

use eyre::WrapErr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Process-level settings. Vendor credentials live in
/// [`asthi_proxy::config::ProxyConfig`] instead.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub http_timeout: Duration,
    /// Set when the Lambda runtime API is present in the environment.
    pub on_lambda: bool,
}

impl ServerSettings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("ASTHI_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .wrap_err("ASTHI_BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let http_timeout = match lookup("ASTHI_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .wrap_err("ASTHI_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            http_timeout: Duration::from_secs(http_timeout),
            on_lambda: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}
