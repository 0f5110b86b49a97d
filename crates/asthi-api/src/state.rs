use std::sync::Arc;

use asthi_proxy::config::ProxyConfig;
use asthi_proxy::transport::Transport;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Read-only after startup; handlers share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub proxy: Arc<ProxyConfig>,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, proxy: ProxyConfig) -> Self {
        Self {
            transport,
            proxy: Arc::new(proxy),
        }
    }
}
