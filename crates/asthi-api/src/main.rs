use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use asthi_api::config::ServerSettings;
use asthi_api::state::AppState;
use asthi_proxy::config::ProxyConfig;
use asthi_proxy::transport::HttpTransport;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Local development reads secrets from .env; absence is fine.
    let _ = dotenvy::dotenv();

    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let settings = ServerSettings::from_env()?;
    let proxy = ProxyConfig::from_env();

    let missing = proxy.missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "vendor configuration incomplete; affected routes will fail");
    }

    let transport = HttpTransport::new(settings.http_timeout)?;
    let state = AppState::new(Arc::new(transport), proxy);
    let app = asthi_api::app(state);

    if settings.on_lambda {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
