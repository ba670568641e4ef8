use std::sync::Arc;

use anyhow::Context;

use crate::clients::aqhi::AqhiFeedClient;
use crate::core::FeedSource;
use crate::infra::config::{Config, FeedConfig};

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    let feed_cfg = FeedConfig::from_env_and_toml()?;
    tracing::info!(
        mode = %cfg.mode,
        host = %cfg.host,
        port = cfg.port,
        feed_url = %feed_cfg.url,
        "BOOT hk-environment-mcp"
    );

    let client = AqhiFeedClient::from_config(&feed_cfg).context("building feed client")?;
    let source: Arc<dyn FeedSource> = Arc::new(client);

    if !cfg.is_http() {
        let factory = move || crate::tools::aqhi::tool_router::register(source);
        crate::infra::runtime::mcp_transport::serve_stdio(factory)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(source);
    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .with_context(|| format!("binding {}:{}", cfg.host, cfg.port))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening for streamable HTTP at /mcp");
    axum::serve(listener, app).await?;
    Ok(())
}
