//! Agent search API binary.
//!
//! Resolves configuration from the environment, then serves the search
//! router until interrupted.

use agent_index::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::load(|key| std::env::var(key).ok()).map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        anyhow::anyhow!("failed to load configuration: {e}")
    })?;

    tracing::info!(
        addr = %config.server.bind_addr(),
        top_k = config.ranking.top_k,
        "agent-search-api starting"
    );

    agent_index::server::run(config).await.map_err(|e| {
        tracing::error!(error = %e, "agent-search-api exited with error");
        anyhow::anyhow!("agent-search-api failed: {e}")
    })?;

    tracing::info!("agent-search-api shut down cleanly");
    Ok(())
}
