use anyhow::Context;
use axum::Router;
use dossier_core::Config;

/// Bind and serve until the process is stopped.
pub async fn start_server(config: &Config, router: Router) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, environment = %config.environment, "dossier API listening");
    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}
