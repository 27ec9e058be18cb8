use std::sync::Arc;

use anyhow::Context;

use filmrental_api::{app, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    filmrental_observability::init();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let services = app::services::build_services(&config)
        .await
        .context("failed to wire services")?;
    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
