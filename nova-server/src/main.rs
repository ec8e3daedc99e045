use std::sync::Arc;

use anyhow::{Context, Result};
use nova_core::config::NovaConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nova_server::{AppState, app, refresh};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "{}=debug,nova_core=debug,tower_http=debug,axum::rejection=trace",
                env!("CARGO_CRATE_NAME")
            )
            .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NovaConfig::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let store = Arc::new(config.store());

    let state = AppState::new(config, store);
    // Load local events once so a corrupt store fails at startup
    state
        .load_local()
        .context("Failed to load local events")?;

    refresh::spawn_refresh_job(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("nova-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
