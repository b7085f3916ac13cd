use anyhow::Context;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::Backend;

/// Run the HTTP server until Ctrl-C
pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    let backend = Backend::connect(config)
        .await
        .context("failed to prepare storage")?;
    tracing::info!("Using {} storage", backend.name());

    let state = AppState::new(backend, config.security.realm.clone());
    if let Some(admin) = &config.security.bootstrap_admin {
        state
            .bootstrap_admin(admin)
            .await
            .context("failed to bootstrap admin user")?;
    }

    let router = app(state, &config.security);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("CompTrack listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
