//! Web presentation layer.

pub mod charts;
pub mod form;
pub mod handlers;
pub mod navigation;
pub mod render;
pub mod router;
pub mod state;

use crate::config::AppConfig;
use crate::utils::error::Result;
use state::AppState;
use tokio::net::TcpListener;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let app = router::build_router(AppState::from_config(config));
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;

    tracing::info!(
        address = %address,
        artifacts = %config.artifacts.dir,
        dataset = %config.dataset.path,
        "Serving heart-risk"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
